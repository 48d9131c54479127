//! Common implementations and shared functionality for cencrypt
//!
//! Holds the zeroizing containers used for key schedules and keystream
//! blocks, plus the compiler barriers wrapped around sensitive loops.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod security;

// Re-export core security types
pub use security::{SecretBuffer, ZeroizeGuard};

// Re-export memory barrier utilities
pub use security::memory::barrier;
