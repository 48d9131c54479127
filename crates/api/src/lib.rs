//! Public API traits and types for cencrypt
//!
//! This crate provides the public API surface shared by the cryptor
//! implementations: the unified error type and the [`Cryptor`] trait that
//! packaging code programs against.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};

pub use traits::Cryptor;

// Re-export trait modules for direct access
pub use traits::cryptor;
