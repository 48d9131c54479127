//! Security primitives and memory safety utilities
//!
//! Foundational types for handling key schedules and keystream material.

pub mod memory;
pub mod secret;

// Re-export core security types
pub use secret::{SecretBuffer, ZeroizeGuard};

// Re-export memory barrier utilities
pub use memory::barrier;
