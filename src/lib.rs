//! # cencrypt
//!
//! AES for media packaging: CENC (ISO/IEC 23001-7) counter mode with
//! subsample encryption and per-sample IV advance, and CBC with NoPadding,
//! PKCS#5 or ciphertext-stealing padding.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cencrypt = "0.3"
//! ```
//!
//! ```
//! use cencrypt::prelude::*;
//!
//! let key = [0x2bu8; 16];
//! let mut encryptor = CtrModeCryptor::new();
//! encryptor.initialize_with_iv(&key, &[0u8; 8]).unwrap();
//! let sample = encryptor.encrypt(b"first sample").unwrap();
//! encryptor.update_iv().unwrap();
//! assert_eq!(encryptor.iv(), &[0, 0, 0, 0, 0, 0, 0, 1]);
//!
//! let mut decryptor = CtrModeCryptor::new();
//! decryptor.initialize_with_iv(&key, &[0u8; 8]).unwrap();
//! assert_eq!(decryptor.decrypt(&sample).unwrap(), b"first sample");
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support and OS-seeded random IVs
//! - `alloc`: `no_std` builds with an allocator
//! - `serde`: serialization of padding, chaining and subsample settings
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`cencrypt-api`]: the `Cryptor` trait and public error type
//! - [`cencrypt-algorithms`]: AES core, CTR and CBC cryptors, padding
//! - [`cencrypt-common`]: zeroizing containers and memory barriers
//! - [`cencrypt-params`]: key, block and IV size constants

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use cencrypt_algorithms as algorithms;
pub use cencrypt_api as api;
pub use cencrypt_common as common;
pub use cencrypt_params as params;

#[cfg(feature = "rand")]
pub use rand;
pub use zeroize;

/// Common imports for cencrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, ResultExt};

    // Re-export core traits
    pub use crate::algorithms::BlockCipher;
    pub use crate::api::Cryptor;

    // Cryptors and their settings
    pub use crate::algorithms::{
        Aes, CbcModeCryptor, CbcOptions, ChainingMode, CtrModeCryptor, PaddingScheme, Subsample,
    };

    // Re-export security types
    pub use crate::common::{SecretBuffer, ZeroizeGuard};
}
