//! Constant-time AES with the modes used for media packaging
//!
//! This crate provides a software AES core with bitsliced S-boxes and the
//! two cryptors built on it:
//!
//! - [`CtrModeCryptor`]: CENC (ISO/IEC 23001-7) counter mode, with keystream
//!   continuity across calls, subsample processing and per-sample IV advance
//! - [`CbcModeCryptor`]: CBC with NoPadding, PKCS#5 or ciphertext stealing,
//!   either restarting from the IV on every call or chaining across calls
//!
//! Both implement [`api::Cryptor`]. The library is usable in `no_std`
//! environments with an allocator.
//!
//! # Security Features
//!
//! - Key schedules held in [`SecretBuffer`] and zeroized on drop
//! - No secret-dependent table lookups in the cipher core
//! - Constant-time PKCS#5 padding verification
//! - Memory barriers around keystream and chaining loops

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Block cipher, modes and padding
pub mod block;
pub use block::{
    Aes, BlockCipher, CbcModeCryptor, CbcOptions, ChainingMode, CryptorState, CtrModeCryptor, Iv,
    IvMode, PaddingScheme, Subsample,
};

// Re-export security types from cencrypt-common
pub use common::security::{barrier, SecretBuffer, ZeroizeGuard};
