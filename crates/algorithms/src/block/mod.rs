//! Block cipher primitives, modes of operation and padding
//!
//! The AES core lives in [`aes`]; the CENC counter-mode and CBC cryptors
//! built on it live in [`modes`], and the CBC padding disciplines in
//! [`padding`].

pub mod aes;
pub mod modes;
pub mod padding;

pub use aes::Aes;
pub use modes::{
    CbcModeCryptor, CbcOptions, ChainingMode, CryptorState, CtrModeCryptor, Iv, IvMode,
    Subsample,
};
pub use padding::PaddingScheme;

use crate::error::Result;

/// Trait for block ciphers keyed at runtime
pub trait BlockCipher {
    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Human readable algorithm name for the loaded key
    fn name(&self) -> &'static str;

    /// Size in bytes of the loaded key
    fn key_size(&self) -> usize;

    /// Encrypt exactly one block in place
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypt exactly one block in place
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Block size in bytes
    fn block_size() -> usize
    where
        Self: Sized,
    {
        Self::BLOCK_SIZE
    }
}
