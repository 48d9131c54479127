//! Padding disciplines for CBC
//!
//! * `NoPadding`: input passes through unchanged; misaligned input is only
//!   accepted when the cryptor chains across calls, in which case the
//!   trailing partial block is left in the clear.
//! * `Pkcs5`: `n = 16 - len % 16` bytes of value `n` are appended (a whole
//!   block when the input is aligned).
//! * `Cts`: ciphertext stealing; output length equals input length and
//!   inputs shorter than one block pass through verbatim.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use params::utils::symmetric::AES_BLOCK_SIZE;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

use super::modes::ChainingMode;
use crate::error::{validate, Error, Result};

/// How CBC input is brought to a whole number of blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaddingScheme {
    /// No padding; input should be block aligned
    NoPadding,
    /// PKCS#5 / PKCS#7 padding to the AES block size
    Pkcs5,
    /// Ciphertext stealing
    Cts,
}

impl PaddingScheme {
    /// Scheme label used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            PaddingScheme::NoPadding => "NoPadding",
            PaddingScheme::Pkcs5 => "PKCS#5",
            PaddingScheme::Cts => "CTS",
        }
    }

    /// Ciphertext length for `len` bytes of plaintext
    pub fn padded_len(self, len: usize) -> usize {
        len + self.padding_len(len)
    }

    /// Number of bytes encryption adds to `len` bytes of plaintext
    pub fn padding_len(self, len: usize) -> usize {
        match self {
            PaddingScheme::Pkcs5 => AES_BLOCK_SIZE - len % AES_BLOCK_SIZE,
            PaddingScheme::NoPadding | PaddingScheme::Cts => 0,
        }
    }

    /// Append padding to `buffer`
    pub fn pad(self, buffer: &mut Vec<u8>) {
        let n = self.padding_len(buffer.len());
        // n <= 16, so it fits in the pad byte
        buffer.resize(buffer.len() + n, n as u8);
    }

    /// Strip and verify padding from decrypted `buffer`
    ///
    /// For PKCS#5 the pad value and every pad byte are checked without
    /// data-dependent branches; any mismatch is a single `Padding` error.
    pub fn unpad(self, buffer: &mut Vec<u8>) -> Result<()> {
        if self != PaddingScheme::Pkcs5 {
            return Ok(());
        }
        validate::min_length("PKCS#5 padded block", buffer.len(), AES_BLOCK_SIZE)?;

        let len = buffer.len();
        let pad = buffer[len - 1];
        let mut valid: Choice = pad.ct_gt(&0) & !pad.ct_gt(&(AES_BLOCK_SIZE as u8));
        for (i, byte) in buffer[len - AES_BLOCK_SIZE..].iter().rev().enumerate() {
            let in_pad = (i as u8).ct_lt(&pad);
            valid &= !in_pad | byte.ct_eq(&pad);
        }

        if !bool::from(valid) {
            return Err(Error::Padding {
                scheme: self.name(),
                details: "invalid padding bytes",
            });
        }
        buffer.truncate(len - pad as usize);
        Ok(())
    }

    /// Reject plaintext lengths this scheme cannot encrypt
    pub fn check_encrypt_len(self, len: usize, chaining: ChainingMode) -> Result<()> {
        match (self, chaining) {
            (PaddingScheme::NoPadding, ChainingMode::ResetPerCall) => {
                validate::multiple_of("CBC NoPadding input", len, AES_BLOCK_SIZE)
            }
            _ => Ok(()),
        }
    }

    /// Reject ciphertext lengths this scheme cannot decrypt
    pub fn check_decrypt_len(self, len: usize, chaining: ChainingMode) -> Result<()> {
        match self {
            PaddingScheme::NoPadding => self.check_encrypt_len(len, chaining),
            PaddingScheme::Pkcs5 => {
                validate::min_length("PKCS#5 ciphertext", len, AES_BLOCK_SIZE)?;
                validate::multiple_of("PKCS#5 ciphertext", len, AES_BLOCK_SIZE)
            }
            PaddingScheme::Cts => Ok(()),
        }
    }
}
