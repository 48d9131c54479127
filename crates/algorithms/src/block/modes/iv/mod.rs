//! Initialization vector handling for the CENC counter mode and CBC
//!
//! Counter mode accepts 8 or 16-byte IVs. An 8-byte IV occupies the high
//! half of the counter block and the low half (the block counter) starts at
//! zero; a 16-byte IV is the counter block itself. CBC takes exactly one
//! block.

use core::fmt;

use byteorder::{BigEndian, ByteOrder};
use params::utils::symmetric::{
    AES_BLOCK_SIZE, CBC_IV_SIZE, CENC_IV_SIZES, CENC_IV_SIZE_128, CENC_IV_SIZE_64,
};
use rand::{CryptoRng, RngCore};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{validate, Error, Result};

/// Which mode an IV is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IvMode {
    /// CENC counter mode: 8 or 16 bytes
    Ctr,
    /// Cipher block chaining: 16 bytes
    Cbc,
}

impl IvMode {
    /// IV sizes accepted by this mode
    pub fn allowed_sizes(self) -> &'static [usize] {
        const CBC_SIZES: [usize; 1] = [CBC_IV_SIZE];
        match self {
            IvMode::Ctr => &CENC_IV_SIZES,
            IvMode::Cbc => &CBC_SIZES,
        }
    }

    /// Mode label used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            IvMode::Ctr => "AES-CTR",
            IvMode::Cbc => "AES-CBC",
        }
    }
}

/// Check that `iv` has a size `mode` accepts
pub fn validate(iv: &[u8], mode: IvMode) -> Result<()> {
    validate::iv_size(mode.name(), iv.len(), mode.allowed_sizes())
}

/// Increment the CENC block counter (bytes 8..16, big endian)
///
/// Wraps modulo 2⁶⁴ without carrying into the high half.
#[inline]
pub fn increment_block_counter(counter: &mut [u8; AES_BLOCK_SIZE]) {
    let low = BigEndian::read_u64(&counter[8..]);
    BigEndian::write_u64(&mut counter[8..], low.wrapping_add(1));
}

/// An owned IV of 8 or 16 bytes
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Iv {
    bytes: [u8; AES_BLOCK_SIZE],
    len: usize,
}

impl Iv {
    /// Copy `iv` after checking its size against `mode`
    pub fn new(iv: &[u8], mode: IvMode) -> Result<Self> {
        validate(iv, mode)?;
        let mut bytes = [0u8; AES_BLOCK_SIZE];
        bytes[..iv.len()].copy_from_slice(iv);
        Ok(Self {
            bytes,
            len: iv.len(),
        })
    }

    /// Draw a counter-mode IV of `size` bytes from `rng`
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, size: usize) -> Result<Self> {
        validate::iv_size(IvMode::Ctr.name(), size, &CENC_IV_SIZES)?;
        let mut bytes = [0u8; AES_BLOCK_SIZE];
        rng.try_fill_bytes(&mut bytes[..size])
            .map_err(|_| Error::RandomGeneration {
                details: "IV source failed".into(),
            })?;
        Ok(Self { bytes, len: size })
    }

    /// The IV bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Size of the IV in bytes (8 or 16)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: an `Iv` holds at least 8 bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Initial counter block for this IV
    ///
    /// An 8-byte IV fills bytes 0..8 and leaves the block counter at zero.
    pub fn counter_block(&self) -> [u8; AES_BLOCK_SIZE] {
        self.bytes
    }

    /// Advance to the IV of the next sample
    ///
    /// A 16-byte IV moves past the `blocks_consumed` counter blocks the
    /// previous sample used (modulo 2¹²⁸). An 8-byte IV is incremented by
    /// one (modulo 2⁶⁴) whatever the sample length.
    pub fn advance(&mut self, blocks_consumed: u64) {
        match self.len {
            CENC_IV_SIZE_128 => {
                let value = BigEndian::read_u128(&self.bytes);
                BigEndian::write_u128(&mut self.bytes, value.wrapping_add(blocks_consumed as u128));
            }
            CENC_IV_SIZE_64 => {
                let value = BigEndian::read_u64(&self.bytes[..CENC_IV_SIZE_64]);
                BigEndian::write_u64(&mut self.bytes[..CENC_IV_SIZE_64], value.wrapping_add(1));
            }
            _ => {}
        }
    }
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iv(")?;
        for b in self.as_slice() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl AsRef<[u8]> for Iv {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
