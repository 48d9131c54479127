//! CENC counter (CTR) mode
//!
//! Counter mode as profiled by ISO/IEC 23001-7: the keystream is the AES
//! encryption of successive counter blocks, and only the low 64 bits of the
//! counter block (the block counter) are incremented between blocks. The
//! keystream position survives across calls, so a sample may be fed in
//! arbitrary pieces (e.g. the protected ranges of its subsamples) and still
//! produce the same bytes as a single call.
//!
//! After a sample, [`CtrModeCryptor::update_iv`] derives the IV for the next
//! one.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use api::{Cryptor, Result as CoreResult};
use common::barrier;
use params::utils::symmetric::AES_BLOCK_SIZE;
use rand::{CryptoRng, RngCore};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::iv::{increment_block_counter, Iv, IvMode};
use super::state::CryptorState;
use crate::block::Aes;
use crate::error::{to_core_result, validate, Error, Result};

/// One entry of a CENC subsample map
///
/// `clear_bytes` are left untouched, then `protected_bytes` are run
/// through the keystream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Subsample {
    /// Bytes left in the clear
    pub clear_bytes: usize,
    /// Bytes encrypted or decrypted
    pub protected_bytes: usize,
}

impl Subsample {
    /// Create a subsample entry
    pub const fn new(clear_bytes: usize, protected_bytes: usize) -> Self {
        Self {
            clear_bytes,
            protected_bytes,
        }
    }
}

/// Keyed counter-mode stream
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct CtrStream {
    cipher: Aes,
    iv: Iv,
    counter: [u8; AES_BLOCK_SIZE],
    keystream: [u8; AES_BLOCK_SIZE],
    block_offset: usize,
    blocks_consumed: u64,
}

impl CtrStream {
    fn new(cipher: Aes, iv: Iv) -> Self {
        let counter = iv.counter_block();
        Self {
            cipher,
            iv,
            counter,
            keystream: [0u8; AES_BLOCK_SIZE],
            block_offset: 0,
            blocks_consumed: 0,
        }
    }

    fn reset(&mut self, iv: Iv) {
        self.counter = iv.counter_block();
        self.iv = iv;
        self.keystream.zeroize();
        self.block_offset = 0;
        self.blocks_consumed = 0;
    }

    fn next_keystream_block(&mut self) {
        self.keystream = self.counter;
        self.cipher.encrypt_state(&mut self.keystream);
        increment_block_counter(&mut self.counter);
        self.blocks_consumed = self.blocks_consumed.wrapping_add(1);
    }

    fn apply(&mut self, data: &mut [u8]) {
        barrier::with_barriers(|| {
            for byte in data.iter_mut() {
                if self.block_offset == 0 {
                    self.next_keystream_block();
                }
                *byte ^= self.keystream[self.block_offset];
                self.block_offset = (self.block_offset + 1) % AES_BLOCK_SIZE;
            }
        })
    }
}

/// AES in CENC counter mode
///
/// Encryption and decryption are the same operation. Calls on one instance
/// continue a single keystream until the IV is replaced or advanced.
#[derive(Clone, Default)]
pub struct CtrModeCryptor {
    state: CryptorState<CtrStream>,
}

impl core::fmt::Debug for CtrModeCryptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CtrModeCryptor")
            .field("initialized", &self.is_initialized())
            .field("iv_len", &self.iv().len())
            .field("block_offset", &self.block_offset())
            .finish()
    }
}

impl CtrModeCryptor {
    /// Create an uninitialized cryptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key and an 8 or 16-byte IV
    ///
    /// Replaces any previous key, IV and keystream position. On error the
    /// cryptor is left as it was.
    pub fn initialize_with_iv(&mut self, key: &[u8], iv: &[u8]) -> Result<()> {
        let cipher = Aes::new(key).map_err(|err| {
            tracing::debug!(?err, key_len = key.len(), "rejected CTR key");
            err
        })?;
        let iv = Iv::new(iv, IvMode::Ctr).map_err(|err| {
            tracing::debug!(?err, "rejected CTR IV");
            err
        })?;
        tracing::debug!(
            key_bits = cipher.key_size() * 8,
            iv_len = iv.len(),
            "initialized AES-CTR cryptor"
        );
        self.state = CryptorState::Ready(CtrStream::new(cipher, iv));
        Ok(())
    }

    /// Set the key and draw an `iv_size`-byte IV from the operating system
    #[cfg(feature = "std")]
    pub fn initialize_with_random_iv(&mut self, key: &[u8], iv_size: usize) -> Result<()> {
        self.initialize_with_random_iv_from(&mut rand::rngs::OsRng, key, iv_size)
    }

    /// Set the key and draw an `iv_size`-byte IV from `rng`
    pub fn initialize_with_random_iv_from<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
        key: &[u8],
        iv_size: usize,
    ) -> Result<()> {
        validate::key_size(key.len())?;
        let iv = Iv::random(rng, iv_size).map_err(|err| {
            tracing::debug!(?err, "random CTR IV generation failed");
            err
        })?;
        self.initialize_with_iv(key, iv.as_slice())
    }

    /// Encrypt `plaintext` into a new buffer
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut out = plaintext.to_vec();
        self.process(&mut out)?;
        Ok(out)
    }

    /// Decrypt `ciphertext` into a new buffer
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt(ciphertext)
    }

    /// XOR `input` with the keystream into `output`
    ///
    /// `output` must be exactly as long as `input`.
    pub fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        validate::length("CTR output buffer", output.len(), input.len())?;
        let stream = self.state.ready_mut("CTR apply_keystream")?;
        output.copy_from_slice(input);
        stream.apply(output);
        Ok(())
    }

    /// Encrypt or decrypt `data` in place
    pub fn process(&mut self, data: &mut [u8]) -> Result<()> {
        let stream = self.state.ready_mut("CTR process")?;
        tracing::trace!(len = data.len(), block_offset = stream.block_offset, "CTR process");
        stream.apply(data);
        Ok(())
    }

    /// Encrypt or decrypt the protected ranges of a CENC sample in place
    ///
    /// The keystream runs continuously through the protected ranges and
    /// skips the clear ones. The layout must cover `sample` exactly, else
    /// nothing is touched.
    pub fn process_subsamples(&mut self, sample: &mut [u8], subsamples: &[Subsample]) -> Result<()> {
        let stream = self.state.ready_mut("CTR process_subsamples")?;

        let covered = subsamples.iter().try_fold(0usize, |acc, s| {
            acc.checked_add(s.clear_bytes)?.checked_add(s.protected_bytes)
        });
        match covered {
            Some(total) if total == sample.len() => {}
            Some(total) => {
                tracing::debug!(total, sample_len = sample.len(), "subsample layout mismatch");
                return Err(Error::Length {
                    context: "CENC subsample layout",
                    expected: sample.len(),
                    actual: total,
                });
            }
            None => return Err(Error::param("subsamples", "subsample sizes overflow")),
        }

        let mut pos = 0;
        for s in subsamples {
            pos += s.clear_bytes;
            stream.apply(&mut sample[pos..pos + s.protected_bytes]);
            pos += s.protected_bytes;
        }
        Ok(())
    }

    /// Replace the IV, keeping the key, and restart the keystream
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        let stream = self.state.ready_mut("CTR set_iv")?;
        let iv = Iv::new(iv, IvMode::Ctr)?;
        stream.reset(iv);
        Ok(())
    }

    /// Move to the IV of the next sample
    ///
    /// A 16-byte IV advances by the number of counter blocks touched since
    /// the last IV reset (a partial trailing block counts); an 8-byte IV
    /// advances by one. The keystream restarts from the new IV.
    pub fn update_iv(&mut self) -> Result<()> {
        let stream = self.state.ready_mut("CTR update_iv")?;
        let mut iv = stream.iv.clone();
        iv.advance(stream.blocks_consumed);
        tracing::trace!(
            blocks = stream.blocks_consumed,
            iv_len = iv.len(),
            "advanced CTR IV"
        );
        stream.reset(iv);
        Ok(())
    }

    /// The current IV; empty before initialization
    pub fn iv(&self) -> &[u8] {
        self.state.stream().map(|s| s.iv.as_slice()).unwrap_or(&[])
    }

    /// Position inside the current keystream block, in `[0, 16)`
    pub fn block_offset(&self) -> usize {
        self.state.stream().map_or(0, |s| s.block_offset)
    }

    /// Counter blocks touched since the last IV reset
    pub fn blocks_consumed(&self) -> u64 {
        self.state.stream().map_or(0, |s| s.blocks_consumed)
    }

    /// Whether a key and IV have been set
    pub fn is_initialized(&self) -> bool {
        self.state.is_ready()
    }

    /// "AES-128-CTR", "AES-192-CTR" or "AES-256-CTR"
    pub fn name(&self) -> &'static str {
        match self.state.stream().map(|s| s.cipher.key_size()) {
            Some(16) => "AES-128-CTR",
            Some(24) => "AES-192-CTR",
            Some(32) => "AES-256-CTR",
            _ => "AES-CTR",
        }
    }
}

impl Cryptor for CtrModeCryptor {
    fn name(&self) -> &'static str {
        CtrModeCryptor::name(self)
    }

    fn initialize_with_iv(&mut self, key: &[u8], iv: &[u8]) -> CoreResult<()> {
        to_core_result(
            CtrModeCryptor::initialize_with_iv(self, key, iv),
            "CtrModeCryptor::initialize_with_iv",
        )
    }

    fn set_iv(&mut self, iv: &[u8]) -> CoreResult<()> {
        to_core_result(CtrModeCryptor::set_iv(self, iv), "CtrModeCryptor::set_iv")
    }

    fn iv(&self) -> &[u8] {
        CtrModeCryptor::iv(self)
    }

    fn is_initialized(&self) -> bool {
        CtrModeCryptor::is_initialized(self)
    }

    fn encrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> CoreResult<()> {
        to_core_result(self.process(buffer), "CtrModeCryptor::encrypt")
    }

    fn decrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> CoreResult<()> {
        to_core_result(self.process(buffer), "CtrModeCryptor::decrypt")
    }
}
