//! Cipher Block Chaining (CBC) mode
//!
//! CBC XORs each plaintext block with the previous ciphertext block (the IV
//! for the first one) before encryption, following NIST SP 800-38A. Length
//! handling is delegated to a [`PaddingScheme`]; with ciphertext stealing
//! the final partial block is folded into the last full block so output
//! length equals input length.
//!
//! A cryptor either restarts from its IV on every call or carries the chain
//! across calls so that consecutive calls form one logical message.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use api::{Cryptor, Result as CoreResult};
use common::barrier;
use params::utils::symmetric::AES_BLOCK_SIZE;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::iv::{Iv, IvMode};
use super::state::CryptorState;
use crate::block::padding::PaddingScheme;
use crate::block::Aes;
use crate::error::{to_core_result, Result};

/// Where each call's chaining value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChainingMode {
    /// Continue from the last ciphertext block of the previous call
    ChainAcrossCalls,
    /// Start every call from the initialization IV
    ResetPerCall,
}

/// Construction options for [`CbcModeCryptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CbcOptions {
    /// Padding discipline
    pub padding: PaddingScheme,
    /// Chaining behaviour between calls
    pub chaining: ChainingMode,
}

impl Default for CbcOptions {
    fn default() -> Self {
        Self {
            padding: PaddingScheme::Pkcs5,
            chaining: ChainingMode::ResetPerCall,
        }
    }
}

fn xor_block(block: &mut [u8], chain: &[u8; AES_BLOCK_SIZE]) {
    for (b, c) in block.iter_mut().zip(chain.iter()) {
        *b ^= c;
    }
}

/// CBC-encrypt whole blocks of `data`, updating `chain`
fn encrypt_blocks(cipher: &Aes, data: &mut [u8], chain: &mut [u8; AES_BLOCK_SIZE]) {
    for block in data.chunks_exact_mut(AES_BLOCK_SIZE) {
        xor_block(block, chain);
        chain.copy_from_slice(block);
        cipher.encrypt_state(chain);
        block.copy_from_slice(chain);
    }
}

/// CBC-decrypt whole blocks of `data`, updating `chain`
fn decrypt_blocks(cipher: &Aes, data: &mut [u8], chain: &mut [u8; AES_BLOCK_SIZE]) {
    let mut state = Zeroizing::new([0u8; AES_BLOCK_SIZE]);
    for block in data.chunks_exact_mut(AES_BLOCK_SIZE) {
        state.copy_from_slice(block);
        cipher.decrypt_state(&mut state);
        xor_block(&mut state[..], chain);
        chain.copy_from_slice(block);
        block.copy_from_slice(&state[..]);
    }
}

/// Ciphertext-stealing encryption of `data` (at least one block)
///
/// Full blocks are chained normally. A residual of `r` bytes is zero padded,
/// chained onto the last full ciphertext block `Cn` and encrypted to `C*`;
/// `C*` takes the place of `Cn`, whose first `r` bytes become the tail.
fn cts_encrypt(cipher: &Aes, data: &mut [u8], chain: &mut [u8; AES_BLOCK_SIZE]) {
    let residual = data.len() % AES_BLOCK_SIZE;
    let full = data.len() - residual;
    encrypt_blocks(cipher, &mut data[..full], chain);
    if residual == 0 {
        return;
    }

    let last = *chain;
    let mut stolen = [0u8; AES_BLOCK_SIZE];
    stolen[..residual].copy_from_slice(&data[full..]);
    xor_block(&mut stolen, &last);
    cipher.encrypt_state(&mut stolen);

    data[full..].copy_from_slice(&last[..residual]);
    data[full - AES_BLOCK_SIZE..full].copy_from_slice(&stolen);
    *chain = stolen;
}

/// Inverse of [`cts_encrypt`]
fn cts_decrypt(cipher: &Aes, data: &mut [u8], chain: &mut [u8; AES_BLOCK_SIZE]) {
    let residual = data.len() % AES_BLOCK_SIZE;
    if residual == 0 {
        decrypt_blocks(cipher, data, chain);
        return;
    }
    let full = data.len() - residual;
    let stolen_start = full - AES_BLOCK_SIZE;
    decrypt_blocks(cipher, &mut data[..stolen_start], chain);

    let mut stolen = [0u8; AES_BLOCK_SIZE];
    stolen.copy_from_slice(&data[stolen_start..full]);

    // D(C*) = zero-padded tail XOR Cn, and Cn's trailing bytes are exactly
    // the bytes the zero padding left untouched
    let mut tail = Zeroizing::new(stolen);
    cipher.decrypt_state(&mut tail);
    let mut last = [0u8; AES_BLOCK_SIZE];
    last[..residual].copy_from_slice(&data[full..]);
    last[residual..].copy_from_slice(&tail[residual..]);
    xor_block(&mut tail[..], &last);

    let mut plain_last = Zeroizing::new(last);
    cipher.decrypt_state(&mut plain_last);
    xor_block(&mut plain_last[..], chain);

    data[stolen_start..full].copy_from_slice(&plain_last[..]);
    data[full..].copy_from_slice(&tail[..residual]);
    *chain = stolen;
}

/// Keyed CBC stream
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct CbcStream {
    cipher: Aes,
    iv: Iv,
    chain: [u8; AES_BLOCK_SIZE],
}

impl CbcStream {
    fn new(cipher: Aes, iv: Iv) -> Self {
        let chain = iv.counter_block();
        Self { cipher, iv, chain }
    }

    fn reset(&mut self, iv: Iv) {
        self.chain = iv.counter_block();
        self.iv = iv;
    }
}

/// AES in CBC mode with a fixed padding scheme and chaining mode
#[derive(Clone)]
pub struct CbcModeCryptor {
    padding: PaddingScheme,
    chaining: ChainingMode,
    state: CryptorState<CbcStream>,
}

impl core::fmt::Debug for CbcModeCryptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CbcModeCryptor")
            .field("padding", &self.padding)
            .field("chaining", &self.chaining)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl Default for CbcModeCryptor {
    fn default() -> Self {
        Self::from_options(CbcOptions::default())
    }
}

impl CbcModeCryptor {
    /// Create an uninitialized cryptor
    pub fn new(padding: PaddingScheme, chaining: ChainingMode) -> Self {
        Self {
            padding,
            chaining,
            state: CryptorState::Uninitialized,
        }
    }

    /// Create an uninitialized cryptor that restarts from its IV on every call
    pub fn with_padding(padding: PaddingScheme) -> Self {
        Self::new(padding, ChainingMode::ResetPerCall)
    }

    /// Create an uninitialized cryptor from `options`
    pub fn from_options(options: CbcOptions) -> Self {
        Self::new(options.padding, options.chaining)
    }

    /// Set the key and a 16-byte IV, resetting the chain
    pub fn initialize_with_iv(&mut self, key: &[u8], iv: &[u8]) -> Result<()> {
        let cipher = Aes::new(key).map_err(|err| {
            tracing::debug!(?err, key_len = key.len(), "rejected CBC key");
            err
        })?;
        let iv = Iv::new(iv, IvMode::Cbc).map_err(|err| {
            tracing::debug!(?err, "rejected CBC IV");
            err
        })?;
        tracing::debug!(
            key_bits = cipher.key_size() * 8,
            padding = self.padding.name(),
            chaining = ?self.chaining,
            "initialized AES-CBC cryptor"
        );
        self.state = CryptorState::Ready(CbcStream::new(cipher, iv));
        Ok(())
    }

    /// Encrypt `plaintext` into a new buffer
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.padding.padded_len(plaintext.len()));
        buffer.extend_from_slice(plaintext);
        self.encrypt_in_place(&mut buffer)?;
        Ok(buffer)
    }

    /// Decrypt `ciphertext` into a new buffer
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = ciphertext.to_vec();
        self.decrypt_in_place(&mut buffer)?;
        Ok(buffer)
    }

    /// Encrypt `buffer` in place; PKCS#5 grows it by 1 to 16 bytes
    pub fn encrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> Result<()> {
        let (padding, chaining) = (self.padding, self.chaining);
        let stream = self.state.ready_mut("CBC encrypt")?;
        padding
            .check_encrypt_len(buffer.len(), chaining)
            .map_err(|err| {
                tracing::debug!(?err, padding = padding.name(), "rejected CBC plaintext");
                err
            })?;

        let mut chain = match chaining {
            ChainingMode::ChainAcrossCalls => stream.chain,
            ChainingMode::ResetPerCall => stream.iv.counter_block(),
        };

        barrier::compiler_fence_seq_cst();
        match padding {
            PaddingScheme::NoPadding => {
                // Chained calls leave a trailing partial block in the clear
                let full = buffer.len() - buffer.len() % AES_BLOCK_SIZE;
                encrypt_blocks(&stream.cipher, &mut buffer[..full], &mut chain);
            }
            PaddingScheme::Pkcs5 => {
                padding.pad(buffer);
                encrypt_blocks(&stream.cipher, buffer, &mut chain);
            }
            PaddingScheme::Cts => {
                if buffer.len() >= AES_BLOCK_SIZE {
                    cts_encrypt(&stream.cipher, buffer, &mut chain);
                }
            }
        }
        barrier::compiler_fence_seq_cst();

        tracing::trace!(len = buffer.len(), padding = padding.name(), "CBC encrypt");
        if chaining == ChainingMode::ChainAcrossCalls {
            stream.chain = chain;
        }
        Ok(())
    }

    /// Decrypt `buffer` in place; PKCS#5 shrinks it by the padding
    ///
    /// After a padding error the chain is unchanged but the buffer contents
    /// are unspecified.
    pub fn decrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> Result<()> {
        let (padding, chaining) = (self.padding, self.chaining);
        let stream = self.state.ready_mut("CBC decrypt")?;
        padding
            .check_decrypt_len(buffer.len(), chaining)
            .map_err(|err| {
                tracing::debug!(?err, padding = padding.name(), "rejected CBC ciphertext");
                err
            })?;

        let mut chain = match chaining {
            ChainingMode::ChainAcrossCalls => stream.chain,
            ChainingMode::ResetPerCall => stream.iv.counter_block(),
        };

        barrier::compiler_fence_seq_cst();
        match padding {
            PaddingScheme::NoPadding => {
                let full = buffer.len() - buffer.len() % AES_BLOCK_SIZE;
                decrypt_blocks(&stream.cipher, &mut buffer[..full], &mut chain);
            }
            PaddingScheme::Pkcs5 => {
                decrypt_blocks(&stream.cipher, buffer, &mut chain);
                padding.unpad(buffer).map_err(|err| {
                    tracing::warn!(?err, "CBC PKCS#5 padding check failed");
                    err
                })?;
            }
            PaddingScheme::Cts => {
                if buffer.len() >= AES_BLOCK_SIZE {
                    cts_decrypt(&stream.cipher, buffer, &mut chain);
                }
            }
        }
        barrier::compiler_fence_seq_cst();

        tracing::trace!(len = buffer.len(), padding = padding.name(), "CBC decrypt");
        if chaining == ChainingMode::ChainAcrossCalls {
            stream.chain = chain;
        }
        Ok(())
    }

    /// Replace the IV, keeping the key, and restart the chain
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        let stream = self.state.ready_mut("CBC set_iv")?;
        stream.reset(Iv::new(iv, IvMode::Cbc)?);
        Ok(())
    }

    /// The IV the next call chains from; empty before initialization
    ///
    /// In `ResetPerCall` mode this is always the initialization IV.
    pub fn iv(&self) -> &[u8] {
        match (self.state.stream(), self.chaining) {
            (Some(stream), ChainingMode::ChainAcrossCalls) => &stream.chain[..],
            (Some(stream), ChainingMode::ResetPerCall) => stream.iv.as_slice(),
            (None, _) => &[],
        }
    }

    /// Padding scheme fixed at construction
    pub fn padding(&self) -> PaddingScheme {
        self.padding
    }

    /// Chaining mode fixed at construction
    pub fn chaining(&self) -> ChainingMode {
        self.chaining
    }

    /// Whether a key and IV have been set
    pub fn is_initialized(&self) -> bool {
        self.state.is_ready()
    }

    /// "AES-128-CBC", "AES-192-CBC" or "AES-256-CBC"
    pub fn name(&self) -> &'static str {
        match self.state.stream().map(|s| s.cipher.key_size()) {
            Some(16) => "AES-128-CBC",
            Some(24) => "AES-192-CBC",
            Some(32) => "AES-256-CBC",
            _ => "AES-CBC",
        }
    }
}

impl Cryptor for CbcModeCryptor {
    fn name(&self) -> &'static str {
        CbcModeCryptor::name(self)
    }

    fn initialize_with_iv(&mut self, key: &[u8], iv: &[u8]) -> CoreResult<()> {
        to_core_result(
            CbcModeCryptor::initialize_with_iv(self, key, iv),
            "CbcModeCryptor::initialize_with_iv",
        )
    }

    fn set_iv(&mut self, iv: &[u8]) -> CoreResult<()> {
        to_core_result(CbcModeCryptor::set_iv(self, iv), "CbcModeCryptor::set_iv")
    }

    fn iv(&self) -> &[u8] {
        CbcModeCryptor::iv(self)
    }

    fn is_initialized(&self) -> bool {
        CbcModeCryptor::is_initialized(self)
    }

    fn encrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> CoreResult<()> {
        to_core_result(
            CbcModeCryptor::encrypt_in_place(self, buffer),
            "CbcModeCryptor::encrypt",
        )
    }

    fn decrypt_in_place(&mut self, buffer: &mut Vec<u8>) -> CoreResult<()> {
        to_core_result(
            CbcModeCryptor::decrypt_in_place(self, buffer),
            "CbcModeCryptor::decrypt",
        )
    }
}
