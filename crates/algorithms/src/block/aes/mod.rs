//! AES block cipher implementation
//!
//! This module implements the Advanced Encryption Standard (AES) block cipher
//! as specified in FIPS 197, for 128, 192 and 256-bit keys selected at
//! runtime from the key length.
//!
//! ## Constant-Time Guarantees
//!
//! This implementation mitigates timing side-channel attacks by:
//! - Using branchless arithmetic for GF(2^8) operations
//! - Using bitsliced S-box implementations instead of table lookups
//! - Ensuring consistent memory access patterns
//!
//! The expanded key schedule is held in a [`SecretBuffer`] and wiped when the
//! cipher is dropped or re-keyed.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
use core::fmt;

use common::barrier;
use common::security::{SecretBuffer, ZeroizeGuard};
use params::utils::symmetric::{
    AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE, AES_MAX_SCHEDULE_SIZE,
};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::BlockCipher;
use crate::error::{validate, Error, Result};

/// Round constants for AES key expansion
const RCON: [u32; 11] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000,
    0x40000000, 0x80000000, 0x1b000000, 0x36000000,
];

/// Multiply two bytes in GF(2⁸) with AES's reduction poly x⁸ + x⁴ + x³ + x + 1
#[inline(always)]
fn gf_mul(a: u8, b: u8) -> u8 {
    let mut p = 0u8;
    let mut a = a;
    let mut b = b;
    for _ in 0..8 {
        // mask = 0xFF if b&1==1 else 0x00
        let mask = (b & 1).wrapping_neg();
        p ^= a & mask;
        let hi = a & 0x80;
        a <<= 1;
        a ^= ((hi != 0) as u8) * 0x1B;
        b >>= 1;
    }
    p
}

/// Raise to the 254th power (b⁻¹ in GF(2⁸)) in constant time
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    // always do the full exponentiation, even for x==0
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);
    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    y = gf_mul(y, x2);

    let mask = ((x != 0) as u8).wrapping_neg();
    y & mask
}

/// AES forward S-box: inv(x) ⊕ ROTL(inv(x),1–4) ⊕ 0x63
#[inline(always)]
fn bitsliced_sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

/// AES inverse S-box: undo affine then invert
#[inline(always)]
fn bitsliced_inv_sbox(x: u8) -> u8 {
    // A⁻¹ is convolution by t¹ + t³ + t⁶ mod (t⁸+1)
    let y = x ^ 0x63;
    gf_inv(y.rotate_left(1) ^ y.rotate_left(3) ^ y.rotate_left(6))
}

/// Substitutes each byte in a word using the bitsliced S-box
#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let b = word.to_be_bytes();
    u32::from_be_bytes([
        bitsliced_sbox(b[0]),
        bitsliced_sbox(b[1]),
        bitsliced_sbox(b[2]),
        bitsliced_sbox(b[3]),
    ])
}

/// Multiply by 2 in GF(2^8)
#[inline(always)]
fn mul2(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7) * 0x1B)
}

#[inline(always)]
fn mul9(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ b
}
#[inline(always)]
fn mul11(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(b) ^ b
}
#[inline(always)]
fn mul13(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(mul2(b)) ^ b
}
#[inline(always)]
fn mul14(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(mul2(b)) ^ mul2(b)
}

fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = bitsliced_sbox(*byte);
    }
    barrier::compiler_fence_seq_cst();
}

fn inv_sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = bitsliced_inv_sbox(*byte);
    }
    barrier::compiler_fence_seq_cst();
}

/// ShiftRows on the column-major state (index = 4 * column + row)
fn shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = t[4 * ((c + r) % 4) + r];
        }
    }
}

fn inv_shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * ((c + r) % 4) + r] = t[4 * c + r];
        }
    }
}

fn mix_columns(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = mul2(s0) ^ mul2(s1) ^ s1 ^ s2 ^ s3;
        col[1] = s0 ^ mul2(s1) ^ mul2(s2) ^ s2 ^ s3;
        col[2] = s0 ^ s1 ^ mul2(s2) ^ mul2(s3) ^ s3;
        col[3] = mul2(s0) ^ s0 ^ s1 ^ s2 ^ mul2(s3);
    }
}

fn inv_mix_columns(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = mul14(s0) ^ mul11(s1) ^ mul13(s2) ^ mul9(s3);
        col[1] = mul9(s0) ^ mul14(s1) ^ mul11(s2) ^ mul13(s3);
        col[2] = mul13(s0) ^ mul9(s1) ^ mul14(s2) ^ mul11(s3);
        col[3] = mul11(s0) ^ mul13(s1) ^ mul9(s2) ^ mul14(s3);
    }
}

#[inline(always)]
fn add_round_key(state: &mut [u8; 16], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key) {
        *s ^= k;
    }
}

/// AES block cipher keyed with a 128, 192 or 256-bit key
///
/// The key size, and with it the round count, is chosen from the length of
/// the key handed to [`Aes::new`]. The raw key is not retained.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes {
    round_keys: SecretBuffer<AES_MAX_SCHEDULE_SIZE>,
    key_size: usize,
    rounds: usize,
}

impl fmt::Debug for Aes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes")
            .field("key_size", &self.key_size)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

impl Aes {
    /// Expand `key` into a new cipher
    ///
    /// Fails with [`Error::KeySize`] unless the key is 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        validate::key_size(key.len())?;
        let mut aes = Self {
            round_keys: SecretBuffer::zeroed(),
            key_size: 0,
            rounds: 0,
        };
        aes.expand_key(key);
        Ok(aes)
    }

    /// Replace the key, wiping the previous schedule
    ///
    /// On error the existing key is kept.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        validate::key_size(key.len())?;
        self.round_keys.zeroize();
        self.expand_key(key);
        Ok(())
    }

    /// Size in bytes of the loaded key
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Number of rounds (10, 12 or 14)
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// "AES-128", "AES-192" or "AES-256"
    pub fn name(&self) -> &'static str {
        match self.key_size {
            AES128_KEY_SIZE => "AES-128",
            AES192_KEY_SIZE => "AES-192",
            _ => "AES-256",
        }
    }

    /// Generate a random key of `size` bytes
    pub fn generate_key<R: RngCore + CryptoRng>(
        rng: &mut R,
        size: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        validate::key_size(size)?;
        let mut key = Zeroizing::new(vec![0u8; size]);
        rng.try_fill_bytes(&mut key)
            .map_err(|_| Error::RandomGeneration {
                details: "key source failed".into(),
            })?;
        Ok(key)
    }

    /// Key expansion for Nk = key.len() / 4, FIPS 197 section 5.2
    fn expand_key(&mut self, key: &[u8]) {
        let nk = key.len() / 4;
        let rounds = nk + 6;
        let total_words = 4 * (rounds + 1);

        let mut scratch = [0u32; AES_MAX_SCHEDULE_SIZE / 4];
        let mut words = ZeroizeGuard::new(&mut scratch);
        for (i, chunk) in key.chunks_exact(4).enumerate() {
            words[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        for i in nk..total_words {
            let mut temp = words[i - 1];
            if i % nk == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ RCON[i / nk];
            } else if nk > 6 && i % nk == 4 {
                temp = sub_word(temp);
            }
            words[i] = words[i - nk] ^ temp;
        }

        let schedule = self.round_keys.as_mut_slice();
        for (i, word) in words[..total_words].iter().enumerate() {
            schedule[i * 4..(i + 1) * 4].copy_from_slice(&word.to_be_bytes());
        }

        self.key_size = key.len();
        self.rounds = rounds;
    }

    #[inline(always)]
    fn round_key(&self, round: usize) -> &[u8] {
        &self.round_keys.as_slice()[round * 16..(round + 1) * 16]
    }

    /// Encrypt one block held in a fixed-size array
    pub(crate) fn encrypt_state(&self, state: &mut [u8; AES_BLOCK_SIZE]) {
        add_round_key(state, self.round_key(0));
        for round in 1..self.rounds {
            sub_bytes(state);
            shift_rows(state);
            mix_columns(state);
            add_round_key(state, self.round_key(round));
        }
        sub_bytes(state);
        shift_rows(state);
        add_round_key(state, self.round_key(self.rounds));
    }

    /// Decrypt one block held in a fixed-size array
    pub(crate) fn decrypt_state(&self, state: &mut [u8; AES_BLOCK_SIZE]) {
        add_round_key(state, self.round_key(self.rounds));
        for round in (1..self.rounds).rev() {
            inv_shift_rows(state);
            inv_sub_bytes(state);
            add_round_key(state, self.round_key(round));
            inv_mix_columns(state);
        }
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, self.round_key(0));
    }
}

impl BlockCipher for Aes {
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn name(&self) -> &'static str {
        Aes::name(self)
    }

    fn key_size(&self) -> usize {
        self.key_size
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;
        let mut state = Zeroizing::new([0u8; AES_BLOCK_SIZE]);
        state.copy_from_slice(block);
        self.encrypt_state(&mut state);
        block.copy_from_slice(&*state);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;
        let mut state = Zeroizing::new([0u8; AES_BLOCK_SIZE]);
        state.copy_from_slice(block);
        self.decrypt_state(&mut state);
        block.copy_from_slice(&*state);
        Ok(())
    }
}
