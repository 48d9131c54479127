//! Constants for symmetric encryption algorithms

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;

/// AES-192 key size in bytes
pub const AES192_KEY_SIZE: usize = 24;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// Every key size accepted by the AES core
pub const AES_KEY_SIZES: [usize; 3] = [AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE];

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// Largest expanded key schedule (AES-256: 15 round keys of 16 bytes)
pub const AES_MAX_SCHEDULE_SIZE: usize = 240;

/// CENC per-sample IV size (ISO/IEC 23001-7, incremented once per sample)
pub const CENC_IV_SIZE_64: usize = 8;

/// CENC full counter-block IV size (advanced by the sample's block count)
pub const CENC_IV_SIZE_128: usize = 16;

/// IV sizes accepted in counter mode
pub const CENC_IV_SIZES: [usize; 2] = [CENC_IV_SIZE_64, CENC_IV_SIZE_128];

/// CBC initialization vector size in bytes
pub const CBC_IV_SIZE: usize = AES_BLOCK_SIZE;
