//! Shared fixtures for the cencrypt integration tests and benchmarks

use cencrypt::prelude::*;

/// Decode a hex fixture, panicking on malformed input
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("malformed hex fixture")
}

/// A CTR cryptor keyed from hex fixtures
pub fn ctr_cryptor(key: &str, iv: &str) -> CtrModeCryptor {
    let mut cryptor = CtrModeCryptor::new();
    cryptor
        .initialize_with_iv(&unhex(key), &unhex(iv))
        .expect("fixture key and IV are valid");
    cryptor
}

/// A CBC cryptor keyed from hex fixtures
pub fn cbc_cryptor(options: CbcOptions, key: &str, iv: &str) -> CbcModeCryptor {
    let mut cryptor = CbcModeCryptor::from_options(options);
    cryptor
        .initialize_with_iv(&unhex(key), &unhex(iv))
        .expect("fixture key and IV are valid");
    cryptor
}
