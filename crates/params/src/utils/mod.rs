//! Constant values for cencrypt cryptographic operations

pub mod symmetric;
