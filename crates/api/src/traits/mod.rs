//! Traits implemented by the cencrypt cryptors

pub mod cryptor;

pub use cryptor::Cryptor;
