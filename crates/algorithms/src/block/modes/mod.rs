//! Block cipher modes of operation
//!
//! This module implements the two modes media packaging needs on top of
//! [`Aes`](super::Aes): the CENC counter mode with subsample support and
//! CBC with the padding disciplines from [`padding`](super::padding).

pub mod cbc;
pub mod ctr;
pub mod iv;
pub mod state;

// Re-exports
pub use cbc::{CbcModeCryptor, CbcOptions, ChainingMode};
pub use ctr::{CtrModeCryptor, Subsample};
pub use iv::{Iv, IvMode};
pub use state::CryptorState;
