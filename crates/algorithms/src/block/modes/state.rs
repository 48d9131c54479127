//! Lifecycle state shared by the cryptors

use crate::error::{Error, Result};

/// Either no key and IV have been set, or a keyed stream is ready
///
/// `initialize_*` on a cryptor is the only way into `Ready`; every crypt
/// operation goes through [`CryptorState::ready_mut`] and fails with
/// [`Error::State`] before that.
#[derive(Debug, Clone)]
pub enum CryptorState<S> {
    /// No key or IV yet
    Uninitialized,
    /// Keyed stream
    Ready(S),
}

impl<S> Default for CryptorState<S> {
    fn default() -> Self {
        CryptorState::Uninitialized
    }
}

impl<S> CryptorState<S> {
    /// Whether a keyed stream is present
    pub fn is_ready(&self) -> bool {
        matches!(self, CryptorState::Ready(_))
    }

    /// The stream, if ready
    pub fn stream(&self) -> Option<&S> {
        match self {
            CryptorState::Ready(stream) => Some(stream),
            CryptorState::Uninitialized => None,
        }
    }

    /// The stream for `operation`, or a state error
    pub fn ready_mut(&mut self, operation: &'static str) -> Result<&mut S> {
        match self {
            CryptorState::Ready(stream) => Ok(stream),
            CryptorState::Uninitialized => {
                tracing::debug!(operation, "cryptor used before initialization");
                Err(Error::State { operation })
            }
        }
    }
}
