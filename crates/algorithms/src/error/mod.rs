//! Error handling for the AES engine and its modes

#[cfg(not(feature = "std"))]
use alloc::{borrow::Cow, format, string::ToString};
#[cfg(feature = "std")]
use std::borrow::Cow;

use core::fmt;

use api::{Error as CoreError, Result as CoreResult};

/// The error type for AES primitives and cryptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Key is not 16, 24 or 32 bytes
    KeySize {
        /// Length of the rejected key
        actual: usize,
    },

    /// IV size is not accepted by the mode
    IvSize {
        /// Mode the IV was offered to
        mode: &'static str,
        /// Length of the rejected IV
        actual: usize,
    },

    /// Padding could not be removed after decryption
    Padding {
        /// Padding scheme in use
        scheme: &'static str,
        /// What was wrong with it
        details: &'static str,
    },

    /// Operation requires a key and IV that have not been set
    State {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// The random source failed
    RandomGeneration {
        /// Error reported by the source
        details: Cow<'static, str>,
    },

    /// Fallback for other errors
    Other(&'static str),
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<R: Into<Cow<'static, str>>>(name: &'static str, reason: R) -> Self {
        Error::Parameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for AES primitives and cryptors
pub type Result<T> = core::result::Result<T, Error>;

/// Result type for cipher operations
pub type CipherResult<T> = Result<T>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::KeySize { actual } => {
                write!(f, "Invalid AES key size {} (expected 16, 24 or 32)", actual)
            }
            Error::IvSize { mode, actual } => {
                write!(f, "Invalid IV size {} for {}", actual, mode)
            }
            Error::Padding { scheme, details } => {
                write!(f, "{} padding error: {}", scheme, details)
            }
            Error::State { operation } => {
                write!(f, "{} called before a key and IV were set", operation)
            }
            Error::RandomGeneration { details } => {
                write!(f, "Random generation failed: {}", details)
            }
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: name,
                message: reason.into_owned(),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::KeySize { actual } => CoreError::InvalidKey {
                context: "AES key",
                message: format!("unsupported key size {}", actual),
            },
            Error::IvSize { mode, actual } => CoreError::InvalidIv {
                context: mode,
                message: format!("unsupported IV size {}", actual),
            },
            Error::Padding { scheme, details } => CoreError::DecryptionFailed {
                context: scheme,
                message: details.to_string(),
            },
            Error::State { operation } => CoreError::NotInitialized { context: operation },
            Error::RandomGeneration { details } => CoreError::RandomGenerationError {
                context: "IV generation",
                message: details.into_owned(),
            },
            Error::Other(msg) => CoreError::Other {
                context: "algorithms",
                message: msg.to_string(),
            },
        }
    }
}

/// Convert a primitives result to a core result with additional context
#[inline]
pub fn to_core_result<T>(r: Result<T>, ctx: &'static str) -> CoreResult<T> {
    r.map_err(|e| CoreError::from(e).with_context(ctx))
}

// Re-export core error handling traits for convenience
pub use api::error::ResultExt;

// Include the validation submodule
pub mod validate;
