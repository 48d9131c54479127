//! Error type definitions for cryptor operations

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Primary error type for cryptor operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key has an unsupported size or could not be expanded
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// IV has an unsupported size for the mode in use
    InvalidIv {
        context: &'static str,
        message: String,
    },

    /// Input length does not satisfy the mode or padding scheme
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Ciphertext is structurally invalid
    InvalidCiphertext {
        context: &'static str,
        message: String,
    },

    /// Decryption produced malformed output (e.g. bad PKCS#5 padding)
    DecryptionFailed {
        context: &'static str,
        message: String,
    },

    /// An operation was attempted before a key and IV were set
    NotInitialized {
        context: &'static str,
    },

    /// Random generation error
    RandomGenerationError {
        context: &'static str,
        message: String,
    },

    /// Other error
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for cryptor operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its details
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::InvalidIv { message, .. } => Self::InvalidIv { context, message },
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::InvalidCiphertext { message, .. } => Self::InvalidCiphertext { context, message },
            Self::DecryptionFailed { message, .. } => Self::DecryptionFailed { context, message },
            Self::NotInitialized { .. } => Self::NotInitialized { context },
            Self::RandomGenerationError { message, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }

    /// Replace the message of an existing error
    ///
    /// Variants without a message field are returned unchanged.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidKey { context, .. } => Self::InvalidKey { context, message },
            Self::InvalidIv { context, .. } => Self::InvalidIv { context, message },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::InvalidCiphertext { context, .. } => Self::InvalidCiphertext { context, message },
            Self::DecryptionFailed { context, .. } => Self::DecryptionFailed { context, message },
            Self::RandomGenerationError { context, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::Other { context, .. } => Self::Other { context, message },
            other @ (Self::InvalidLength { .. } | Self::NotInitialized { .. }) => other,
        }
    }

    /// The static context attached to this error
    pub fn context(&self) -> &'static str {
        match self {
            Self::InvalidKey { context, .. }
            | Self::InvalidIv { context, .. }
            | Self::InvalidLength { context, .. }
            | Self::InvalidParameter { context, .. }
            | Self::InvalidCiphertext { context, .. }
            | Self::DecryptionFailed { context, .. }
            | Self::NotInitialized { context }
            | Self::RandomGenerationError { context, .. }
            | Self::Other { context, .. } => context,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidKey { context, message } => {
                write!(f, "Invalid key: {}: {}", context, message)
            }
            Self::InvalidIv { context, message } => {
                write!(f, "Invalid IV: {}: {}", context, message)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::InvalidParameter { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            Self::InvalidCiphertext { context, message } => {
                write!(f, "Invalid ciphertext: {}: {}", context, message)
            }
            Self::DecryptionFailed { context, message } => {
                write!(f, "Decryption failed: {}: {}", context, message)
            }
            Self::NotInitialized { context } => {
                write!(f, "{}: cryptor is not initialized", context)
            }
            Self::RandomGenerationError { context, message } => {
                write!(f, "Random generation error: {}: {}", context, message)
            }
            Self::Other { context, message } => {
                write!(f, "{}: {}", context, message)
            }
        }
    }
}
