//! Error handling for Boolean FHE operations
//!
//! Provides a stable `FheError` type shared by the whole crate. Recoverable
//! conditions (bad parameters, missing evaluation key) are distinct variants
//! so callers can match on them instead of parsing messages.

use std::fmt;

/// Boolean FHE operation error
#[derive(Debug)]
pub enum FheError {
    /// A parameter set failed validation
    InvalidParams(String),
    /// An operation required the evaluation key before it was generated or loaded
    MissingEvalKey,
    /// A ciphertext or key does not belong to this context's parameters
    KeyMismatch(String),
    /// Both gate inputs carry the same ciphertext value
    AliasedGateInputs,
    /// Underlying I/O failure
    Io(std::io::Error),
    /// Serialization failure
    Ser(bincode::Error),
}

impl fmt::Display for FheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams(msg) => write!(f, "invalid parameters: {}", msg),
            Self::MissingEvalKey => {
                write!(f, "evaluation key not set: generate or load it first")
            }
            Self::KeyMismatch(msg) => write!(f, "mismatched key or ciphertext: {}", msg),
            Self::AliasedGateInputs => {
                write!(f, "gate inputs must be independent ciphertexts")
            }
            Self::Io(err) => write!(f, "i/o error: {}", err),
            Self::Ser(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for FheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Ser(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FheError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<bincode::Error> for FheError {
    fn from(err: bincode::Error) -> Self {
        Self::Ser(err)
    }
}

/// Result type for Boolean FHE operations
pub type Result<T> = std::result::Result<T, FheError>;

/// Create an `InvalidParams` error with format string support
macro_rules! invalid_params {
    ($($arg:tt)*) => {
        $crate::error::FheError::InvalidParams(format!($($arg)*))
    };
}

pub(crate) use invalid_params;
