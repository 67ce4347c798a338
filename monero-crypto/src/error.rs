//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// A byte sequence is not a valid encoding (varint, hex, ...).
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A value has the wrong length.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The bytes do not decompress to a curve point.
    #[error("Point not on curve")]
    InvalidPoint,

    /// The bytes are not a canonical scalar.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// Two collections that must line up have different sizes.
    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    /// A hex string could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::InvalidHex(err.to_string())
    }
}
