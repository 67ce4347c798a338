//! Error types for transaction serialization.

use monero_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while serializing or hashing a transaction.
#[derive(Debug, Error)]
pub enum TxError {
    /// Two arrays that must run in parallel have different lengths.
    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    /// The bytes do not describe a transaction prefix.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Unknown RingCT signature type.
    #[error("Unknown RingCT type: {0}")]
    UnknownRctType(u8),

    /// A primitive failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// JSON encoding or decoding failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
