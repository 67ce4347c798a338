//! Error types for address operations.

use thiserror::Error;

/// Errors that can occur during address operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The text is not valid block base58, or a block has an impossible size.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A base58 block decodes to a value wider than its byte count.
    #[error("Base58 block overflow")]
    BlockOverflow,

    /// The address has an invalid length.
    #[error("Invalid address length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The leading byte is not a network byte of the configured network.
    #[error("Invalid network byte: {0:#04x}")]
    InvalidNetworkByte(u8),

    /// The trailing four bytes do not match the payload hash.
    #[error("Checksum mismatch")]
    ChecksumMismatch,

    /// The address belongs to a different network than expected.
    #[error("Network mismatch: expected {expected:?}, got {actual:?}")]
    NetworkMismatch {
        expected: crate::Network,
        actual: crate::Network,
    },
}
