//! Error types for key and mnemonic operations.

use monero_address::AddressError;
use monero_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur during key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    /// A curve or hash primitive failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Address encoding failed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Mnemonic conversion failed.
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),
}

/// Errors that can occur while loading a dictionary or converting seeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    /// Wrong number of words in a phrase.
    #[error("Invalid mnemonic length: expected {expected} words, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A word is not in the dictionary, or the words encode an impossible value.
    #[error("Invalid mnemonic encoding: {0}")]
    InvalidEncoding(String),

    /// The checksum word does not match the data words.
    #[error("Mnemonic checksum mismatch")]
    ChecksumMismatch,

    /// The dictionary has the wrong number of words.
    #[error("Dictionary must have {expected} words, got {actual}")]
    DictionarySize { expected: usize, actual: usize },

    /// No dictionary has been installed.
    #[error("Dictionary not loaded")]
    DictionaryNotLoaded,

    /// The dictionary source could not be read.
    #[error("Dictionary I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MnemonicError {
    fn from(err: std::io::Error) -> Self {
        MnemonicError::Io(err.to_string())
    }
}
