//! Wallet configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

use monero_address::{AddressCodec, Network};
use thiserror::Error;

use crate::wordlist::{install_wordlist, FileWordList, WordList};
use crate::MnemonicError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Wallet configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Network addresses are encoded for.
    pub network: Network,
    /// Path of the mnemonic dictionary, one word per line.
    pub wordlist_path: PathBuf,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            wordlist_path: PathBuf::from("words.txt"),
        }
    }
}

impl WalletConfig {
    /// Load configuration from environment variables.
    ///
    /// - `MONERO_NETWORK`: `mainnet`, `testnet` or `stagenet` (default `mainnet`)
    /// - `MONERO_WORDLIST`: dictionary path (default `words.txt`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            network: lookup("MONERO_NETWORK")
                .unwrap_or_else(|| "mainnet".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("MONERO_NETWORK".to_string()))?,
            wordlist_path: lookup("MONERO_WORDLIST")
                .unwrap_or_else(|| "words.txt".to_string())
                .into(),
        })
    }

    /// Provider for the configured dictionary file.
    pub fn wordlist_provider(&self) -> FileWordList {
        FileWordList::new(self.wordlist_path.clone())
    }

    /// Address codec for the configured network.
    pub fn address_codec(&self) -> AddressCodec {
        AddressCodec::new(self.network)
    }

    /// Install the configured dictionary as the process-wide one.
    pub fn install_wordlist(&self) -> Result<&'static WordList, MnemonicError> {
        install_wordlist(&self.wordlist_provider())
    }
}
