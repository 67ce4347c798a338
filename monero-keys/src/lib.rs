//! Account Keys and Stealth Addresses for a CryptoNote Wallet
//!
//! This crate implements the stealth address (one-time key) system, the
//! subaddress scheme and the 25-word mnemonic seed format.
//!
//! # Overview
//!
//! An account holds two key pairs:
//! - **View Key** `(a, A)`: used to scan the chain for incoming outputs
//! - **Spend Key** `(b, B)`: used to spend them
//!
//! For each transaction output the sender derives a unique one-time key:
//! ```text
//! P = Hs(8*r*A || n)*G + B
//! ```
//! and publishes `R = r*G`. The receiver recomputes `8*a*R` to detect the
//! output and recovers its spending key `x = Hs(8*a*R || n) + b`.
//!
//! # Example
//!
//! ```rust
//! use monero_address::Network;
//! use monero_crypto::{CurveOps, Ed25519};
//! use monero_keys::{generate_stealth, get_stealth_key, is_stealth_mine, KeyRing};
//!
//! let ops = Ed25519;
//! let wallet = KeyRing::generate(&ops, Network::Mainnet).unwrap();
//!
//! // Sender derives a one-time key for output 0
//! let stealth = generate_stealth(&ops, wallet.view_public(), wallet.spend_public(), 0, false).unwrap();
//!
//! // Receiver detects it with the view key alone
//! assert!(is_stealth_mine(
//!     &ops,
//!     &stealth.one_time_key,
//!     &stealth.tx_public_key,
//!     wallet.view_secret(),
//!     wallet.spend_public(),
//!     0,
//! ));
//!
//! let x = get_stealth_key(&ops, &stealth.tx_public_key, wallet.view_secret(), wallet.spend_secret(), 0).unwrap();
//! assert_eq!(ops.scalar_mult_base(&x), stealth.one_time_key);
//! ```

pub mod config;
mod derivation;
mod error;
pub mod mnemonic;
mod ownership;
mod shared_secret;
mod subaddress;
mod types;
mod wordlist;

pub use derivation::{
    derive_key_image, generate_stealth, generate_stealth_for_address, generate_stealth_to,
    generate_stealth_with_r, get_stealth_key, get_subaddress_stealth_key,
};
pub use error::{KeyError, MnemonicError};
pub use mnemonic::{
    mnemonic_to_secret, mnemonic_to_secret_with, secret_to_mnemonic, secret_to_mnemonic_with,
};
pub use ownership::{
    is_stealth_mine, is_stealth_mine_subaddress, recover_spend_public, scan_outputs, OwnedOutput,
};
pub use shared_secret::{compute_shared_secret, derivation_to_scalar, generate_key_derivation};
pub use subaddress::{
    generate_subaddress, subaddress_secret, subaddress_spend_public, SubaddressTable,
    SUBADDRESS_PREFIX,
};
pub use types::{KeyRing, StealthAddress, SubaddressIndex, SubaddressKeys};
pub use wordlist::{
    install_wordlist, wordlist, FileWordList, InMemoryWordList, WordList, WordListProvider,
    WORDLIST_SIZE,
};
