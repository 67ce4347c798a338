//! Monero Address Encoding
//!
//! This crate provides block base58, address encoding and decoding, and
//! validation for Monero standard addresses and subaddresses.
//!
//! # Address Format
//!
//! A 69-byte payload is encoded with block base58 into 95 characters:
//! ```text
//! [network_byte:1][spend_public_key:32][view_public_key:32][checksum:4]
//! ```
//! The checksum is the first four bytes of the Keccak-256 hash of the
//! preceding 65 bytes. The network byte tells mainnet, testnet and stagenet
//! apart, and primary addresses from subaddresses.
//!
//! # Example
//!
//! ```rust
//! use monero_address::{decode_address, encode_address};
//! use monero_crypto::{CurveOps, Ed25519};
//!
//! let ops = Ed25519;
//! let spend = ops.scalar_mult_base(&ops.random_scalar());
//! let view = ops.scalar_mult_base(&ops.random_scalar());
//!
//! let address = encode_address(&spend, &view, false);
//! assert_eq!(address.len(), 95);
//!
//! let (decoded_spend, decoded_view) = decode_address(&address).unwrap();
//! assert_eq!(decoded_spend, spend);
//! assert_eq!(decoded_view, view);
//! ```

pub mod base58;
mod error;
mod parsing;
mod serialization;
mod types;
mod validation;

pub use error::AddressError;
pub use parsing::{decode_address, parse_address, parse_address_for_network};
pub use serialization::{address_to_bytes, compute_checksum, encode_address, AddressCodec};
pub use types::{Address, AddressKind, Network};
pub use validation::{validate_address, validate_network, validate_public_key, ValidationResult};

/// Mainnet primary address network byte.
pub const MAINNET_PRIMARY: u8 = 18;
/// Mainnet subaddress network byte.
pub const MAINNET_SUBADDRESS: u8 = 42;
/// Testnet primary address network byte.
pub const TESTNET_PRIMARY: u8 = 53;
/// Testnet subaddress network byte.
pub const TESTNET_SUBADDRESS: u8 = 63;
/// Stagenet primary address network byte.
pub const STAGENET_PRIMARY: u8 = 24;
/// Stagenet subaddress network byte.
pub const STAGENET_SUBADDRESS: u8 = 36;

/// Length of the binary address (network byte, two keys, checksum).
pub const ADDRESS_BYTES: usize = 1 + 32 + 32 + CHECKSUM_SIZE;

/// Length of the encoded address string.
pub const ADDRESS_CHARS: usize = 95;

/// Length of the address checksum.
pub const CHECKSUM_SIZE: usize = 4;
