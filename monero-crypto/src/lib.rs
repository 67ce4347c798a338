//! CryptoNote Cryptographic Primitives
//!
//! This crate provides the low-level building blocks shared by the wallet
//! and transaction crates.
//!
//! # Overview
//!
//! - [`Key`]: a 32-byte value that is either a scalar or a compressed
//!   Ed25519 point, depending on context
//! - [`HashOps`]: Keccak-256 (`cn_fast_hash`), hash-to-scalar and the
//!   unreduced hash used by address checksums
//! - [`CurveOps`]: point and scalar arithmetic behind a trait, with the
//!   [`Ed25519`] backend built on curve25519-dalek
//! - [`varint`]: the little-endian base-128 integer codec
//! - [`BorromeanProver`]: 64-bit Borromean range proofs over Pedersen
//!   commitments
//! - [`generate_mlsag`] / [`verify_mlsag`]: multilayer linkable ring
//!   signatures
//!
//! # Example
//!
//! ```rust
//! use monero_crypto::{CurveOps, Ed25519, HashOps};
//!
//! let ops = Ed25519;
//! let secret = ops.random_scalar();
//! let public = ops.secret_to_public(&secret).unwrap();
//!
//! // Hs(data) is always a canonical scalar
//! let scalar = ops.hash_to_scalar(public.as_bytes());
//! assert!(ops.check_scalar(&scalar));
//! ```

mod ed25519;
mod error;
mod field;
mod hash;
mod mlsag;
mod ops;
mod rangeproof;
mod types;
pub mod varint;

pub use ed25519::Ed25519;
pub use error::CryptoError;
pub use hash::{HashOps, Keccak};
pub use mlsag::{generate_mlsag, verify_mlsag, MgSig};
pub use ops::CurveOps;
pub use rangeproof::{
    pedersen_commit, BorromeanProver, BorromeanSig, RangeProver, RangeSig, H_POINT, RANGE_BITS,
};
pub use types::Key;

#[cfg(test)]
mod tests;
