//! Keccak-256 hashing (`cn_fast_hash`) and hash-to-scalar.

use curve25519_dalek::scalar::Scalar;
use sha3::{Digest, Keccak256};

use crate::Key;

/// Hash capability consumed by the address, stealth and transaction code.
///
/// The default implementation is [`Keccak`]. Alternative backends only need
/// to provide `fast_hash`; reduction mod the group order is shared.
pub trait HashOps {
    /// Fixed-output 32-byte hash (`cn_fast_hash`).
    fn fast_hash(&self, data: &[u8]) -> [u8; 32];

    /// Hash, then reduce modulo the group order `l`.
    fn hash_to_scalar(&self, data: &[u8]) -> Key {
        let hash = self.fast_hash(data);
        Key(Scalar::from_bytes_mod_order(hash).to_bytes())
    }

    /// Hash without reduction. Used for address checksums.
    fn hash_no_reduce(&self, data: &[u8]) -> [u8; 32] {
        self.fast_hash(data)
    }
}

/// Legacy Keccak-256 (the pre-standard padding used by CryptoNote).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak;

impl HashOps for Keccak {
    fn fast_hash(&self, data: &[u8]) -> [u8; 32] {
        Keccak256::digest(data).into()
    }
}

impl<T: HashOps + ?Sized> HashOps for &T {
    fn fast_hash(&self, data: &[u8]) -> [u8; 32] {
        (**self).fast_hash(data)
    }
}
