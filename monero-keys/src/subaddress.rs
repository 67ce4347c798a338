//! Subaddress key derivation and lookup.
//!
//! Every `(major, minor)` index yields an independent address from the same
//! account keys:
//! ```text
//! m = Hs("SubAddr\0" || a || major_le32 || minor_le32)
//! D = B + m*G
//! C = a*D
//! ```
//! Index `(0, 0)` is the primary address `(B, A)` and has no `m`.

use std::collections::HashMap;

use log::trace;
use monero_crypto::{CryptoError, CurveOps, HashOps, Key};

use crate::{KeyRing, SubaddressIndex};

/// Domain prefix of the subaddress secret hash.
pub const SUBADDRESS_PREFIX: &[u8] = b"SubAddr\0";

/// The subaddress secret `m` for `index`.
pub fn subaddress_secret<H: HashOps + ?Sized>(
    hasher: &H,
    view_secret: &Key,
    index: SubaddressIndex,
) -> Key {
    let mut data = Vec::with_capacity(SUBADDRESS_PREFIX.len() + 32 + 8);
    data.extend_from_slice(SUBADDRESS_PREFIX);
    data.extend_from_slice(view_secret.as_bytes());
    data.extend_from_slice(&index.major.to_le_bytes());
    data.extend_from_slice(&index.minor.to_le_bytes());
    hasher.hash_to_scalar(&data)
}

/// The subaddress spend public key `D = B + m*G`.
///
/// Returns `B` unchanged for the primary index.
pub fn subaddress_spend_public<C: CurveOps>(
    ops: &C,
    view_secret: &Key,
    spend_public: &Key,
    index: SubaddressIndex,
) -> Result<Key, CryptoError> {
    if index.is_primary() {
        return Ok(*spend_public);
    }
    let m = subaddress_secret(ops, view_secret, index);
    ops.add_keys_base(&m, spend_public)
}

/// The `(spend, view)` public key pair of a subaddress.
pub fn generate_subaddress<C: CurveOps>(
    ops: &C,
    view_secret: &Key,
    spend_public: &Key,
    index: SubaddressIndex,
) -> Result<(Key, Key), CryptoError> {
    if index.is_primary() {
        return Ok((*spend_public, ops.secret_to_public(view_secret)?));
    }
    let d = subaddress_spend_public(ops, view_secret, spend_public, index)?;
    let c = ops.scalar_mult(view_secret, &d)?;
    trace!("derived subaddress {}/{}", index.major, index.minor);
    Ok((d, c))
}

/// Map from subaddress spend public key to its index.
///
/// Used while scanning: the spend key recovered from an output is looked up
/// here to learn which subaddress it was sent to.
#[derive(Debug, Clone, Default)]
pub struct SubaddressTable {
    entries: HashMap<Key, SubaddressIndex>,
}

impl SubaddressTable {
    /// A table holding only the primary address.
    pub fn primary(keyring: &KeyRing) -> Self {
        let mut table = Self::default();
        table.entries.insert(*keyring.spend_public(), SubaddressIndex::PRIMARY);
        table
    }

    /// A table for accounts `0..majors` with `0..minors` addresses each.
    pub fn generate<C: CurveOps>(
        ops: &C,
        keyring: &KeyRing,
        majors: u32,
        minors: u32,
    ) -> Result<Self, CryptoError> {
        let mut table = Self::primary(keyring);
        for major in 0..majors {
            for minor in 0..minors {
                table.insert(ops, keyring, SubaddressIndex::new(major, minor))?;
            }
        }
        Ok(table)
    }

    /// Add one index to the table, returning its spend public key.
    pub fn insert<C: CurveOps>(
        &mut self,
        ops: &C,
        keyring: &KeyRing,
        index: SubaddressIndex,
    ) -> Result<Key, CryptoError> {
        let spend =
            subaddress_spend_public(ops, keyring.view_secret(), keyring.spend_public(), index)?;
        self.entries.insert(spend, index);
        Ok(spend)
    }

    /// The index whose spend public key is `spend_public`, if any.
    pub fn lookup(&self, spend_public: &Key) -> Option<SubaddressIndex> {
        self.entries.get(spend_public).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
