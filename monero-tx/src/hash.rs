//! Transaction hashes.
//!
//! The message signed by the ring signatures is built in three stages:
//! ```text
//! pre_mlsag = H( hex(message) || hex(H(rct_base)) || hex(H(range_proofs)) )
//! ```
//! where `message` is the prefix hash and the concatenation is of the
//! lowercase hex text, not the raw digests.

use log::debug;
use monero_crypto::{HashOps, Key};

use crate::{Transaction, TransactionPrefix, TxError};

/// `H(prefix bytes)`.
pub fn prefix_hash<H: HashOps + ?Sized>(hasher: &H, prefix: &TransactionPrefix) -> Key {
    Key::new(hasher.fast_hash(&prefix.serialize()))
}

/// The hash the MLSAG signatures of `tx` sign.
///
/// Uses `tx.rct_signatures.message` as the first stage; see
/// [`Transaction::sign_message`] to fill it from the prefix.
pub fn pre_mlsag_hash<H: HashOps + ?Sized>(hasher: &H, tx: &Transaction) -> Result<Key, TxError> {
    let mut text = tx.rct_signatures.message.to_hex();

    let rct = tx.rct_signatures.serialize_base()?;
    text.push_str(&Key::new(hasher.fast_hash(&rct)).to_hex());

    let range_proofs = tx.rctsig_prunable.serialize_range_proofs();
    text.push_str(&Key::new(hasher.fast_hash(&range_proofs)).to_hex());

    Ok(Key::new(hasher.fast_hash(text.as_bytes())))
}

impl Transaction {
    /// Set the signed message to the prefix hash and return the pre-MLSAG
    /// hash.
    pub fn sign_message<H: HashOps + ?Sized>(&mut self, hasher: &H) -> Result<Key, TxError> {
        self.rct_signatures.message = prefix_hash(hasher, &self.prefix);
        let hash = pre_mlsag_hash(hasher, self)?;
        debug!("pre-MLSAG hash {}", hash);
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monero_crypto::Keccak;

    #[test]
    fn test_empty_prefix_hash() {
        let prefix = TransactionPrefix::default();
        assert_eq!(
            prefix_hash(&Keccak, &prefix),
            Key::new(Keccak.fast_hash(&[0, 0, 0, 0, 0]))
        );
    }

    #[test]
    fn test_stages_hash_hex_text() {
        let tx = Transaction::default();
        let rct = tx.rct_signatures.serialize_base().unwrap();
        let text = format!(
            "{}{}{}",
            "00".repeat(32),
            hex::encode(Keccak.fast_hash(&rct)),
            hex::encode(Keccak.fast_hash(&[]))
        );
        assert_eq!(
            pre_mlsag_hash(&Keccak, &tx).unwrap(),
            Key::new(Keccak.fast_hash(text.as_bytes()))
        );
    }

    #[test]
    fn test_sign_message_sets_prefix_hash() {
        let mut tx = Transaction::default();
        tx.prefix.version = 2;
        let hash = tx.sign_message(&Keccak).unwrap();

        assert_eq!(tx.rct_signatures.message, prefix_hash(&Keccak, &tx.prefix));
        assert_eq!(hash, pre_mlsag_hash(&Keccak, &tx).unwrap());
    }
}
