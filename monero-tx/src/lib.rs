//! RingCT Transactions
//!
//! This crate provides the transaction data model, its JSON form, and the
//! canonical byte serializations that transaction hashes are computed over.
//!
//! # Signing Hash
//!
//! ```text
//! message   = H(serialize(prefix))
//! pre_mlsag = H(hex(message) || hex(H(rct_base)) || hex(H(range_proofs)))
//! ```
//!
//! # Example
//!
//! ```rust
//! use monero_crypto::{Keccak, Key};
//! use monero_tx::{Transaction, TxOut};
//!
//! let mut tx = Transaction::default();
//! tx.prefix.version = 2;
//! tx.prefix.vout.push(TxOut::to_key(Key::new([7u8; 32])));
//!
//! let hash = tx.sign_message(&Keccak).unwrap();
//! assert_ne!(hash, Key::ZERO);
//! ```

mod error;
mod hash;
mod serialization;
mod types;

pub use error::TxError;
pub use hash::{pre_mlsag_hash, prefix_hash};
pub use serialization::{TXIN_TO_KEY_TAG, TXOUT_TO_KEY_TAG};
pub use types::{
    EcdhInfo, RctSignatures, RctType, RctsigPrunable, Transaction, TransactionPrefix, TxInToKey,
    TxOut, TxOutToKey,
};
