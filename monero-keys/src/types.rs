//! Core key types for Monero accounts and outputs.

use std::fmt;

use log::debug;
use monero_address::{AddressCodec, AddressKind, Network};
use monero_crypto::{CurveOps, Key};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::mnemonic::{mnemonic_to_secret_with, secret_to_mnemonic_with};
use crate::subaddress::generate_subaddress;
use crate::wordlist::{wordlist, WordList};
use crate::{KeyError, MnemonicError};

/// The base key pair of an account and its primary address.
///
/// The private view key is derived from the private spend key
/// (`a = Hs(b)`), so the spend key alone restores the whole ring.
///
/// # Security
/// - Secret keys are zeroized on drop
/// - Debug output redacts both secret keys
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyRing {
    sk_spend: Key,
    sk_view: Key,
    #[zeroize(skip)]
    pk_spend: Key,
    #[zeroize(skip)]
    pk_view: Key,
    #[zeroize(skip)]
    address: String,
    #[zeroize(skip)]
    network: Network,
}

impl KeyRing {
    /// Generate a new random account.
    pub fn generate<C: CurveOps>(ops: &C, network: Network) -> Result<Self, KeyError> {
        let mut sk_spend = ops.random_scalar();
        let ring = Self::from_spend_key(ops, &sk_spend, network);
        sk_spend.zeroize();
        ring
    }

    /// Restore an account from its private spend key.
    pub fn from_spend_key<C: CurveOps>(
        ops: &C,
        sk_spend: &Key,
        network: Network,
    ) -> Result<Self, KeyError> {
        let pk_spend = ops.secret_to_public(sk_spend)?;
        let sk_view = ops.hash_to_scalar(sk_spend.as_bytes());
        let pk_view = ops.secret_to_public(&sk_view)?;
        let address = AddressCodec::new(network).encode(&pk_spend, &pk_view, AddressKind::Primary);

        debug!("key ring ready for {}", address);
        Ok(Self {
            sk_spend: *sk_spend,
            sk_view,
            pk_spend,
            pk_view,
            address,
            network,
        })
    }

    /// Restore an account from a 25-word seed using `list`.
    ///
    /// The decoded seed is reduced mod `l` before use, so every valid phrase
    /// restores an account.
    pub fn from_mnemonic_with<C: CurveOps>(
        ops: &C,
        list: &WordList,
        phrase: &str,
        network: Network,
    ) -> Result<Self, KeyError> {
        let mut seed = mnemonic_to_secret_with(list, phrase)?;
        let mut secret = ops.sc_reduce32(&seed);
        seed.zeroize();
        let ring = Self::from_spend_key(ops, &secret, network);
        secret.zeroize();
        ring
    }

    /// Restore an account from a 25-word seed using the installed dictionary.
    pub fn from_mnemonic<C: CurveOps>(
        ops: &C,
        phrase: &str,
        network: Network,
    ) -> Result<Self, KeyError> {
        Self::from_mnemonic_with(ops, wordlist()?, phrase, network)
    }

    /// The 25-word seed of this account using `list`.
    pub fn mnemonic_with(&self, list: &WordList) -> String {
        secret_to_mnemonic_with(list, &self.sk_spend)
    }

    /// The 25-word seed of this account using the installed dictionary.
    pub fn mnemonic(&self) -> Result<String, MnemonicError> {
        Ok(self.mnemonic_with(wordlist()?))
    }

    /// Keys and encoded address of the subaddress at `index`.
    pub fn subaddress<C: CurveOps>(
        &self,
        ops: &C,
        index: SubaddressIndex,
    ) -> Result<SubaddressKeys, KeyError> {
        let (spend_public_key, view_public_key) =
            generate_subaddress(ops, &self.sk_view, &self.pk_spend, index)?;
        let kind = AddressKind::from_subaddress(!index.is_primary());
        let address = AddressCodec::new(self.network).encode(&spend_public_key, &view_public_key, kind);
        Ok(SubaddressKeys {
            index,
            spend_public_key,
            view_public_key,
            address,
        })
    }

    /// Private spend key (b).
    pub fn spend_secret(&self) -> &Key {
        &self.sk_spend
    }

    /// Private view key (a).
    pub fn view_secret(&self) -> &Key {
        &self.sk_view
    }

    /// Public spend key (B).
    pub fn spend_public(&self) -> &Key {
        &self.pk_spend
    }

    /// Public view key (A).
    pub fn view_public(&self) -> &Key {
        &self.pk_view
    }

    /// Encoded primary address.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn network(&self) -> Network {
        self.network
    }
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRing")
            .field("pk_spend", &self.pk_spend)
            .field("pk_view", &self.pk_view)
            .field("address", &self.address)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

/// Subaddress coordinates. `(0, 0)` is the primary address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubaddressIndex {
    /// Account number.
    pub major: u32,
    /// Address number within the account.
    pub minor: u32,
}

impl SubaddressIndex {
    /// The primary address.
    pub const PRIMARY: SubaddressIndex = SubaddressIndex { major: 0, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }
}

/// Public keys and address of one subaddress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubaddressKeys {
    pub index: SubaddressIndex,
    /// Subaddress spend key (D).
    pub spend_public_key: Key,
    /// Subaddress view key (C).
    pub view_public_key: Key,
    /// Encoded address.
    pub address: String,
}

/// Sender-side result of deriving a one-time output key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StealthAddress {
    /// Transaction secret key (r).
    pub r: Key,
    /// Transaction public key (R), published in the transaction.
    #[zeroize(skip)]
    pub tx_public_key: Key,
    /// One-time output key (P).
    #[zeroize(skip)]
    pub one_time_key: Key,
}

impl fmt::Debug for StealthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StealthAddress")
            .field("r", &"[REDACTED]")
            .field("tx_public_key", &self.tx_public_key)
            .field("one_time_key", &self.one_time_key)
            .finish()
    }
}
