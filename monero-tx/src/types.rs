//! Transaction data model and its JSON form.

use monero_crypto::{Key, MgSig, RangeSig};
use serde::{Deserialize, Serialize};

use crate::TxError;

/// An input spending one of a ring of earlier outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInToKey {
    /// Cleartext amount, 0 for RingCT inputs.
    pub amount: u64,
    /// Relative global indices of the ring members.
    pub key_offsets: Vec<u64>,
    /// Key image of the real input.
    #[serde(rename = "k_image")]
    pub key_image: Key,
}

/// Destination of an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutToKey {
    /// One-time output key.
    pub key: Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    /// Cleartext amount, 0 for RingCT outputs.
    pub amount: u64,
    pub target: TxOutToKey,
}

impl TxOut {
    /// A RingCT output paying `key`.
    pub fn to_key(key: Key) -> Self {
        Self {
            amount: 0,
            target: TxOutToKey { key },
        }
    }
}

/// Encrypted mask and amount for one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdhInfo {
    pub mask: Key,
    pub amount: Key,
}

/// RingCT signature variant.
///
/// `Full` signs all inputs with a single MLSAG; `Simple` publishes one
/// pseudo-output commitment and one MLSAG per input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RctType {
    #[default]
    Null = 0,
    Full = 1,
    Simple = 2,
}

impl From<RctType> for u8 {
    fn from(rct_type: RctType) -> Self {
        rct_type as u8
    }
}

impl TryFrom<u8> for RctType {
    type Error = TxError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RctType::Null),
            1 => Ok(RctType::Full),
            2 => Ok(RctType::Simple),
            other => Err(TxError::UnknownRctType(other)),
        }
    }
}

/// The prunable-independent part of the RingCT signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RctSignatures {
    #[serde(rename = "type")]
    pub rct_type: RctType,
    #[serde(rename = "txnFee")]
    pub fee: u64,
    #[serde(rename = "ecdhInfo")]
    pub ecdh_info: Vec<EcdhInfo>,
    /// Output commitments.
    #[serde(rename = "outPk")]
    pub out_pk: Vec<Key>,
    /// Per-input pseudo-output commitments, `Simple` only.
    #[serde(rename = "pseudoOuts", default, skip_serializing_if = "Vec::is_empty")]
    pub pseudo_outs: Vec<Key>,
    /// Prefix hash the signatures commit to. Not part of the JSON form.
    #[serde(skip)]
    pub message: Key,
}

/// Range proofs and ring signatures, which nodes may prune.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RctsigPrunable {
    /// One range proof per output.
    #[serde(rename = "rangeSigs")]
    pub range_sigs: Vec<RangeSig>,
    #[serde(rename = "MGs")]
    pub mgs: Vec<MgSig>,
}

/// Everything in a transaction except its signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPrefix {
    pub version: u64,
    pub unlock_time: u64,
    pub vin: Vec<TxInToKey>,
    pub vout: Vec<TxOut>,
    pub extra: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub prefix: TransactionPrefix,
    pub rct_signatures: RctSignatures,
    pub rctsig_prunable: RctsigPrunable,
}

impl Transaction {
    /// Parse the JSON form.
    pub fn from_json(json: &str) -> Result<Self, TxError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the JSON form.
    pub fn to_json(&self) -> Result<String, TxError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
