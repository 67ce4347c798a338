//! Address validation functions.

use monero_crypto::{CurveOps, Key};

use crate::parsing::parse_address;
use crate::{Address, AddressKind, Network};

/// Verdict on an address string.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Network and kind recovered from the network byte, when it decoded.
    pub network: Option<Network>,
    pub kind: Option<AddressKind>,
    /// Why the address was rejected.
    pub reason: Option<String>,
}

impl ValidationResult {
    fn accepted(address: &Address) -> Self {
        Self {
            is_valid: true,
            network: Some(address.network),
            kind: Some(address.kind),
            reason: None,
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            network: None,
            kind: None,
            reason: Some(reason.into()),
        }
    }
}

/// Validate an address string: structure, checksum, and that both public
/// keys are curve points.
///
/// # Example
/// ```rust
/// use monero_address::validate_address;
/// use monero_crypto::Ed25519;
///
/// let result = validate_address(&Ed25519, "not an address");
/// assert!(!result.is_valid);
/// ```
pub fn validate_address<C: CurveOps>(ops: &C, address_str: &str) -> ValidationResult {
    match parse_address(address_str) {
        Err(e) => ValidationResult::rejected(e.to_string()),
        Ok(address) if !validate_public_key(ops, &address.spend_public_key) => {
            ValidationResult::rejected("spend key is not a curve point")
        }
        Ok(address) if !validate_public_key(ops, &address.view_public_key) => {
            ValidationResult::rejected("view key is not a curve point")
        }
        Ok(address) => ValidationResult::accepted(&address),
    }
}

/// Whether `address` belongs to `network`.
pub fn validate_network(address: &Address, network: Network) -> bool {
    address.network == network
}

/// Whether `key` decompresses to a curve point.
pub fn validate_public_key<C: CurveOps>(ops: &C, key: &Key) -> bool {
    ops.check_key(key)
}
