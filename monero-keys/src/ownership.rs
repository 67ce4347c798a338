//! Output ownership detection and scanning.

use std::fmt;

use log::{debug, trace};
use monero_crypto::{CryptoError, CurveOps, Key};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::derivation::{derive_key_image, get_subaddress_stealth_key};
use crate::shared_secret::compute_shared_secret;
use crate::subaddress::{subaddress_spend_public, SubaddressTable};
use crate::{KeyRing, SubaddressIndex};

/// A detected output that belongs to a wallet. The one-time secret is
/// wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct OwnedOutput {
    /// Index of this output in the transaction.
    #[zeroize(skip)]
    pub output_index: u64,
    /// The one-time public key of this output.
    #[zeroize(skip)]
    pub one_time_key: Key,
    /// The derived one-time secret key (for spending).
    pub one_time_secret: Key,
    /// The key image (for double-spend detection).
    #[zeroize(skip)]
    pub key_image: Key,
    /// The subaddress the output was sent to.
    #[zeroize(skip)]
    pub subaddress: SubaddressIndex,
}

impl fmt::Debug for OwnedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedOutput")
            .field("output_index", &self.output_index)
            .field("one_time_key", &self.one_time_key)
            .field("one_time_secret", &"[REDACTED]")
            .field("key_image", &self.key_image)
            .field("subaddress", &self.subaddress)
            .finish()
    }
}

/// Check if a transaction output belongs to a wallet.
///
/// This verifies ownership by computing:
/// ```text
/// P' = Hs(8*a*R || n)*G + B
/// ```
/// and checking if `P' == P`. Only the view secret is needed. Malformed
/// keys are reported as not owned.
///
/// # Arguments
/// * `one_time_key` - The output's one-time public key (P)
/// * `tx_public_key` - The transaction public key (R)
/// * `view_secret` - Wallet's private view key (a)
/// * `spend_public` - Wallet's public spend key (B)
/// * `output_index` - The output's index in the transaction
pub fn is_stealth_mine<C: CurveOps>(
    ops: &C,
    one_time_key: &Key,
    tx_public_key: &Key,
    view_secret: &Key,
    spend_public: &Key,
    output_index: u64,
) -> bool {
    let expected = compute_shared_secret(ops, tx_public_key, view_secret, output_index)
        .and_then(|scalar| ops.add_keys_base(&scalar, spend_public));
    match expected {
        Ok(key) => key == *one_time_key,
        Err(e) => {
            trace!("output {} not checked: {}", output_index, e);
            false
        }
    }
}

/// [`is_stealth_mine`] against the spend key of the subaddress at `index`.
pub fn is_stealth_mine_subaddress<C: CurveOps>(
    ops: &C,
    one_time_key: &Key,
    tx_public_key: &Key,
    view_secret: &Key,
    spend_public: &Key,
    index: SubaddressIndex,
    output_index: u64,
) -> bool {
    match subaddress_spend_public(ops, view_secret, spend_public, index) {
        Ok(d) => is_stealth_mine(ops, one_time_key, tx_public_key, view_secret, &d, output_index),
        Err(_) => false,
    }
}

/// Recover the spend public key an output was addressed to.
///
/// ```text
/// D = P - Hs(8*a*R || n)*G
/// ```
/// The result is looked up in a [`SubaddressTable`].
pub fn recover_spend_public<C: CurveOps>(
    ops: &C,
    one_time_key: &Key,
    tx_public_key: &Key,
    view_secret: &Key,
    output_index: u64,
) -> Result<Key, CryptoError> {
    let scalar = compute_shared_secret(ops, tx_public_key, view_secret, output_index)?;
    ops.sub_keys(one_time_key, &ops.scalar_mult_base(&scalar))
}

/// Scan the outputs of one transaction for ones belonging to a wallet.
///
/// `outputs` holds `(one_time_key, output_index)` pairs. Each output whose
/// recovered spend key is in `table` is returned with its spending secret
/// and key image.
pub fn scan_outputs<C: CurveOps>(
    ops: &C,
    outputs: &[(Key, u64)],
    tx_public_key: &Key,
    keyring: &KeyRing,
    table: &SubaddressTable,
) -> Result<Vec<OwnedOutput>, CryptoError> {
    let mut owned = Vec::new();

    for (one_time_key, output_index) in outputs {
        let Ok(spend) =
            recover_spend_public(ops, one_time_key, tx_public_key, keyring.view_secret(), *output_index)
        else {
            continue;
        };
        let Some(subaddress) = table.lookup(&spend) else {
            continue;
        };

        let one_time_secret = get_subaddress_stealth_key(
            ops,
            tx_public_key,
            keyring.view_secret(),
            keyring.spend_secret(),
            subaddress,
            *output_index,
        )?;
        let key_image = derive_key_image(ops, &one_time_secret)?;

        debug!(
            "found output {} for subaddress {}/{}",
            output_index, subaddress.major, subaddress.minor
        );
        owned.push(OwnedOutput {
            output_index: *output_index,
            one_time_key: *one_time_key,
            one_time_secret,
            key_image,
            subaddress,
        });
    }

    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::generate_stealth;
    use monero_address::Network;
    use monero_crypto::Ed25519;

    #[test]
    fn test_detects_own_output() {
        let ops = Ed25519;
        let ring = KeyRing::generate(&ops, Network::Mainnet).unwrap();
        let stealth = generate_stealth(&ops, ring.view_public(), ring.spend_public(), 5, false).unwrap();

        assert!(is_stealth_mine(
            &ops,
            &stealth.one_time_key,
            &stealth.tx_public_key,
            ring.view_secret(),
            ring.spend_public(),
            5
        ));
        assert!(!is_stealth_mine(
            &ops,
            &stealth.one_time_key,
            &stealth.tx_public_key,
            ring.view_secret(),
            ring.spend_public(),
            4
        ));
    }

    #[test]
    fn test_rejects_other_wallet() {
        let ops = Ed25519;
        let alice = KeyRing::generate(&ops, Network::Mainnet).unwrap();
        let bob = KeyRing::generate(&ops, Network::Mainnet).unwrap();
        let stealth = generate_stealth(&ops, alice.view_public(), alice.spend_public(), 0, false).unwrap();

        assert!(!is_stealth_mine(
            &ops,
            &stealth.one_time_key,
            &stealth.tx_public_key,
            bob.view_secret(),
            bob.spend_public(),
            0
        ));
    }

    #[test]
    fn test_invalid_tx_key_is_not_mine() {
        let ops = Ed25519;
        let ring = KeyRing::generate(&ops, Network::Mainnet).unwrap();
        let off_curve = (2u8..=255)
            .map(|y| {
                let mut bytes = [0u8; 32];
                bytes[0] = y;
                Key::new(bytes)
            })
            .find(|key| !ops.check_key(key))
            .unwrap();

        assert!(!is_stealth_mine(
            &ops,
            ring.spend_public(),
            &off_curve,
            ring.view_secret(),
            ring.spend_public(),
            0
        ));
    }

    #[test]
    fn test_subaddress_detection() {
        let ops = Ed25519;
        let ring = KeyRing::generate(&ops, Network::Mainnet).unwrap();
        let index = SubaddressIndex::new(0, 4);
        let sub = ring.subaddress(&ops, index).unwrap();
        let stealth =
            generate_stealth(&ops, &sub.view_public_key, &sub.spend_public_key, 1, true).unwrap();

        assert!(is_stealth_mine_subaddress(
            &ops,
            &stealth.one_time_key,
            &stealth.tx_public_key,
            ring.view_secret(),
            ring.spend_public(),
            index,
            1
        ));
        assert!(!is_stealth_mine(
            &ops,
            &stealth.one_time_key,
            &stealth.tx_public_key,
            ring.view_secret(),
            ring.spend_public(),
            1
        ));
        assert_eq!(
            recover_spend_public(&ops, &stealth.one_time_key, &stealth.tx_public_key, ring.view_secret(), 1)
                .unwrap(),
            sub.spend_public_key
        );
    }

    #[test]
    fn test_owned_output_debug_redacts_secret() {
        let output = OwnedOutput {
            output_index: 0,
            one_time_key: Key::new([1u8; 32]),
            one_time_secret: Key::new([0xab; 32]),
            key_image: Key::new([2u8; 32]),
            subaddress: SubaddressIndex::PRIMARY,
        };
        assert!(!format!("{:?}", output).contains(&"ab".repeat(32)));
    }

    #[test]
    fn test_owned_output_zeroize_clears_only_secret() {
        let mut output = OwnedOutput {
            output_index: 3,
            one_time_key: Key::new([1u8; 32]),
            one_time_secret: Key::new([0xab; 32]),
            key_image: Key::new([2u8; 32]),
            subaddress: SubaddressIndex::new(1, 2),
        };
        output.zeroize();

        assert_eq!(output.one_time_secret, Key::ZERO);
        assert_eq!(output.output_index, 3);
        assert_eq!(output.one_time_key, Key::new([1u8; 32]));
        assert_eq!(output.key_image, Key::new([2u8; 32]));
        assert_eq!(output.subaddress, SubaddressIndex::new(1, 2));
    }
}
