//! One-time key derivation functions.

use log::debug;
use monero_address::{parse_address, Address};
use monero_crypto::{CryptoError, CurveOps, Key};

use crate::shared_secret::compute_shared_secret;
use crate::subaddress::subaddress_secret;
use crate::{KeyError, StealthAddress, SubaddressIndex};

/// Derive a one-time output key for a recipient with a fresh random `r`.
///
/// ```text
/// P = Hs(8*r*A || n)*G + B
/// R = r*G        (primary address)
/// R = r*B        (subaddress)
/// ```
/// Where:
/// - `r` = transaction secret key
/// - `A` = recipient's public view key
/// - `B` = recipient's public spend key
/// - `n` = output index within the transaction
///
/// # Arguments
/// * `view_public` - Recipient's public view key (A)
/// * `spend_public` - Recipient's public spend key (B)
/// * `output_index` - Output index within the transaction
/// * `is_subaddress` - Whether the recipient keys belong to a subaddress
pub fn generate_stealth<C: CurveOps>(
    ops: &C,
    view_public: &Key,
    spend_public: &Key,
    output_index: u64,
    is_subaddress: bool,
) -> Result<StealthAddress, CryptoError> {
    let r = ops.random_scalar();
    generate_stealth_with_r(ops, &r, view_public, spend_public, output_index, is_subaddress)
}

/// Same as [`generate_stealth`] with a caller-chosen transaction secret `r`.
pub fn generate_stealth_with_r<C: CurveOps>(
    ops: &C,
    r: &Key,
    view_public: &Key,
    spend_public: &Key,
    output_index: u64,
    is_subaddress: bool,
) -> Result<StealthAddress, CryptoError> {
    let scalar = compute_shared_secret(ops, view_public, r, output_index)?;
    let one_time_key = ops.add_keys_base(&scalar, spend_public)?;
    let tx_public_key = if is_subaddress {
        ops.scalar_mult(r, spend_public)?
    } else {
        ops.scalar_mult_base(r)
    };

    debug!("derived one-time key {} for output {}", one_time_key, output_index);
    Ok(StealthAddress {
        r: *r,
        tx_public_key,
        one_time_key,
    })
}

/// Derive a one-time output key for a decoded address.
pub fn generate_stealth_for_address<C: CurveOps>(
    ops: &C,
    address: &Address,
    output_index: u64,
) -> Result<StealthAddress, CryptoError> {
    generate_stealth(
        ops,
        &address.view_public_key,
        &address.spend_public_key,
        output_index,
        address.is_subaddress(),
    )
}

/// Derive a one-time output key for an encoded address on any network.
pub fn generate_stealth_to<C: CurveOps>(
    ops: &C,
    address: &str,
    output_index: u64,
) -> Result<StealthAddress, KeyError> {
    let address = parse_address(address)?;
    Ok(generate_stealth_for_address(ops, &address, output_index)?)
}

/// Derive the one-time secret key for spending an output.
///
/// ```text
/// x = Hs(8*a*R || n) + b
/// ```
/// with `x*G == P` for outputs sent to the primary address.
pub fn get_stealth_key<C: CurveOps>(
    ops: &C,
    tx_public_key: &Key,
    view_secret: &Key,
    spend_secret: &Key,
    output_index: u64,
) -> Result<Key, CryptoError> {
    let scalar = compute_shared_secret(ops, tx_public_key, view_secret, output_index)?;
    Ok(ops.sc_add(&scalar, spend_secret))
}

/// Derive the one-time secret key for an output sent to a subaddress.
///
/// ```text
/// x = Hs(8*a*R || n) + b + m(index)
/// ```
pub fn get_subaddress_stealth_key<C: CurveOps>(
    ops: &C,
    tx_public_key: &Key,
    view_secret: &Key,
    spend_secret: &Key,
    index: SubaddressIndex,
    output_index: u64,
) -> Result<Key, CryptoError> {
    let x = get_stealth_key(ops, tx_public_key, view_secret, spend_secret, output_index)?;
    if index.is_primary() {
        return Ok(x);
    }
    let m = subaddress_secret(ops, view_secret, index);
    Ok(ops.sc_add(&x, &m))
}

/// Key image of a one-time secret: `I = x * Hp(x*G)`.
pub fn derive_key_image<C: CurveOps>(ops: &C, one_time_secret: &Key) -> Result<Key, CryptoError> {
    let public = ops.secret_to_public(one_time_secret)?;
    ops.generate_key_image(one_time_secret, &public)
}
