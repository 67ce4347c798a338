//! Shared secret computation for key derivation.

use monero_crypto::varint::write_varint;
use monero_crypto::{CryptoError, CurveOps, HashOps, Key};

/// Compute the key derivation shared between sender and receiver.
///
/// ```text
/// D = 8*r*A = 8*a*R
/// ```
///
/// The cofactor multiplication keeps both sides in the prime-order subgroup
/// even when a public key carries a small-order component.
///
/// # Arguments
/// * `public_key` - The other party's public key (A or R)
/// * `secret_key` - Our secret key (r or a)
pub fn generate_key_derivation<C: CurveOps>(
    ops: &C,
    public_key: &Key,
    secret_key: &Key,
) -> Result<Key, CryptoError> {
    ops.scalar_mult8(secret_key, public_key)
}

/// Hash a derivation and an output index to a scalar.
///
/// ```text
/// s = Hs(D || varint(index))
/// ```
pub fn derivation_to_scalar<H: HashOps + ?Sized>(
    hasher: &H,
    derivation: &Key,
    output_index: u64,
) -> Key {
    let mut buf = Vec::with_capacity(32 + 10);
    buf.extend_from_slice(derivation.as_bytes());
    write_varint(&mut buf, output_index);
    hasher.hash_to_scalar(&buf)
}

/// Compute `Hs(8*secret*public || varint(index))` in one step.
pub fn compute_shared_secret<C: CurveOps>(
    ops: &C,
    public_key: &Key,
    secret_key: &Key,
    output_index: u64,
) -> Result<Key, CryptoError> {
    let derivation = generate_key_derivation(ops, public_key, secret_key)?;
    Ok(derivation_to_scalar(ops, &derivation, output_index))
}
