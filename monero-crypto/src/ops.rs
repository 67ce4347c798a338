//! The elliptic-curve capability consumed by the wallet crates.

use crate::{CryptoError, HashOps, Key};

/// Point and scalar arithmetic on Ed25519, on 32-byte [`Key`]s.
///
/// Scalars passed in are reduced mod `l` unless noted otherwise. Points
/// must decompress, or the call fails with [`CryptoError::InvalidPoint`].
/// The hash functions come from the [`HashOps`] supertrait.
pub trait CurveOps: HashOps {
    /// A uniformly random scalar.
    fn random_scalar(&self) -> Key;

    /// `true` if `key` is a canonical scalar (`< l`).
    fn check_scalar(&self, key: &Key) -> bool;

    /// `true` if `key` decompresses to a curve point.
    fn check_key(&self, key: &Key) -> bool;

    /// `a * G`, reducing `a` first.
    fn scalar_mult_base(&self, a: &Key) -> Key;

    /// `a * P`.
    fn scalar_mult(&self, a: &Key, p: &Key) -> Result<Key, CryptoError>;

    /// `8 * a * P`, the cofactor-cleared product used for key derivations.
    fn scalar_mult8(&self, a: &Key, p: &Key) -> Result<Key, CryptoError>;

    /// `P + Q`.
    fn add_keys(&self, p: &Key, q: &Key) -> Result<Key, CryptoError>;

    /// `P - Q`.
    fn sub_keys(&self, p: &Key, q: &Key) -> Result<Key, CryptoError>;

    /// `a * G + P`.
    fn add_keys_base(&self, a: &Key, p: &Key) -> Result<Key, CryptoError>;

    /// `a * G + b * P`.
    fn add_keys_double_base(&self, a: &Key, b: &Key, p: &Key) -> Result<Key, CryptoError>;

    /// `a mod l`, for 32 bytes that need not be a canonical scalar.
    fn sc_reduce32(&self, a: &Key) -> Key;

    /// `a + b mod l`.
    fn sc_add(&self, a: &Key, b: &Key) -> Key;

    /// `a - b mod l`.
    fn sc_sub(&self, a: &Key, b: &Key) -> Key;

    /// `c - a * b mod l`.
    fn sc_mul_sub(&self, a: &Key, b: &Key, c: &Key) -> Key;

    /// Map arbitrary bytes to a point in the prime-order subgroup.
    fn hash_to_point(&self, data: &[u8]) -> Key;

    /// The public key of a secret scalar. Rejects non-canonical scalars.
    fn secret_to_public(&self, secret: &Key) -> Result<Key, CryptoError> {
        if !self.check_scalar(secret) {
            return Err(CryptoError::InvalidScalar(
                "secret key is not reduced".to_string(),
            ));
        }
        Ok(self.scalar_mult_base(secret))
    }

    /// Key image `I = x * Hp(P)` for the one-time key pair `(x, P)`.
    fn generate_key_image(&self, secret: &Key, public: &Key) -> Result<Key, CryptoError> {
        let hp = self.hash_to_point(public.as_bytes());
        self.scalar_mult(secret, &hp)
    }
}
