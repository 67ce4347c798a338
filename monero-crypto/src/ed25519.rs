//! curve25519-dalek backend for [`CurveOps`].

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::field::FieldElement;
use crate::hash::{HashOps, Keccak};
use crate::{CryptoError, CurveOps, Key};

/// Ed25519 arithmetic with Keccak-256 hashing.
///
/// Zero-sized; pass it by value or reference wherever a [`CurveOps`] is
/// expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ed25519;

/// Coefficient `A` of the Montgomery form `v^2 = u^3 + A u^2 + u`.
const MONTGOMERY_A: u64 = 486_662;

impl Ed25519 {
    fn point(key: &Key) -> Result<EdwardsPoint, CryptoError> {
        CompressedEdwardsY(key.0)
            .decompress()
            .ok_or(CryptoError::InvalidPoint)
    }

    fn scalar(key: &Key) -> Scalar {
        Scalar::from_bytes_mod_order(key.0)
    }

    fn key(point: &EdwardsPoint) -> Key {
        Key(point.compress().to_bytes())
    }
}

impl HashOps for Ed25519 {
    fn fast_hash(&self, data: &[u8]) -> [u8; 32] {
        Keccak.fast_hash(data)
    }
}

impl CurveOps for Ed25519 {
    fn random_scalar(&self) -> Key {
        let mut bytes = [0u8; 64];
        OsRng.fill_bytes(&mut bytes);
        let scalar = Scalar::from_bytes_mod_order_wide(&bytes);
        bytes.zeroize();
        Key(scalar.to_bytes())
    }

    fn check_scalar(&self, key: &Key) -> bool {
        Option::<Scalar>::from(Scalar::from_canonical_bytes(key.0)).is_some()
    }

    fn check_key(&self, key: &Key) -> bool {
        CompressedEdwardsY(key.0).decompress().is_some()
    }

    fn scalar_mult_base(&self, a: &Key) -> Key {
        Self::key(&EdwardsPoint::mul_base(&Self::scalar(a)))
    }

    fn scalar_mult(&self, a: &Key, p: &Key) -> Result<Key, CryptoError> {
        let point = Self::point(p)?;
        Ok(Self::key(&(Self::scalar(a) * point)))
    }

    fn scalar_mult8(&self, a: &Key, p: &Key) -> Result<Key, CryptoError> {
        let point = Self::point(p)?;
        Ok(Self::key(&(Self::scalar(a) * point).mul_by_cofactor()))
    }

    fn add_keys(&self, p: &Key, q: &Key) -> Result<Key, CryptoError> {
        Ok(Self::key(&(Self::point(p)? + Self::point(q)?)))
    }

    fn sub_keys(&self, p: &Key, q: &Key) -> Result<Key, CryptoError> {
        Ok(Self::key(&(Self::point(p)? - Self::point(q)?)))
    }

    fn add_keys_base(&self, a: &Key, p: &Key) -> Result<Key, CryptoError> {
        let point = Self::point(p)?;
        Ok(Self::key(&(EdwardsPoint::mul_base(&Self::scalar(a)) + point)))
    }

    fn add_keys_double_base(&self, a: &Key, b: &Key, p: &Key) -> Result<Key, CryptoError> {
        let point = Self::point(p)?;
        let sum = EdwardsPoint::vartime_double_scalar_mul_basepoint(
            &Self::scalar(b),
            &point,
            &Self::scalar(a),
        );
        Ok(Self::key(&sum))
    }

    fn sc_reduce32(&self, a: &Key) -> Key {
        Key(Self::scalar(a).to_bytes())
    }

    fn sc_add(&self, a: &Key, b: &Key) -> Key {
        Key((Self::scalar(a) + Self::scalar(b)).to_bytes())
    }

    fn sc_sub(&self, a: &Key, b: &Key) -> Key {
        Key((Self::scalar(a) - Self::scalar(b)).to_bytes())
    }

    fn sc_mul_sub(&self, a: &Key, b: &Key, c: &Key) -> Key {
        Key((Self::scalar(c) - Self::scalar(a) * Self::scalar(b)).to_bytes())
    }

    /// Monero's `hash_to_ec`: `8 * map(H(data))`.
    fn hash_to_point(&self, data: &[u8]) -> Key {
        // The mapped y always decompresses.
        let point = map_to_curve(&self.fast_hash(data))
            .map(|point| point.mul_by_cofactor())
            .unwrap_or_else(EdwardsPoint::identity);
        Self::key(&point)
    }
}

/// `ge_fromfe_frombytes_vartime`: the Elligator-style map from 32 bytes to a
/// curve point used by `hash_to_ec`. The result is computed as `y` plus the
/// sign of `x` and then decompressed.
fn map_to_curve(bytes: &[u8; 32]) -> Option<EdwardsPoint> {
    let a = FieldElement::from_u64(MONTGOMERY_A);

    let u = FieldElement::from_bytes(bytes);
    let v = u.square() + u.square();
    let w = v + FieldElement::ONE;
    let x = w.square() - a.square() * v;

    let r = FieldElement::div_pow_m1(w, x);
    let rx = r.square() * x;
    let negative = !(w - rx).is_zero() && !(w + rx).is_zero();

    let z = if negative { -a } else { -(a * v) };
    let y = (z - w) * (z + w).invert();

    let mut encoded = y.to_bytes();
    encoded[31] |= u8::from(negative) << 7;
    CompressedEdwardsY(encoded).decompress()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED: Ed25519 = Ed25519;

    #[test]
    fn test_random_scalars_differ_and_are_canonical() {
        let a = ED.random_scalar();
        let b = ED.random_scalar();
        assert_ne!(a, b);
        assert!(ED.check_scalar(&a));
    }

    #[test]
    fn test_scalar_mult_base_of_one_is_generator() {
        let g = ED.scalar_mult_base(&Key::IDENTITY);
        assert_eq!(
            g.to_hex(),
            "5866666666666666666666666666666666666666666666666666666666666666"
        );
    }

    #[test]
    fn test_secret_to_public_rejects_unreduced() {
        let result = ED.secret_to_public(&Key([0xff; 32]));
        assert!(matches!(result, Err(CryptoError::InvalidScalar(_))));
    }

    #[test]
    fn test_add_and_sub_are_inverse() {
        let p = ED.scalar_mult_base(&ED.random_scalar());
        let q = ED.scalar_mult_base(&ED.random_scalar());
        let sum = ED.add_keys(&p, &q).unwrap();
        assert_eq!(ED.sub_keys(&sum, &q).unwrap(), p);
    }

    #[test]
    fn test_add_keys_base_matches_components() {
        let a = ED.random_scalar();
        let p = ED.scalar_mult_base(&ED.random_scalar());
        let expected = ED.add_keys(&ED.scalar_mult_base(&a), &p).unwrap();
        assert_eq!(ED.add_keys_base(&a, &p).unwrap(), expected);
    }

    #[test]
    fn test_add_keys_double_base_matches_components() {
        let a = ED.random_scalar();
        let b = ED.random_scalar();
        let p = ED.scalar_mult_base(&ED.random_scalar());
        let expected = ED
            .add_keys(&ED.scalar_mult_base(&a), &ED.scalar_mult(&b, &p).unwrap())
            .unwrap();
        assert_eq!(ED.add_keys_double_base(&a, &b, &p).unwrap(), expected);
    }

    #[test]
    fn test_scalar_mult8_is_eight_times() {
        let a = ED.random_scalar();
        let p = ED.scalar_mult_base(&ED.random_scalar());
        let a8 = ED.sc_mul_sub(&Key::from_u64(8), &a, &Key::ZERO);
        let negated = ED.scalar_mult(&a8, &p).unwrap();
        // sc_mul_sub gave -8a, so adding 8aP cancels it out.
        let sum = ED.add_keys(&negated, &ED.scalar_mult8(&a, &p).unwrap()).unwrap();
        assert_eq!(sum, Key::IDENTITY);
    }

    #[test]
    fn test_sc_reduce32() {
        // l + 1 reduces to 1.
        let l_plus_one =
            Key::from_hex("eed3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010")
                .unwrap();
        assert!(!ED.check_scalar(&l_plus_one));
        assert_eq!(ED.sc_reduce32(&l_plus_one), Key::IDENTITY);

        let a = ED.random_scalar();
        assert_eq!(ED.sc_reduce32(&a), a);
    }

    #[test]
    fn test_scalar_ops() {
        let a = ED.random_scalar();
        let b = ED.random_scalar();
        let sum = ED.sc_add(&a, &b);
        assert_eq!(ED.sc_sub(&sum, &b), a);

        // c - a*b with c = a*b is zero
        let neg_ab = ED.sc_mul_sub(&a, &b, &Key::ZERO);
        let ab = ED.sc_sub(&Key::ZERO, &neg_ab);
        assert_eq!(ED.sc_mul_sub(&a, &b, &ab), Key::ZERO);
    }

    #[test]
    fn test_invalid_point_rejected() {
        // Roughly half of all y coordinates are off the curve.
        let bad = (2u8..=255)
            .map(|y| {
                let mut bytes = [0u8; 32];
                bytes[0] = y;
                Key(bytes)
            })
            .find(|key| !ED.check_key(key))
            .unwrap();
        assert!(matches!(
            ED.scalar_mult(&Key::IDENTITY, &bad),
            Err(CryptoError::InvalidPoint)
        ));
    }

    #[test]
    fn test_hash_to_point_is_valid_and_deterministic() {
        let p1 = ED.hash_to_point(b"one-time key");
        let p2 = ED.hash_to_point(b"one-time key");
        assert_eq!(p1, p2);
        assert!(ED.check_key(&p1));
        assert_ne!(p1, ED.hash_to_point(b"another key"));
    }

    #[test]
    fn test_hash_to_point_known_vectors() {
        // Keccak of four zero bytes is not a point; the map takes it as is.
        assert_eq!(
            ED.hash_to_point(&[0, 0, 0, 0]).to_hex(),
            "13438fbeb40faad58c8df76032ffa16f2915bb6d4288292fc42b52177527d524"
        );
        assert_eq!(
            ED.hash_to_point(&[1]).to_hex(),
            "14021927805cf3551195ece7f2054377b1bdf3c14124902a7a57bd1f375abd9a"
        );
        assert_eq!(
            ED.hash_to_point(&[0u8; 32]).to_hex(),
            "2d2c4d74df05ba930eaab01825af274eaabcd217bf99dfd54fdf2efe574033f3"
        );
    }

    #[test]
    fn test_known_key_image() {
        let x = Key::from_hex("97df43cb906896405a8b54ecd4610c92b99de5090b404e5e64b17af17da01601")
            .unwrap();
        let p = ED.secret_to_public(&x).unwrap();
        assert_eq!(
            p.to_hex(),
            "6cabaac48d3b9043525a703e9e5feb72132f69ea6deca9b4acf9228beb74cd8f"
        );
        assert_eq!(
            ED.hash_to_point(p.as_bytes()).to_hex(),
            "319d3cdb421c736717f96722eb60913c7554caba71edfbe514190cc5027505db"
        );
        assert_eq!(
            ED.generate_key_image(&x, &p).unwrap().to_hex(),
            "453d46f22bfb737beb66ee6f256b11d70486edf28cd6be8799fe59db3cee8c47"
        );
    }

    #[test]
    fn test_key_image_deterministic() {
        let x = ED.random_scalar();
        let p = ED.secret_to_public(&x).unwrap();
        let image = ED.generate_key_image(&x, &p).unwrap();
        assert_eq!(image, ED.generate_key_image(&x, &p).unwrap());
        assert!(ED.check_key(&image));
    }
}
