//! Arithmetic in GF(2^255 - 19), radix 2^51.
//!
//! curve25519-dalek keeps its field type private, and Monero's hash-to-point
//! map works on field elements directly, so the handful of operations it
//! needs live here. Everything is variable time; inputs are public keys.

use std::ops::{Add, Mul, Neg, Sub};

const MASK: u64 = (1 << 51) - 1;

/// `p - 2`, little endian.
const P_MINUS_2: [u8; 32] = {
    let mut bytes = [0xff; 32];
    bytes[0] = 0xeb;
    bytes[31] = 0x7f;
    bytes
};

/// `(p - 5) / 8 = 2^252 - 3`, little endian.
const P_MINUS_5_DIV_8: [u8; 32] = {
    let mut bytes = [0xff; 32];
    bytes[0] = 0xfd;
    bytes[31] = 0x0f;
    bytes
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldElement([u64; 5]);

impl FieldElement {
    pub(crate) const ZERO: Self = Self([0; 5]);
    pub(crate) const ONE: Self = Self([1, 0, 0, 0, 0]);

    pub(crate) const fn from_u64(n: u64) -> Self {
        Self([n & MASK, n >> 51, 0, 0, 0])
    }

    /// Load 255 bits; the top bit is ignored and the value is not reduced.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Self {
        let load = |i: usize| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i..i + 8]);
            u64::from_le_bytes(word)
        };
        Self([
            load(0) & MASK,
            (load(6) >> 3) & MASK,
            (load(12) >> 6) & MASK,
            (load(19) >> 1) & MASK,
            (load(24) >> 12) & MASK,
        ])
    }

    /// Canonical little-endian encoding.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut limbs = carry(self.0);

        // Subtract p once if the value is at least p.
        let mut q = (limbs[0] + 19) >> 51;
        for limb in &limbs[1..] {
            q = (limb + q) >> 51;
        }
        limbs[0] += 19 * q;
        for i in 0..4 {
            limbs[i + 1] += limbs[i] >> 51;
            limbs[i] &= MASK;
        }
        limbs[4] &= MASK;

        let mut out = [0u8; 32];
        let mut acc: u128 = 0;
        let mut bits = 0;
        let mut pos = 0;
        for limb in limbs {
            acc |= u128::from(limb) << bits;
            bits += 51;
            while bits >= 8 {
                out[pos] = acc as u8;
                acc >>= 8;
                bits -= 8;
                pos += 1;
            }
        }
        out[pos] = acc as u8;
        out
    }

    pub(crate) fn is_zero(self) -> bool {
        self.to_bytes() == [0u8; 32]
    }

    pub(crate) fn square(self) -> Self {
        self * self
    }

    /// `self^exp` for a little-endian exponent.
    fn pow(self, exp: &[u8; 32]) -> Self {
        let mut result = Self::ONE;
        for byte in exp.iter().rev() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result * self;
                }
            }
        }
        result
    }

    /// Multiplicative inverse; zero maps to zero.
    pub(crate) fn invert(self) -> Self {
        self.pow(&P_MINUS_2)
    }

    /// `(u / v)^((p + 3) / 8)`, computed as `u v^3 (u v^7)^((p - 5) / 8)`.
    pub(crate) fn div_pow_m1(u: Self, v: Self) -> Self {
        let v3 = v.square() * v;
        let uv7 = u * v3.square() * v;
        u * v3 * uv7.pow(&P_MINUS_5_DIV_8)
    }
}

fn carry(mut limbs: [u64; 5]) -> [u64; 5] {
    let c: [u64; 5] = std::array::from_fn(|i| limbs[i] >> 51);
    for limb in &mut limbs {
        *limb &= MASK;
    }
    limbs[0] += c[4] * 19;
    for i in 1..5 {
        limbs[i] += c[i - 1];
    }
    limbs
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(carry(std::array::from_fn(|i| self.0[i] + rhs.0[i])))
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        // Add 16p first so no limb underflows.
        const P16_LOW: u64 = 16 * ((1 << 51) - 19);
        const P16_HIGH: u64 = 16 * ((1 << 51) - 1);
        let a = carry(self.0);
        let b = carry(rhs.0);
        Self(carry([
            a[0] + P16_LOW - b[0],
            a[1] + P16_HIGH - b[1],
            a[2] + P16_HIGH - b[2],
            a[3] + P16_HIGH - b[3],
            a[4] + P16_HIGH - b[4],
        ]))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = carry(self.0);
        let b = carry(rhs.0);
        let m = |x: u64, y: u64| u128::from(x) * u128::from(y);
        let b1 = b[1] * 19;
        let b2 = b[2] * 19;
        let b3 = b[3] * 19;
        let b4 = b[4] * 19;

        let c0 = m(a[0], b[0]) + m(a[4], b1) + m(a[3], b2) + m(a[2], b3) + m(a[1], b4);
        let mut c1 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2) + m(a[3], b3) + m(a[2], b4);
        let mut c2 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3) + m(a[3], b4);
        let mut c3 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4);
        let mut c4 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        c1 += c0 >> 51;
        c2 += c1 >> 51;
        c3 += c2 >> 51;
        c4 += c3 >> 51;
        let top = (c4 >> 51) as u64;

        let mut out = [
            (c0 as u64) & MASK,
            (c1 as u64) & MASK,
            (c2 as u64) & MASK,
            (c3 as u64) & MASK,
            (c4 as u64) & MASK,
        ];
        out[0] += top * 19;
        out[1] += out[0] >> 51;
        out[0] &= MASK;
        Self(out)
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for FieldElement {}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(n: u64) -> FieldElement {
        FieldElement::from_u64(n)
    }

    #[test]
    fn test_small_arithmetic() {
        assert_eq!(fe(7) + fe(5), fe(12));
        assert_eq!(fe(7) - fe(5), fe(2));
        assert_eq!(fe(7) * fe(5), fe(35));
        assert_eq!(fe(5) - fe(7) + fe(2), FieldElement::ZERO);
    }

    #[test]
    fn test_p_minus_one_encoding() {
        // -1 = p - 1 = 0xec, 0xff.., 0x7f
        let mut expected = [0xff; 32];
        expected[0] = 0xec;
        expected[31] = 0x7f;
        assert_eq!((-FieldElement::ONE).to_bytes(), expected);
        assert_eq!((-FieldElement::ONE) * (-FieldElement::ONE), FieldElement::ONE);
    }

    #[test]
    fn test_unreduced_input_is_reduced_on_output() {
        // p + 3 as bytes decodes to 3.
        let mut bytes = [0xff; 32];
        bytes[0] = 0xf0;
        bytes[31] = 0x7f;
        assert_eq!(FieldElement::from_bytes(&bytes), fe(3));
    }

    #[test]
    fn test_bytes_roundtrip_ignores_top_bit() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37);
        }
        bytes[31] &= 0x7f;
        let value = FieldElement::from_bytes(&bytes);
        assert_eq!(value.to_bytes(), bytes);

        let mut high = bytes;
        high[31] |= 0x80;
        assert_eq!(FieldElement::from_bytes(&high), value);
    }

    #[test]
    fn test_invert() {
        let mut bytes = [0x5a; 32];
        bytes[31] = 0x21;
        let x = FieldElement::from_bytes(&bytes);
        assert_eq!(x * x.invert(), FieldElement::ONE);
        assert!(FieldElement::ZERO.invert().is_zero());
    }

    #[test]
    fn test_div_pow_m1_squares_to_quotient_up_to_root_of_unity() {
        // r = (u/v)^((p+3)/8) satisfies v r^2 = ±u or ±sqrt(-1) u.
        let u = fe(4);
        let v = fe(1);
        let r = FieldElement::div_pow_m1(u, v);
        let check = v * r.square();
        assert!(check == u || check == -u);
    }
}
