//! Borromean range proofs over Pedersen commitments.
//!
//! An amount `v` is committed as `C = mask*G + v*H`. The proof splits `v`
//! into 64 bits, commits to each bit as `Ci = ai*G + bi*2^i*H`, and signs a
//! Borromean ring over the pairs `(Ci, Ci - 2^i*H)`: for every bit the prover
//! knows the discrete log of exactly one of the two.
//!
//! ```text
//! sum(Ci) = sum(ai)*G + v*H = C      when sum(ai) = mask
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::{keys_from_bytes, keys_to_hex};
use crate::{CryptoError, CurveOps, Ed25519, Key};

/// Number of bits covered by a range proof.
pub const RANGE_BITS: usize = 64;

/// Second Pedersen generator `H`, with unknown discrete log to `G`.
pub const H_POINT: Key = Key([
    0x8b, 0x65, 0x59, 0x70, 0x15, 0x37, 0x99, 0xaf, 0x2a, 0xea, 0xdc, 0x9f, 0xf1, 0xad, 0xd0,
    0xea, 0x6c, 0x72, 0x51, 0xd5, 0x41, 0x54, 0xcf, 0xa9, 0x2c, 0x17, 0x3a, 0x0d, 0xd3, 0x9c,
    0x1f, 0x94,
]);

/// A Borromean ring signature over 64 two-member rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorromeanSig {
    pub s0: [Key; RANGE_BITS],
    pub s1: [Key; RANGE_BITS],
    pub ee: Key,
}

/// A range proof: the Borromean signature and the per-bit commitments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RangeSigWire", try_from = "RangeSigWire")]
pub struct RangeSig {
    pub asig: BorromeanSig,
    pub ci: [Key; RANGE_BITS],
}

/// Text form: `asig` is `s0 || s1 || ee`, `Ci` the bit commitments.
#[derive(Serialize, Deserialize)]
struct RangeSigWire {
    asig: String,
    #[serde(rename = "Ci")]
    ci: String,
}

impl From<RangeSig> for RangeSigWire {
    fn from(sig: RangeSig) -> Self {
        let mut asig = keys_to_hex(&sig.asig.s0);
        asig.push_str(&keys_to_hex(&sig.asig.s1));
        asig.push_str(&sig.asig.ee.to_hex());
        Self {
            asig,
            ci: keys_to_hex(&sig.ci),
        }
    }
}

impl TryFrom<RangeSigWire> for RangeSig {
    type Error = CryptoError;

    fn try_from(wire: RangeSigWire) -> Result<Self, Self::Error> {
        let asig = hex::decode(&wire.asig)?;
        let expected = (1 + RANGE_BITS * 2) * 32;
        if asig.len() != expected {
            return Err(CryptoError::InvalidLength {
                expected,
                actual: asig.len(),
            });
        }
        let s0 = keys_from_bytes::<RANGE_BITS>(&asig[..RANGE_BITS * 32])?;
        let s1 = keys_from_bytes::<RANGE_BITS>(&asig[RANGE_BITS * 32..RANGE_BITS * 64])?;
        let ee = Key::try_from(&asig[RANGE_BITS * 64..])?;

        let ci = keys_from_bytes::<RANGE_BITS>(&hex::decode(&wire.ci)?)?;

        Ok(Self {
            asig: BorromeanSig { s0, s1, ee },
            ci,
        })
    }
}

/// Range-proof capability.
pub trait RangeProver {
    /// Commit to `amount` under `mask` and prove it lies in `[0, 2^64)`.
    fn prove(&self, amount: u64, mask: &Key) -> Result<(Key, RangeSig), CryptoError>;

    /// Check a proof against a commitment.
    fn verify(&self, commitment: &Key, proof: &RangeSig) -> bool;
}

/// `mask*G + amount*H`.
pub fn pedersen_commit<C: CurveOps>(ops: &C, amount: u64, mask: &Key) -> Result<Key, CryptoError> {
    let amount_h = ops.scalar_mult(&Key::from_u64(amount), &H_POINT)?;
    ops.add_keys_base(mask, &amount_h)
}

/// Borromean range prover over any [`CurveOps`] backend.
#[derive(Debug, Clone)]
pub struct BorromeanProver<C = Ed25519> {
    ops: C,
    h2: [Key; RANGE_BITS],
}

impl<C: CurveOps> BorromeanProver<C> {
    /// Build the prover, precomputing `2^i * H`.
    pub fn new(ops: C) -> Result<Self, CryptoError> {
        let mut h2 = [H_POINT; RANGE_BITS];
        for i in 1..RANGE_BITS {
            h2[i] = ops.add_keys(&h2[i - 1], &h2[i - 1])?;
        }
        Ok(Self { ops, h2 })
    }

    /// `2^i * H` for each bit position.
    pub fn generators(&self) -> &[Key; RANGE_BITS] {
        &self.h2
    }

    fn hash_keys(&self, keys: &[Key]) -> Key {
        let mut buf = Vec::with_capacity(keys.len() * 32);
        for key in keys {
            buf.extend_from_slice(key.as_bytes());
        }
        self.ops.hash_to_scalar(&buf)
    }

    /// Sign with `x[i]` the secret for `p1[i]` when `indices[i]` is 0, or for
    /// `p2[i]` when it is 1.
    fn sign_borromean(
        &self,
        x: &[Key; RANGE_BITS],
        p1: &[Key; RANGE_BITS],
        p2: &[Key; RANGE_BITS],
        indices: &[bool; RANGE_BITS],
    ) -> Result<BorromeanSig, CryptoError> {
        let ops = &self.ops;
        let mut alpha = [Key::ZERO; RANGE_BITS];
        let mut l1 = [Key::ZERO; RANGE_BITS];
        let mut s0 = [Key::ZERO; RANGE_BITS];
        let mut s1 = [Key::ZERO; RANGE_BITS];

        for i in 0..RANGE_BITS {
            alpha[i] = ops.random_scalar();
            let l = ops.scalar_mult_base(&alpha[i]);
            if indices[i] {
                l1[i] = l;
            } else {
                s1[i] = ops.random_scalar();
                let c = ops.hash_to_scalar(l.as_bytes());
                l1[i] = ops.add_keys_double_base(&s1[i], &c, &p2[i])?;
            }
        }

        let ee = self.hash_keys(&l1);

        for i in 0..RANGE_BITS {
            if indices[i] {
                s0[i] = ops.random_scalar();
                let l0 = ops.add_keys_double_base(&s0[i], &ee, &p1[i])?;
                let c = ops.hash_to_scalar(l0.as_bytes());
                s1[i] = ops.sc_mul_sub(&x[i], &c, &alpha[i]);
            } else {
                s0[i] = ops.sc_mul_sub(&x[i], &ee, &alpha[i]);
            }
        }

        Ok(BorromeanSig { s0, s1, ee })
    }

    fn verify_borromean(
        &self,
        sig: &BorromeanSig,
        p1: &[Key; RANGE_BITS],
        p2: &[Key; RANGE_BITS],
    ) -> Result<bool, CryptoError> {
        let ops = &self.ops;
        let mut l1 = [Key::ZERO; RANGE_BITS];
        for i in 0..RANGE_BITS {
            let l0 = ops.add_keys_double_base(&sig.s0[i], &sig.ee, &p1[i])?;
            let c = ops.hash_to_scalar(l0.as_bytes());
            l1[i] = ops.add_keys_double_base(&sig.s1[i], &c, &p2[i])?;
        }
        Ok(self.hash_keys(&l1) == sig.ee)
    }
}

impl<C: CurveOps> RangeProver for BorromeanProver<C> {
    fn prove(&self, amount: u64, mask: &Key) -> Result<(Key, RangeSig), CryptoError> {
        let ops = &self.ops;
        let mut ai = [Key::ZERO; RANGE_BITS];
        let mut ci = [Key::ZERO; RANGE_BITS];
        let mut ci_h = [Key::ZERO; RANGE_BITS];
        let mut bits = [false; RANGE_BITS];

        // The bit masks must sum to the caller's mask.
        let mut remaining = *mask;
        for i in 0..RANGE_BITS {
            bits[i] = (amount >> i) & 1 == 1;
            ai[i] = if i == RANGE_BITS - 1 {
                remaining
            } else {
                ops.random_scalar()
            };
            remaining = ops.sc_sub(&remaining, &ai[i]);

            ci[i] = if bits[i] {
                ops.add_keys_base(&ai[i], &self.h2[i])?
            } else {
                ops.scalar_mult_base(&ai[i])
            };
            ci_h[i] = ops.sub_keys(&ci[i], &self.h2[i])?;
        }

        let asig = self.sign_borromean(&ai, &ci, &ci_h, &bits)?;
        let commitment = pedersen_commit(ops, amount, mask)?;
        debug!("range proof generated for commitment {}", commitment);

        Ok((commitment, RangeSig { asig, ci }))
    }

    fn verify(&self, commitment: &Key, proof: &RangeSig) -> bool {
        let check = || -> Result<bool, CryptoError> {
            let ops = &self.ops;
            let mut ci_h = [Key::ZERO; RANGE_BITS];
            let mut sum = proof.ci[0];
            for i in 0..RANGE_BITS {
                ci_h[i] = ops.sub_keys(&proof.ci[i], &self.h2[i])?;
                if i > 0 {
                    sum = ops.add_keys(&sum, &proof.ci[i])?;
                }
            }
            if sum != *commitment {
                return Ok(false);
            }
            self.verify_borromean(&proof.asig, &proof.ci, &ci_h)
        };

        match check() {
            Ok(valid) => valid,
            Err(e) => {
                debug!("range proof rejected: {}", e);
                false
            }
        }
    }
}
