//! Multilayer linkable spontaneous anonymous group (MLSAG) signatures.
//!
//! The ring is an `n x m` matrix of public keys. The signer knows the `m`
//! secret keys of one row and proves it without revealing which, while
//! publishing one key image `I_j = x_j * Hp(P_j)` per column so that two
//! signatures by the same keys are linkable.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{CryptoError, CurveOps, Key};

/// An MLSAG signature: one response per ring entry and the row-0 challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MgSig {
    pub ss: Vec<Vec<Key>>,
    pub cc: Key,
}

fn check_dimensions(ring: &[Vec<Key>], columns: usize) -> Result<(), CryptoError> {
    if ring.is_empty() || columns == 0 {
        return Err(CryptoError::LengthMismatch("empty ring".to_string()));
    }
    if let Some(row) = ring.iter().position(|row| row.len() != columns) {
        return Err(CryptoError::LengthMismatch(format!(
            "ring row {} has {} keys, expected {}",
            row,
            ring[row].len(),
            columns
        )));
    }
    Ok(())
}

/// Hash `message || (P_j || L_j || R_j)*` to the next challenge.
fn challenge<C: CurveOps>(ops: &C, message: &Key, row: &[Key], l: &[Key], r: &[Key]) -> Key {
    let mut buf = Vec::with_capacity(32 + row.len() * 96);
    buf.extend_from_slice(message.as_bytes());
    for j in 0..row.len() {
        buf.extend_from_slice(row[j].as_bytes());
        buf.extend_from_slice(l[j].as_bytes());
        buf.extend_from_slice(r[j].as_bytes());
    }
    ops.hash_to_scalar(&buf)
}

/// `L = s*G + c*P`, `R = s*Hp(P) + c*I` for every column of a row.
fn ring_row<C: CurveOps>(
    ops: &C,
    row: &[Key],
    responses: &[Key],
    c: &Key,
    key_images: &[Key],
) -> Result<(Vec<Key>, Vec<Key>), CryptoError> {
    let mut l = Vec::with_capacity(row.len());
    let mut r = Vec::with_capacity(row.len());
    for j in 0..row.len() {
        l.push(ops.add_keys_double_base(&responses[j], c, &row[j])?);
        let hp = ops.hash_to_point(row[j].as_bytes());
        let s_hp = ops.scalar_mult(&responses[j], &hp)?;
        let c_i = ops.scalar_mult(c, &key_images[j])?;
        r.push(ops.add_keys(&s_hp, &c_i)?);
    }
    Ok((l, r))
}

/// Sign `message` with the secrets of ring row `index`.
///
/// Returns the signature and the key images of the signing row.
pub fn generate_mlsag<C: CurveOps>(
    ops: &C,
    message: &Key,
    ring: &[Vec<Key>],
    secrets: &[Key],
    index: usize,
) -> Result<(MgSig, Vec<Key>), CryptoError> {
    let cols = secrets.len();
    check_dimensions(ring, cols)?;
    let rows = ring.len();
    if index >= rows {
        return Err(CryptoError::LengthMismatch(format!(
            "signer index {} outside ring of {}",
            index, rows
        )));
    }

    let signer = &ring[index];
    let mut key_images = Vec::with_capacity(cols);
    let mut alpha = Vec::with_capacity(cols);
    let mut l = Vec::with_capacity(cols);
    let mut r = Vec::with_capacity(cols);

    for j in 0..cols {
        let hp = ops.hash_to_point(signer[j].as_bytes());
        key_images.push(ops.scalar_mult(&secrets[j], &hp)?);

        let a = ops.random_scalar();
        l.push(ops.scalar_mult_base(&a));
        r.push(ops.scalar_mult(&a, &hp)?);
        alpha.push(a);
    }

    let mut ss = vec![vec![Key::ZERO; cols]; rows];
    let mut c = challenge(ops, message, signer, &l, &r);
    let mut i = (index + 1) % rows;
    let mut cc = if i == 0 { c } else { Key::ZERO };

    while i != index {
        for s in ss[i].iter_mut() {
            *s = ops.random_scalar();
        }
        let (l, r) = ring_row(ops, &ring[i], &ss[i], &c, &key_images)?;
        c = challenge(ops, message, &ring[i], &l, &r);
        i = (i + 1) % rows;
        if i == 0 {
            cc = c;
        }
    }

    for j in 0..cols {
        ss[index][j] = ops.sc_mul_sub(&c, &secrets[j], &alpha[j]);
    }

    debug!("MLSAG generated over {} x {} ring", rows, cols);
    Ok((MgSig { ss, cc }, key_images))
}

/// Verify an MLSAG signature against a ring and its key images.
pub fn verify_mlsag<C: CurveOps>(
    ops: &C,
    message: &Key,
    ring: &[Vec<Key>],
    sig: &MgSig,
    key_images: &[Key],
) -> bool {
    let check = || -> Result<bool, CryptoError> {
        check_dimensions(ring, key_images.len())?;
        if sig.ss.len() != ring.len() || sig.ss.iter().any(|s| s.len() != key_images.len()) {
            return Err(CryptoError::LengthMismatch(
                "signature does not match ring dimensions".to_string(),
            ));
        }

        let mut c = sig.cc;
        for (row, responses) in ring.iter().zip(&sig.ss) {
            let (l, r) = ring_row(ops, row, responses, &c, key_images)?;
            c = challenge(ops, message, row, &l, &r);
        }
        Ok(c == sig.cc)
    };

    match check() {
        Ok(valid) => valid,
        Err(e) => {
            debug!("MLSAG rejected: {}", e);
            false
        }
    }
}
