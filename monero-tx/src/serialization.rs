//! Canonical binary serialization used for transaction hashing.
//!
//! # Prefix Format
//! ```text
//! varint(version) || varint(unlock_time)
//! varint(#vin)  || { 0x02 || varint(amount) || varint(#offsets) || varint(offset)* || k_image }*
//! varint(#vout) || { varint(amount) || 0x02 || key }*
//! varint(#extra) || extra
//! ```

use log::trace;
use monero_crypto::varint::{read_varint, write_varint};
use monero_crypto::{Key, RANGE_BITS};

use crate::{
    RctSignatures, RctType, RctsigPrunable, TransactionPrefix, TxError, TxInToKey, TxOut,
    TxOutToKey,
};

/// Variant tag of an input spending to-key outputs.
pub const TXIN_TO_KEY_TAG: u8 = 0x02;

/// Variant tag of an output paying to a key.
pub const TXOUT_TO_KEY_TAG: u8 = 0x02;

fn write_len(out: &mut Vec<u8>, len: usize) {
    write_varint(out, len as u64);
}

impl TransactionPrefix {
    /// Serialize the prefix to its canonical bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint(&mut out, self.version);
        write_varint(&mut out, self.unlock_time);

        write_len(&mut out, self.vin.len());
        for input in &self.vin {
            out.push(TXIN_TO_KEY_TAG);
            write_varint(&mut out, input.amount);
            write_len(&mut out, input.key_offsets.len());
            for offset in &input.key_offsets {
                write_varint(&mut out, *offset);
            }
            out.extend_from_slice(input.key_image.as_bytes());
        }

        write_len(&mut out, self.vout.len());
        for output in &self.vout {
            write_varint(&mut out, output.amount);
            out.push(TXOUT_TO_KEY_TAG);
            out.extend_from_slice(output.target.key.as_bytes());
        }

        write_len(&mut out, self.extra.len());
        out.extend_from_slice(&self.extra);
        out
    }

    /// Parse canonical prefix bytes. Trailing bytes are rejected.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, TxError> {
        let mut reader = Reader { bytes, pos: 0 };

        let version = reader.varint()?;
        let unlock_time = reader.varint()?;

        let vin_len = reader.len()?;
        let mut vin = Vec::with_capacity(vin_len.min(bytes.len()));
        for _ in 0..vin_len {
            reader.tag(TXIN_TO_KEY_TAG, "input")?;
            let amount = reader.varint()?;
            let offsets_len = reader.len()?;
            let mut key_offsets = Vec::with_capacity(offsets_len.min(bytes.len()));
            for _ in 0..offsets_len {
                key_offsets.push(reader.varint()?);
            }
            let key_image = reader.key()?;
            vin.push(TxInToKey {
                amount,
                key_offsets,
                key_image,
            });
        }

        let vout_len = reader.len()?;
        let mut vout = Vec::with_capacity(vout_len.min(bytes.len()));
        for _ in 0..vout_len {
            let amount = reader.varint()?;
            reader.tag(TXOUT_TO_KEY_TAG, "output")?;
            let key = reader.key()?;
            vout.push(TxOut {
                amount,
                target: TxOutToKey { key },
            });
        }

        let extra_len = reader.len()?;
        let extra = reader.take(extra_len)?.to_vec();

        if reader.pos != bytes.len() {
            return Err(TxError::InvalidEncoding(format!(
                "{} trailing bytes",
                bytes.len() - reader.pos
            )));
        }

        Ok(Self {
            version,
            unlock_time,
            vin,
            vout,
            extra,
        })
    }
}

impl RctSignatures {
    /// Serialize the signature base: type, fee, pseudo-outputs (`Simple`
    /// only), encrypted amounts and output commitments.
    pub fn serialize_base(&self) -> Result<Vec<u8>, TxError> {
        if self.ecdh_info.len() != self.pseudo_outs.len() {
            return Err(TxError::LengthMismatch(format!(
                "{} ecdh entries but {} pseudo-outputs",
                self.ecdh_info.len(),
                self.pseudo_outs.len()
            )));
        }

        let mut out = Vec::with_capacity(16 + 32 * (self.pseudo_outs.len() + 3 * self.ecdh_info.len()));
        write_varint(&mut out, u8::from(self.rct_type) as u64);
        write_varint(&mut out, self.fee);

        if self.rct_type == RctType::Simple {
            for pseudo_out in &self.pseudo_outs {
                out.extend_from_slice(pseudo_out.as_bytes());
            }
        }
        for ecdh in &self.ecdh_info {
            out.extend_from_slice(ecdh.mask.as_bytes());
            out.extend_from_slice(ecdh.amount.as_bytes());
        }
        for commitment in &self.out_pk {
            out.extend_from_slice(commitment.as_bytes());
        }

        trace!("serialized rct base: {} bytes", out.len());
        Ok(out)
    }
}

impl RctsigPrunable {
    /// Serialize the range proofs: per proof `s0 || s1 || ee || Ci`, raw.
    pub fn serialize_range_proofs(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.range_sigs.len() * (3 * RANGE_BITS + 1) * 32);
        for sig in &self.range_sigs {
            for key in sig.asig.s0.iter().chain(&sig.asig.s1) {
                out.extend_from_slice(key.as_bytes());
            }
            out.extend_from_slice(sig.asig.ee.as_bytes());
            for key in &sig.ci {
                out.extend_from_slice(key.as_bytes());
            }
        }
        out
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn varint(&mut self) -> Result<u64, TxError> {
        let (value, used) = read_varint(&self.bytes[self.pos..])?;
        self.pos += used;
        Ok(value)
    }

    fn len(&mut self) -> Result<usize, TxError> {
        let value = self.varint()?;
        usize::try_from(value)
            .map_err(|_| TxError::InvalidEncoding(format!("length {} too large", value)))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], TxError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| TxError::InvalidEncoding("unexpected end of prefix".to_string()))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn tag(&mut self, expected: u8, what: &str) -> Result<(), TxError> {
        let tag = self.take(1)?[0];
        if tag != expected {
            return Err(TxError::InvalidEncoding(format!(
                "unsupported {} tag 0x{:02x}",
                what, tag
            )));
        }
        Ok(())
    }

    fn key(&mut self) -> Result<Key, TxError> {
        Ok(Key::try_from(self.take(32)?)?)
    }
}
