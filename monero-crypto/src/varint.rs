//! Variable-length unsigned integers.
//!
//! Little-endian base-128: seven value bits per byte, high bit set on every
//! byte except the last. A `u64` needs at most 10 bytes.

use crate::CryptoError;

/// Longest valid encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Append the encoding of `value` to `out`.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Encode `value` into a fresh buffer.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    write_varint(&mut out, value);
    out
}

/// Decode a varint from the front of `data`.
///
/// Returns the value and the number of bytes consumed. Fails when the input
/// ends before a terminating byte, when no terminator appears within
/// [`MAX_VARINT_LEN`] bytes, or when the value does not fit in a `u64`.
pub fn read_varint(data: &[u8]) -> Result<(u64, usize), CryptoError> {
    let mut value: u64 = 0;

    for (i, &byte) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            break;
        }

        let bits = u64::from(byte & 0x7f);
        let shift = 7 * i as u32;

        // The tenth byte carries only bit 63.
        if i == MAX_VARINT_LEN - 1 && bits > 1 {
            return Err(CryptoError::InvalidEncoding(
                "varint overflows 64 bits".to_string(),
            ));
        }

        value |= bits << shift;

        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    if data.len() < MAX_VARINT_LEN {
        Err(CryptoError::InvalidEncoding(
            "varint truncated before terminating byte".to_string(),
        ))
    } else {
        Err(CryptoError::InvalidEncoding(format!(
            "varint has no terminator within {} bytes",
            MAX_VARINT_LEN
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_vectors() {
        assert_eq!(encode_varint(0), vec![0x00]);
        assert_eq!(encode_varint(127), vec![0x7f]);
        assert_eq!(encode_varint(128), vec![0x80, 0x01]);
        assert_eq!(encode_varint(300), vec![0xac, 0x02]);
        assert_eq!(encode_varint(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn test_roundtrip_boundaries() {
        let values = [
            0,
            1,
            127,
            128,
            16_383,
            16_384,
            u32::MAX as u64,
            1 << 56,
            u64::MAX - 1,
            u64::MAX,
        ];
        for value in values {
            let encoded = encode_varint(value);
            let (decoded, used) = read_varint(&encoded).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(used, encoded.len());
        }
    }

    #[test]
    fn test_read_ignores_trailing_bytes() {
        let mut buf = encode_varint(1000);
        buf.extend_from_slice(&[0xff, 0xff]);
        let (value, used) = read_varint(&buf).unwrap();
        assert_eq!(value, 1000);
        assert_eq!(used, 2);
    }

    #[test]
    fn test_no_terminator_within_ten_bytes() {
        let data = [0xffu8; 11];
        assert!(matches!(
            read_varint(&data),
            Err(CryptoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_truncated_input() {
        assert!(read_varint(&[]).is_err());
        assert!(read_varint(&[0x80, 0x80]).is_err());
    }

    #[test]
    fn test_overflow_in_tenth_byte() {
        let mut data = vec![0xffu8; 9];
        data.push(0x02);
        assert!(matches!(
            read_varint(&data),
            Err(CryptoError::InvalidEncoding(_))
        ));
    }
}
