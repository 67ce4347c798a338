//! The 32-byte key type shared by every crate in the workspace.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// A 32-byte value: a scalar (private key, mask, hash) or a compressed
/// Ed25519 point (public key, commitment, key image).
///
/// Which one it is depends on where it is used. Text form is 64 lowercase
/// hex characters.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Zeroize)]
pub struct Key(pub [u8; 32]);

impl Key {
    /// The all-zero key (the scalar 0).
    pub const ZERO: Key = Key([0u8; 32]);

    /// The compressed identity point (and the scalar 1).
    pub const IDENTITY: Key = Key([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0,
    ]);

    /// Create from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy out the raw bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Convert to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string holding exactly 32 bytes.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(hex_str)?;
        Self::try_from(bytes.as_slice())
    }

    /// Encode a small integer as a little-endian scalar.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }
}

impl From<[u8; 32]> for Key {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.to_hex())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Key::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Concatenate the hex text of a run of keys.
pub(crate) fn keys_to_hex(keys: &[Key]) -> String {
    let mut out = String::with_capacity(keys.len() * 64);
    for key in keys {
        out.push_str(&key.to_hex());
    }
    out
}

/// Split decoded bytes into exactly `N` keys.
pub(crate) fn keys_from_bytes<const N: usize>(bytes: &[u8]) -> Result<[Key; N], CryptoError> {
    if bytes.len() != N * 32 {
        return Err(CryptoError::InvalidLength {
            expected: N * 32,
            actual: bytes.len(),
        });
    }
    let mut keys = [Key::ZERO; N];
    for (key, chunk) in keys.iter_mut().zip(bytes.chunks_exact(32)) {
        key.0.copy_from_slice(chunk);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_hex_roundtrip() {
        let key = Key::new([0xab; 32]);
        let hex = key.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(Key::from_hex(&hex).unwrap(), key);
    }

    #[test]
    fn test_key_from_hex_wrong_length() {
        let result = Key::from_hex("0102030405");
        assert!(matches!(
            result,
            Err(CryptoError::InvalidLength {
                expected: 32,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_key_from_hex_not_hex() {
        let result = Key::from_hex(&"zz".repeat(32));
        assert!(matches!(result, Err(CryptoError::InvalidHex(_))));
    }

    #[test]
    fn test_key_serde_is_lowercase_hex() {
        let key = Key::new([0xCD; 32]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", "cd".repeat(32)));

        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_key_serde_rejects_short_hex() {
        let result: Result<Key, _> = serde_json::from_str("\"abcd\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_u64_little_endian() {
        let key = Key::from_u64(0x0102);
        assert_eq!(key.0[0], 0x02);
        assert_eq!(key.0[1], 0x01);
        assert!(key.0[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_keys_from_bytes_exact_length() {
        let bytes = vec![7u8; 3 * 32];
        let keys: [Key; 3] = keys_from_bytes(&bytes).unwrap();
        assert_eq!(keys[2], Key::new([7u8; 32]));

        let short: Result<[Key; 3], _> = keys_from_bytes(&bytes[..95]);
        assert!(short.is_err());
    }
}
