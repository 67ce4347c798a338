//! 25-word mnemonic seeds.
//!
//! Each 4-byte little-endian chunk `x` of the secret maps to three words:
//! ```text
//! w1 = x mod N
//! w2 = (x / N + w1) mod N
//! w3 = (x / N / N + w2) mod N
//! ```
//! with `N = 1626`. The 25th word repeats one of the 24 data words, chosen
//! by the CRC-32 of their three-letter prefixes.

use log::debug;
use monero_crypto::Key;

use crate::wordlist::{wordlist, WordList, WORDLIST_SIZE};
use crate::MnemonicError;

/// Number of data words.
pub const SEED_WORDS: usize = 24;

/// Number of words in a full mnemonic, checksum included.
pub const MNEMONIC_WORDS: usize = SEED_WORDS + 1;

/// Length of the word prefix fed to the checksum.
const CHECKSUM_PREFIX_LEN: usize = 3;

/// Index of the data word repeated as the checksum word, or `None` for an
/// empty slice.
pub fn checksum_index<S: AsRef<str>>(words: &[S]) -> Option<usize> {
    let prefixes: String = words
        .iter()
        .flat_map(|w| w.as_ref().chars().take(CHECKSUM_PREFIX_LEN))
        .collect();
    (crc32fast::hash(prefixes.as_bytes()) as usize).checked_rem(words.len())
}

/// Encode a 32-byte secret as a 25-word mnemonic using `list`.
pub fn secret_to_mnemonic_with(list: &WordList, secret: &Key) -> String {
    let n = WORDLIST_SIZE as u64;
    let mut words: Vec<&str> = Vec::with_capacity(MNEMONIC_WORDS);

    for chunk in secret.as_bytes().chunks_exact(4) {
        let x = u64::from(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        let w1 = x % n;
        let w2 = (x / n + w1) % n;
        let w3 = (x / n / n + w2) % n;
        for w in [w1, w2, w3] {
            words.push(&list.words[w as usize]);
        }
    }

    let checksum = checksum_index(&words).map(|i| words[i]);
    words.extend(checksum);
    words.join(" ")
}

/// Encode a 32-byte secret with the installed dictionary.
pub fn secret_to_mnemonic(secret: &Key) -> Result<String, MnemonicError> {
    Ok(secret_to_mnemonic_with(wordlist()?, secret))
}

/// Decode a 25-word mnemonic back to its secret using `list`.
pub fn mnemonic_to_secret_with(list: &WordList, phrase: &str) -> Result<Key, MnemonicError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() != MNEMONIC_WORDS {
        return Err(MnemonicError::InvalidLength {
            expected: MNEMONIC_WORDS,
            actual: words.len(),
        });
    }

    let mut indices = [0u64; SEED_WORDS];
    for (slot, word) in indices.iter_mut().zip(&words[..SEED_WORDS]) {
        *slot = list
            .index_of(word)
            .ok_or_else(|| MnemonicError::InvalidEncoding(format!("unknown word '{}'", word)))?
            as u64;
    }

    let data = &words[..SEED_WORDS];
    if checksum_index(data).map(|i| data[i]) != Some(words[SEED_WORDS]) {
        debug!("mnemonic checksum word mismatch");
        return Err(MnemonicError::ChecksumMismatch);
    }

    let n = WORDLIST_SIZE as u64;
    let mut secret = [0u8; 32];
    for (chunk, triple) in secret.chunks_exact_mut(4).zip(indices.chunks_exact(3)) {
        let (w1, w2, w3) = (triple[0], triple[1], triple[2]);
        let x = w1 + n * ((n + w2 - w1) % n) + n * n * ((n + w3 - w2) % n);
        let x = u32::try_from(x)
            .map_err(|_| MnemonicError::InvalidEncoding("word triple out of range".to_string()))?;
        chunk.copy_from_slice(&x.to_le_bytes());
    }

    Ok(Key::new(secret))
}

/// Decode a 25-word mnemonic with the installed dictionary.
pub fn mnemonic_to_secret(phrase: &str) -> Result<Key, MnemonicError> {
    mnemonic_to_secret_with(wordlist()?, phrase)
}
