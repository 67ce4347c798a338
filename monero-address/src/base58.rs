//! Monero's block base58.
//!
//! Unlike Bitcoin's base58, the input is cut into 8-byte blocks and each
//! block is encoded independently into a fixed number of characters, so the
//! encoded length depends only on the input length.
//!
//! ```text
//! bytes in block:   0  1  2  3  4  5  6  7  8
//! chars in block:   0  2  3  5  6  7  9 10 11
//! ```

use crate::AddressError;

/// The base58 alphabet (no `0`, `O`, `I`, `l`).
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Bytes per full block.
pub const FULL_BLOCK_SIZE: usize = 8;

/// Characters per full encoded block.
pub const FULL_ENCODED_BLOCK_SIZE: usize = 11;

/// Encoded size indexed by the number of bytes in a block.
const ENCODED_BLOCK_SIZES: [usize; FULL_BLOCK_SIZE + 1] = [0, 2, 3, 5, 6, 7, 9, 10, 11];

/// Number of bytes a block of `encoded_len` characters decodes to.
fn decoded_block_size(encoded_len: usize) -> Option<usize> {
    ENCODED_BLOCK_SIZES
        .iter()
        .position(|&size| size == encoded_len)
        .filter(|&size| size > 0)
}

fn digit_value(c: u8) -> Option<u64> {
    ALPHABET.iter().position(|&a| a == c).map(|p| p as u64)
}

fn encode_block(block: &[u8], out: &mut String) {
    let size = ENCODED_BLOCK_SIZES[block.len()];
    let mut num = block.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

    // Left-padded with the zero digit.
    let mut chars = vec![ALPHABET[0]; size];
    let mut i = size;
    while num > 0 && i > 0 {
        i -= 1;
        chars[i] = ALPHABET[(num % 58) as usize];
        num /= 58;
    }
    out.extend(chars.iter().map(|&c| c as char));
}

fn decode_block(chunk: &[u8], out: &mut Vec<u8>) -> Result<(), AddressError> {
    let size = decoded_block_size(chunk.len()).ok_or_else(|| {
        AddressError::InvalidEncoding(format!("invalid block length {}", chunk.len()))
    })?;

    // 58^11 fits in a u128.
    let mut num: u128 = 0;
    for &c in chunk {
        let digit = digit_value(c).ok_or_else(|| {
            AddressError::InvalidEncoding(format!("invalid base58 character {:?}", c as char))
        })?;
        num = num * 58 + u128::from(digit);
    }

    if num > u128::from(u64::MAX) || (size < FULL_BLOCK_SIZE && num >> (8 * size) != 0) {
        return Err(AddressError::BlockOverflow);
    }

    let bytes = (num as u64).to_be_bytes();
    out.extend_from_slice(&bytes[FULL_BLOCK_SIZE - size..]);
    Ok(())
}

/// Encode bytes as block base58.
pub fn encode(data: &[u8]) -> String {
    let full_blocks = data.len() / FULL_BLOCK_SIZE;
    let mut out = String::with_capacity(
        full_blocks * FULL_ENCODED_BLOCK_SIZE
            + ENCODED_BLOCK_SIZES[data.len() % FULL_BLOCK_SIZE],
    );
    for block in data.chunks(FULL_BLOCK_SIZE) {
        encode_block(block, &mut out);
    }
    out
}

/// Decode block base58 text.
pub fn decode(text: &str) -> Result<Vec<u8>, AddressError> {
    let bytes = text.as_bytes();
    let tail = bytes.len() % FULL_ENCODED_BLOCK_SIZE;
    if tail != 0 && decoded_block_size(tail).is_none() {
        return Err(AddressError::InvalidEncoding(format!(
            "invalid trailing block length {}",
            tail
        )));
    }

    let mut out = Vec::with_capacity(bytes.len() / FULL_ENCODED_BLOCK_SIZE * FULL_BLOCK_SIZE + 8);
    for chunk in bytes.chunks(FULL_ENCODED_BLOCK_SIZE) {
        decode_block(chunk, &mut out)?;
    }
    Ok(out)
}
