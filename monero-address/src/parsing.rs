//! Address parsing from strings.

use log::debug;
use monero_crypto::{HashOps, Key, Keccak};

use crate::serialization::compute_checksum;
use crate::{
    base58, Address, AddressCodec, AddressError, AddressKind, Network, ADDRESS_BYTES,
    ADDRESS_CHARS, CHECKSUM_SIZE,
};

impl<H: HashOps> AddressCodec<H> {
    /// Decode an address of this codec's network.
    ///
    /// Checks, in order: the text length, the base58 blocks, the network
    /// byte, and the checksum.
    pub fn decode(&self, address_str: &str) -> Result<Address, AddressError> {
        let bytes = decode_raw(address_str)?;
        let kind = self
            .network
            .kind_of(bytes[0])
            .ok_or(AddressError::InvalidNetworkByte(bytes[0]))?;
        finish(&self.hasher, &bytes, self.network, kind)
    }
}

/// Length check and base58 decode.
fn decode_raw(address_str: &str) -> Result<[u8; ADDRESS_BYTES], AddressError> {
    if address_str.len() != ADDRESS_CHARS {
        return Err(AddressError::InvalidLength {
            expected: ADDRESS_CHARS,
            actual: address_str.len(),
        });
    }

    let decoded = base58::decode(address_str)?;
    decoded
        .as_slice()
        .try_into()
        .map_err(|_| AddressError::InvalidLength {
            expected: ADDRESS_BYTES,
            actual: decoded.len(),
        })
}

/// Checksum check and key extraction.
fn finish<H: HashOps>(
    hasher: &H,
    bytes: &[u8; ADDRESS_BYTES],
    network: Network,
    kind: AddressKind,
) -> Result<Address, AddressError> {
    let (payload, checksum) = bytes.split_at(ADDRESS_BYTES - CHECKSUM_SIZE);
    if compute_checksum(hasher, payload)[..] != *checksum {
        debug!("address checksum mismatch");
        return Err(AddressError::ChecksumMismatch);
    }

    let mut spend = Key::ZERO;
    let mut view = Key::ZERO;
    spend.0.copy_from_slice(&payload[1..33]);
    view.0.copy_from_slice(&payload[33..65]);

    Ok(Address::new(network, kind, spend, view))
}

/// Decode a mainnet address into `(spend_public_key, view_public_key)`.
pub fn decode_address(address_str: &str) -> Result<(Key, Key), AddressError> {
    let address = AddressCodec::mainnet().decode(address_str)?;
    Ok((address.spend_public_key, address.view_public_key))
}

/// Parse an address on any known network, detecting the network from its
/// leading byte.
pub fn parse_address(address_str: &str) -> Result<Address, AddressError> {
    let bytes = decode_raw(address_str)?;
    let (network, kind) =
        Network::from_network_byte(bytes[0]).ok_or(AddressError::InvalidNetworkByte(bytes[0]))?;
    finish(&Keccak, &bytes, network, kind)
}

/// Parse an address and require it to be on `expected_network`.
pub fn parse_address_for_network(
    address_str: &str,
    expected_network: Network,
) -> Result<Address, AddressError> {
    let address = parse_address(address_str)?;
    address.require_network(expected_network)?;
    Ok(address)
}
