//! Address serialization.

use log::trace;
use monero_crypto::{HashOps, Key, Keccak};

use crate::{base58, Address, AddressKind, Network, ADDRESS_BYTES, CHECKSUM_SIZE};

/// Encodes and decodes addresses for one network.
///
/// The hash backend defaults to Keccak-256; the checksum is the first four
/// bytes of its unreduced digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressCodec<H = Keccak> {
    pub(crate) network: Network,
    pub(crate) hasher: H,
}

impl AddressCodec<Keccak> {
    /// Codec for `network` with the default hash.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            hasher: Keccak,
        }
    }

    pub fn mainnet() -> Self {
        Self::new(Network::Mainnet)
    }
}

impl<H: HashOps> AddressCodec<H> {
    /// Codec for `network` with a caller-supplied hash backend.
    pub fn with_hasher(network: Network, hasher: H) -> Self {
        Self { network, hasher }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Encode a key pair as a 95-character address string.
    pub fn encode(&self, spend_public_key: &Key, view_public_key: &Key, kind: AddressKind) -> String {
        let address = Address::new(self.network, kind, *spend_public_key, *view_public_key);
        self.encode_address(&address)
    }

    /// Encode an [`Address`]. The address's own network byte is used.
    pub fn encode_address(&self, address: &Address) -> String {
        let bytes = address_to_bytes(&self.hasher, address);
        let encoded = base58::encode(&bytes);
        trace!("encoded {:?} address {}", address.kind, encoded);
        encoded
    }
}

/// Serialize an address to its 69-byte binary form.
///
/// # Format
/// ```text
/// [network_byte:1][spend_key:32][view_key:32][checksum:4]
/// ```
pub fn address_to_bytes<H: HashOps>(hasher: &H, address: &Address) -> [u8; ADDRESS_BYTES] {
    let mut bytes = [0u8; ADDRESS_BYTES];
    bytes[0] = address.network_byte();
    bytes[1..33].copy_from_slice(address.spend_public_key.as_bytes());
    bytes[33..65].copy_from_slice(address.view_public_key.as_bytes());

    let checksum = compute_checksum(hasher, &bytes[..ADDRESS_BYTES - CHECKSUM_SIZE]);
    bytes[ADDRESS_BYTES - CHECKSUM_SIZE..].copy_from_slice(&checksum);
    bytes
}

/// First four bytes of the unreduced hash of `payload`.
pub fn compute_checksum<H: HashOps>(hasher: &H, payload: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let hash = hasher.hash_no_reduce(payload);
    let mut checksum = [0u8; CHECKSUM_SIZE];
    checksum.copy_from_slice(&hash[..CHECKSUM_SIZE]);
    checksum
}

/// Encode a mainnet address, as a primary address or a subaddress.
pub fn encode_address(spend_public_key: &Key, view_public_key: &Key, is_subaddress: bool) -> String {
    AddressCodec::mainnet().encode(
        spend_public_key,
        view_public_key,
        AddressKind::from_subaddress(is_subaddress),
    )
}
