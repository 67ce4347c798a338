//! Core types for Monero addresses.

use monero_crypto::Key;
use serde::{Deserialize, Serialize};

use crate::AddressError;

/// Network an address belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Monero mainnet.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
    /// Staging network.
    Stagenet,
}

/// Whether an address is an account's primary address or a subaddress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Primary,
    Subaddress,
}

impl AddressKind {
    /// Pick the kind from a subaddress flag.
    pub fn from_subaddress(is_subaddress: bool) -> Self {
        if is_subaddress {
            AddressKind::Subaddress
        } else {
            AddressKind::Primary
        }
    }

    pub fn is_subaddress(&self) -> bool {
        matches!(self, AddressKind::Subaddress)
    }
}

impl Network {
    /// All supported networks.
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Stagenet];

    /// Network byte of a primary address.
    pub fn primary_byte(&self) -> u8 {
        match self {
            Network::Mainnet => crate::MAINNET_PRIMARY,
            Network::Testnet => crate::TESTNET_PRIMARY,
            Network::Stagenet => crate::STAGENET_PRIMARY,
        }
    }

    /// Network byte of a subaddress.
    pub fn subaddress_byte(&self) -> u8 {
        match self {
            Network::Mainnet => crate::MAINNET_SUBADDRESS,
            Network::Testnet => crate::TESTNET_SUBADDRESS,
            Network::Stagenet => crate::STAGENET_SUBADDRESS,
        }
    }

    /// Network byte for an address of `kind`.
    pub fn network_byte(&self, kind: AddressKind) -> u8 {
        match kind {
            AddressKind::Primary => self.primary_byte(),
            AddressKind::Subaddress => self.subaddress_byte(),
        }
    }

    /// The kind of address `byte` denotes on this network, if any.
    pub fn kind_of(&self, byte: u8) -> Option<AddressKind> {
        if byte == self.primary_byte() {
            Some(AddressKind::Primary)
        } else if byte == self.subaddress_byte() {
            Some(AddressKind::Subaddress)
        } else {
            None
        }
    }

    /// Find the network and kind of a network byte across all networks.
    pub fn from_network_byte(byte: u8) -> Option<(Network, AddressKind)> {
        Network::ALL
            .iter()
            .find_map(|network| network.kind_of(byte).map(|kind| (*network, kind)))
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "stagenet" => Ok(Network::Stagenet),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}

/// A decoded Monero address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Network this address belongs to.
    pub network: Network,
    /// Primary address or subaddress.
    pub kind: AddressKind,
    /// Public spend key.
    pub spend_public_key: Key,
    /// Public view key.
    pub view_public_key: Key,
}

impl Address {
    /// Create a new address.
    pub fn new(network: Network, kind: AddressKind, spend_public_key: Key, view_public_key: Key) -> Self {
        Self {
            network,
            kind,
            spend_public_key,
            view_public_key,
        }
    }

    /// Leading byte of the binary form.
    pub fn network_byte(&self) -> u8 {
        self.network.network_byte(self.kind)
    }

    pub fn is_subaddress(&self) -> bool {
        self.kind.is_subaddress()
    }

    /// Fail unless this address is on `expected`.
    pub fn require_network(&self, expected: Network) -> Result<(), AddressError> {
        if self.network != expected {
            return Err(AddressError::NetworkMismatch {
                expected,
                actual: self.network,
            });
        }
        Ok(())
    }
}
