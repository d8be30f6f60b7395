//! # IBC Primitives
//!
//! Channel and packet identifiers shared by the packet-send handler and the
//! relay. Port identifiers are namespaced per contract (`wasm.<address>`), so
//! two contracts never share a port.

use crate::entities::Address;
use crate::errors::AddressError;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// Prefix of every contract-owned port.
pub const CONTRACT_PORT_PREFIX: &str = "wasm.";

/// Port id owned by a contract.
#[must_use]
pub fn port_id_for_contract(contract: &Address) -> String {
    format!("{CONTRACT_PORT_PREFIX}{}", contract.to_hex())
}

/// Reverse of [`port_id_for_contract`].
pub fn contract_from_port_id(port_id: &str) -> Result<Address, AddressError> {
    let raw = port_id
        .strip_prefix(CONTRACT_PORT_PREFIX)
        .ok_or_else(|| AddressError::InvalidPortId(port_id.to_string()))?;
    Address::from_hex(raw).map_err(|_| AddressError::InvalidPortId(port_id.to_string()))
}

/// Path under which the capability for a channel is registered.
#[must_use]
pub fn channel_capability_path(port_id: &str, channel_id: &str) -> String {
    format!("capabilities/ports/{port_id}/channels/{channel_id}")
}

/// One side of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IbcEndpoint {
    /// Port identifier.
    pub port_id: String,
    /// Channel identifier.
    pub channel_id: String,
}

impl IbcEndpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(port_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

/// Block-height bound of a packet timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IbcTimeoutBlock {
    /// Revision (chain upgrade epoch) of the counterparty.
    pub revision: u64,
    /// Height on the counterparty.
    pub height: u64,
}

/// Packet timeout. Either bound, or both, may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IbcTimeout {
    /// Height bound.
    pub block: Option<IbcTimeoutBlock>,
    /// Timestamp bound in nanoseconds.
    pub timestamp: Option<u64>,
}

impl IbcTimeout {
    /// Timeout at a counterparty height.
    #[must_use]
    pub fn at_height(revision: u64, height: u64) -> Self {
        Self {
            block: Some(IbcTimeoutBlock { revision, height }),
            timestamp: None,
        }
    }

    /// Timeout at a timestamp.
    #[must_use]
    pub fn at_timestamp(nanos: u64) -> Self {
        Self {
            block: None,
            timestamp: Some(nanos),
        }
    }

    /// Returns true if at least one bound is set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.block.is_some_and(|b| b.height > 0) || self.timestamp.is_some_and(|t| t > 0)
    }
}

/// Channel lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    /// Handshake started locally.
    Init,
    /// Handshake answered.
    TryOpen,
    /// Usable.
    Open,
    /// Closed for good. Channel ids are never reused.
    Closed,
}

/// Packet ordering guarantee of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    /// Packets may be delivered in any order.
    Unordered,
    /// Packets are delivered in sequence order.
    Ordered,
}

/// Channel descriptor held by the protocol engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Lifecycle state.
    pub state: ChannelState,
    /// Ordering.
    pub ordering: ChannelOrder,
    /// The other side.
    pub counterparty: IbcEndpoint,
    /// Connection hops.
    pub connection_hops: Vec<String>,
    /// Negotiated application version.
    pub version: String,
}

/// A packet as submitted to the protocol engine.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Per-(port,channel) sequence number.
    pub sequence: u64,
    /// Sending side.
    pub source: IbcEndpoint,
    /// Receiving side.
    pub destination: IbcEndpoint,
    /// Opaque payload.
    #[serde_as(as = "Hex")]
    pub data: Vec<u8>,
    /// Timeout bounds.
    pub timeout: IbcTimeout,
}

/// Unforgeable proof of ownership over a named resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capability {
    index: u64,
}

impl Capability {
    /// Only capability registries mint capabilities.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }

    /// Registry index.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }
}
