//! # Callback Messages
//!
//! What the relay hands to a contract's protocol entry points.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, ChannelOrder, IbcEndpoint, Packet};

/// Channel as seen by a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcChannel {
    /// Local side, always a port owned by the contract.
    pub endpoint: IbcEndpoint,
    /// Remote side.
    pub counterparty_endpoint: IbcEndpoint,
    /// Ordering.
    pub order: ChannelOrder,
    /// Proposed or negotiated version.
    pub version: String,
    /// First connection hop.
    pub connection_id: String,
}

/// Handshake steps that let the contract pick a version.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbcChannelOpenMsg {
    OpenInit {
        channel: IbcChannel,
    },
    OpenTry {
        channel: IbcChannel,
        counterparty_version: String,
    },
}

/// Handshake steps that finish opening a channel.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbcChannelConnectMsg {
    OpenAck {
        channel: IbcChannel,
        counterparty_version: String,
    },
    OpenConfirm {
        channel: IbcChannel,
    },
}

/// Steps that close a channel for good.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbcChannelCloseMsg {
    CloseInit { channel: IbcChannel },
    CloseConfirm { channel: IbcChannel },
}

macro_rules! channel_accessor {
    ($ty:ident, $($variant:ident),+) => {
        impl $ty {
            /// Channel the callback is about.
            #[must_use]
            pub fn channel(&self) -> &IbcChannel {
                match self {
                    $(Self::$variant { channel, .. } => channel,)+
                }
            }
        }
    };
}

channel_accessor!(IbcChannelOpenMsg, OpenInit, OpenTry);
channel_accessor!(IbcChannelConnectMsg, OpenAck, OpenConfirm);
channel_accessor!(IbcChannelCloseMsg, CloseInit, CloseConfirm);

/// Incoming packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcPacketReceiveMsg {
    /// The packet.
    pub packet: Packet,
    /// Relayer that delivered it.
    pub relayer: Address,
}

/// Acknowledgement of a packet this contract sent.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcPacketAckMsg {
    /// Acknowledgement bytes written by the counterparty.
    #[serde_as(as = "Hex")]
    pub acknowledgement: Vec<u8>,
    /// The packet being acknowledged.
    pub original_packet: Packet,
    /// Relayer that delivered the ack.
    pub relayer: Address,
}

/// Timeout of a packet this contract sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcPacketTimeoutMsg {
    /// The expired packet.
    pub packet: Packet,
    /// Relayer that proved the timeout.
    pub relayer: Address,
}
