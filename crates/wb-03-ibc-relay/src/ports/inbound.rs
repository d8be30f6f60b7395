//! # Driving Ports (API - Inbound)

use crate::domain::{
    Acknowledged, IbcChannelCloseMsg, IbcChannelConnectMsg, IbcChannelOpenMsg, IbcPacketAckMsg,
    IbcPacketReceiveMsg, IbcPacketTimeoutMsg, Relayed,
};
use crate::errors::RelayError;
use shared_types::{Address, Context};

/// Contract side of the channel/packet lifecycle.
///
/// No relay-local state is kept between calls; the protocol engine owns the
/// channel and packet registry.
pub trait IbcContractHandler: Send + Sync {
    /// Handshake init/try. Returns the version chosen by the contract, empty
    /// when it has no preference.
    fn on_open_channel(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcChannelOpenMsg,
    ) -> Result<String, RelayError>;

    /// Handshake ack/confirm.
    fn on_connect_channel(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcChannelConnectMsg,
    ) -> Result<Relayed, RelayError>;

    /// Channel close init/confirm.
    fn on_close_channel(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcChannelCloseMsg,
    ) -> Result<Relayed, RelayError>;

    /// Packet delivery. No acknowledgement on failure.
    fn on_recv_packet(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcPacketReceiveMsg,
    ) -> Result<Acknowledged, RelayError>;

    /// Acknowledgement of a packet the contract sent.
    fn on_ack_packet(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcPacketAckMsg,
    ) -> Result<Relayed, RelayError>;

    /// Timeout of a packet the contract sent.
    fn on_timeout_packet(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcPacketTimeoutMsg,
    ) -> Result<Relayed, RelayError>;
}
