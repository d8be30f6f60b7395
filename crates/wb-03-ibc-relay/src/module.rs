//! # Port Module
//!
//! Entry point the protocol engine calls. Callbacks arrive keyed by port id;
//! the module resolves the owning contract from the port, assembles the
//! contract-facing message and forwards to an [`IbcContractHandler`].

use crate::domain::{
    Acknowledged, IbcChannel, IbcChannelCloseMsg, IbcChannelConnectMsg, IbcChannelOpenMsg,
    IbcPacketAckMsg, IbcPacketReceiveMsg, IbcPacketTimeoutMsg, Relayed,
};
use crate::errors::RelayError;
use crate::ports::IbcContractHandler;
use shared_types::{contract_from_port_id, Address, ChannelOrder, Context, IbcEndpoint, Packet};
use std::sync::Arc;
use tracing::trace;
use wb_02_message_dispatch::ports::ChannelKeeper;

/// Handshake parameters common to open-init and open-try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOpening {
    /// Ordering requested.
    pub order: ChannelOrder,
    /// Connection hops.
    pub connection_hops: Vec<String>,
    /// Local port.
    pub port_id: String,
    /// Local channel.
    pub channel_id: String,
    /// Remote side.
    pub counterparty: IbcEndpoint,
    /// Proposed version.
    pub version: String,
}

impl ChannelOpening {
    fn channel(&self) -> IbcChannel {
        IbcChannel {
            endpoint: IbcEndpoint::new(self.port_id.clone(), self.channel_id.clone()),
            counterparty_endpoint: self.counterparty.clone(),
            order: self.order,
            version: self.version.clone(),
            connection_id: self.connection_hops.first().cloned().unwrap_or_default(),
        }
    }
}

/// Routes protocol-engine callbacks on `wasm.` ports to contracts.
#[derive(Clone)]
pub struct IbcContractModule {
    handler: Arc<dyn IbcContractHandler>,
    channels: Arc<dyn ChannelKeeper>,
}

impl IbcContractModule {
    /// Creates the module.
    pub fn new(handler: Arc<dyn IbcContractHandler>, channels: Arc<dyn ChannelKeeper>) -> Self {
        Self { handler, channels }
    }

    /// Handshake init. Returns the negotiated version.
    pub fn on_chan_open_init(&self, ctx: &Context, opening: &ChannelOpening) -> Result<String, RelayError> {
        let contract = contract_from_port_id(&opening.port_id)?;
        let msg = IbcChannelOpenMsg::OpenInit {
            channel: opening.channel(),
        };
        let version = self.handler.on_open_channel(ctx, &contract, &msg)?;
        Ok(or_proposed(version, &opening.version))
    }

    /// Handshake try. Returns the negotiated version; when the contract has no
    /// preference, the counterparty's version is accepted.
    pub fn on_chan_open_try(
        &self,
        ctx: &Context,
        opening: &ChannelOpening,
        counterparty_version: &str,
    ) -> Result<String, RelayError> {
        let contract = contract_from_port_id(&opening.port_id)?;
        let msg = IbcChannelOpenMsg::OpenTry {
            channel: opening.channel(),
            counterparty_version: counterparty_version.to_string(),
        };
        let version = self.handler.on_open_channel(ctx, &contract, &msg)?;
        Ok(or_proposed(version, counterparty_version))
    }

    /// Handshake ack.
    pub fn on_chan_open_ack(
        &self,
        ctx: &Context,
        port_id: &str,
        channel_id: &str,
        counterparty_channel_id: &str,
        counterparty_version: &str,
    ) -> Result<Relayed, RelayError> {
        let contract = contract_from_port_id(port_id)?;
        let mut channel = self.channel(ctx, port_id, channel_id)?;
        channel.counterparty_endpoint.channel_id = counterparty_channel_id.to_string();
        channel.version = counterparty_version.to_string();
        let msg = IbcChannelConnectMsg::OpenAck {
            channel,
            counterparty_version: counterparty_version.to_string(),
        };
        self.handler.on_connect_channel(ctx, &contract, &msg)
    }

    /// Handshake confirm.
    pub fn on_chan_open_confirm(
        &self,
        ctx: &Context,
        port_id: &str,
        channel_id: &str,
    ) -> Result<Relayed, RelayError> {
        let contract = contract_from_port_id(port_id)?;
        let msg = IbcChannelConnectMsg::OpenConfirm {
            channel: self.channel(ctx, port_id, channel_id)?,
        };
        self.handler.on_connect_channel(ctx, &contract, &msg)
    }

    /// Close initiated on this side.
    pub fn on_chan_close_init(
        &self,
        ctx: &Context,
        port_id: &str,
        channel_id: &str,
    ) -> Result<Relayed, RelayError> {
        let contract = contract_from_port_id(port_id)?;
        let msg = IbcChannelCloseMsg::CloseInit {
            channel: self.channel(ctx, port_id, channel_id)?,
        };
        self.handler.on_close_channel(ctx, &contract, &msg)
    }

    /// Close initiated by the counterparty.
    pub fn on_chan_close_confirm(
        &self,
        ctx: &Context,
        port_id: &str,
        channel_id: &str,
    ) -> Result<Relayed, RelayError> {
        let contract = contract_from_port_id(port_id)?;
        let msg = IbcChannelCloseMsg::CloseConfirm {
            channel: self.channel(ctx, port_id, channel_id)?,
        };
        self.handler.on_close_channel(ctx, &contract, &msg)
    }

    /// Packet addressed to a contract port.
    pub fn on_recv_packet(
        &self,
        ctx: &Context,
        packet: &Packet,
        relayer: &Address,
    ) -> Result<Acknowledged, RelayError> {
        let contract = contract_from_port_id(&packet.destination.port_id)?;
        let msg = IbcPacketReceiveMsg {
            packet: packet.clone(),
            relayer: relayer.clone(),
        };
        self.handler.on_recv_packet(ctx, &contract, &msg)
    }

    /// Acknowledgement of a packet sent from a contract port.
    pub fn on_acknowledgement_packet(
        &self,
        ctx: &Context,
        packet: &Packet,
        acknowledgement: &[u8],
        relayer: &Address,
    ) -> Result<Relayed, RelayError> {
        let contract = contract_from_port_id(&packet.source.port_id)?;
        let msg = IbcPacketAckMsg {
            acknowledgement: acknowledgement.to_vec(),
            original_packet: packet.clone(),
            relayer: relayer.clone(),
        };
        self.handler.on_ack_packet(ctx, &contract, &msg)
    }

    /// Timeout of a packet sent from a contract port.
    pub fn on_timeout_packet(
        &self,
        ctx: &Context,
        packet: &Packet,
        relayer: &Address,
    ) -> Result<Relayed, RelayError> {
        let contract = contract_from_port_id(&packet.source.port_id)?;
        let msg = IbcPacketTimeoutMsg {
            packet: packet.clone(),
            relayer: relayer.clone(),
        };
        self.handler.on_timeout_packet(ctx, &contract, &msg)
    }

    fn channel(&self, ctx: &Context, port_id: &str, channel_id: &str) -> Result<IbcChannel, RelayError> {
        let info = self
            .channels
            .get_channel(ctx, port_id, channel_id)
            .ok_or_else(|| RelayError::ChannelNotFound {
                port_id: port_id.to_string(),
                channel_id: channel_id.to_string(),
            })?;
        trace!(port = port_id, channel = channel_id, state = ?info.state, "loaded channel");
        Ok(IbcChannel {
            endpoint: IbcEndpoint::new(port_id, channel_id),
            counterparty_endpoint: info.counterparty,
            order: info.ordering,
            version: info.version,
            connection_id: info.connection_hops.into_iter().next().unwrap_or_default(),
        })
    }
}

fn or_proposed(version: String, proposed: &str) -> String {
    if version.is_empty() {
        proposed.to_string()
    } else {
        version
    }
}
