//! # Cross-Chain Packet-Send Handler
//!
//! Claims `ibc.send_packet` only. Preconditions are checked in a fixed order
//! and each has its own error:
//!
//! 1. contract has a protocol port
//! 2. channel id is not empty
//! 3. a next sequence exists for the channel
//! 4. a channel descriptor exists
//! 5. the contract holds the channel capability
//!
//! A successful send produces no events and no data.

use crate::domain::{ContractMsg, Dispatched, HandlerOutcome, IbcMsg};
use crate::errors::DispatchError;
use crate::ports::{CapabilityKeeper, ChannelKeeper, Messenger};
use shared_types::{
    channel_capability_path, Address, Context, IbcEndpoint, IbcTimeout, Packet,
};
use std::sync::Arc;
use tracing::debug;

/// Submits contract packets to the protocol engine.
#[derive(Clone)]
pub struct PacketSendHandler {
    channels: Arc<dyn ChannelKeeper>,
    capabilities: Arc<dyn CapabilityKeeper>,
}

impl PacketSendHandler {
    /// Creates the handler.
    pub fn new(channels: Arc<dyn ChannelKeeper>, capabilities: Arc<dyn CapabilityKeeper>) -> Self {
        Self {
            channels,
            capabilities,
        }
    }

    fn send(
        &self,
        ctx: &Context,
        port_id: &str,
        channel_id: &str,
        data: &[u8],
        timeout: IbcTimeout,
    ) -> Result<Dispatched, DispatchError> {
        if port_id.is_empty() {
            return Err(DispatchError::IbcUnsupported);
        }
        if channel_id.is_empty() {
            return Err(DispatchError::EmptyChannel);
        }
        let sequence = self
            .channels
            .next_sequence_send(ctx, port_id, channel_id)
            .ok_or_else(|| DispatchError::SequenceSendNotFound {
                port_id: port_id.to_string(),
                channel_id: channel_id.to_string(),
            })?;
        let channel = self
            .channels
            .get_channel(ctx, port_id, channel_id)
            .ok_or_else(|| DispatchError::ChannelNotFound {
                port_id: port_id.to_string(),
                channel_id: channel_id.to_string(),
            })?;
        let path = channel_capability_path(port_id, channel_id);
        let capability = self
            .capabilities
            .get_capability(ctx, &path)
            .ok_or(DispatchError::CapabilityNotFound { path })?;

        let packet = Packet {
            sequence,
            source: IbcEndpoint::new(port_id, channel_id),
            destination: channel.counterparty,
            data: data.to_vec(),
            timeout,
        };
        debug!(
            port = port_id,
            channel = channel_id,
            sequence,
            "submitting contract packet"
        );
        self.channels.send_packet(ctx, &capability, packet)?;
        Ok(Dispatched::empty(ctx.clone()))
    }
}

impl Messenger for PacketSendHandler {
    fn dispatch_msg(
        &self,
        ctx: &Context,
        _contract: &Address,
        ibc_port: &str,
        msg: &ContractMsg,
    ) -> HandlerOutcome {
        let ContractMsg::Ibc(IbcMsg::SendPacket {
            channel_id,
            data,
            timeout,
        }) = msg
        else {
            return HandlerOutcome::NotMine;
        };
        HandlerOutcome::claimed(self.send(ctx, ibc_port, channel_id, data, *timeout))
    }

    fn name(&self) -> &'static str {
        "ibc_packet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCapabilityKeeper, InMemoryChannelKeeper};
    use crate::domain::{BankMsg, WasmCoin};
    use shared_types::{
        port_id_for_contract, BlockInfo, Capability, ChannelInfo, ChannelOrder, ChannelState,
        GasMeter,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CHANNEL: &str = "channel-0";

    struct Fixture {
        channels: Arc<InMemoryChannelKeeper>,
        capabilities: Arc<InMemoryCapabilityKeeper>,
        handler: PacketSendHandler,
        contract: Address,
        port: String,
    }

    fn fixture() -> Fixture {
        let channels = Arc::new(InMemoryChannelKeeper::new());
        let capabilities = Arc::new(InMemoryCapabilityKeeper::new());
        let handler = PacketSendHandler::new(channels.clone(), capabilities.clone());
        let contract = Address::contract("wasm", 1, 1);
        let port = port_id_for_contract(&contract);
        Fixture {
            channels,
            capabilities,
            handler,
            contract,
            port,
        }
    }

    fn open(f: &Fixture) {
        let cap = f
            .capabilities
            .claim(&channel_capability_path(&f.port, CHANNEL));
        f.channels.open_channel(
            &f.port,
            CHANNEL,
            ChannelInfo {
                state: ChannelState::Open,
                ordering: ChannelOrder::Unordered,
                counterparty: IbcEndpoint::new("wasm.counterparty", "channel-7"),
                connection_hops: vec!["connection-0".into()],
                version: "v1".into(),
            },
            cap,
        );
    }

    fn ctx() -> Context {
        Context::new(BlockInfo::default(), GasMeter::infinite())
    }

    fn send_msg(channel: &str) -> ContractMsg {
        ContractMsg::Ibc(IbcMsg::SendPacket {
            channel_id: channel.into(),
            data: b"payload".to_vec(),
            timeout: IbcTimeout::at_height(2, 300),
        })
    }

    fn failure(outcome: HandlerOutcome) -> DispatchError {
        match outcome {
            HandlerOutcome::Failed(err) => err,
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_port_not_supported() {
        let f = fixture();
        let err = failure(f.handler.dispatch_msg(&ctx(), &f.contract, "", &send_msg(CHANNEL)));
        assert_eq!(err, DispatchError::IbcUnsupported);
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_empty_channel() {
        let f = fixture();
        let err = failure(f.handler.dispatch_msg(&ctx(), &f.contract, &f.port, &send_msg("")));
        assert_eq!(err, DispatchError::EmptyChannel);
    }

    #[test]
    fn test_missing_sequence() {
        let f = fixture();
        let err = failure(
            f.handler
                .dispatch_msg(&ctx(), &f.contract, &f.port, &send_msg(CHANNEL)),
        );
        assert!(matches!(err, DispatchError::SequenceSendNotFound { .. }));
    }

    #[test]
    fn test_missing_capability() {
        let f = fixture();
        open(&f);
        f.capabilities
            .release(&channel_capability_path(&f.port, CHANNEL));
        let err = failure(
            f.handler
                .dispatch_msg(&ctx(), &f.contract, &f.port, &send_msg(CHANNEL)),
        );
        assert!(matches!(err, DispatchError::CapabilityNotFound { .. }));
    }

    #[test]
    fn test_valid_send_uses_counterparty_as_destination() {
        let f = fixture();
        open(&f);
        let outcome = f
            .handler
            .dispatch_msg(&ctx(), &f.contract, &f.port, &send_msg(CHANNEL));
        match outcome {
            HandlerOutcome::Claimed(out) => {
                assert!(out.events.is_empty());
                assert!(out.data.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
        let sent = f.channels.sent_packets();
        assert_eq!(sent.len(), 1);
        let packet = &sent[0];
        assert_eq!(packet.sequence, 1);
        assert_eq!(packet.source, IbcEndpoint::new(f.port.clone(), CHANNEL));
        assert_eq!(
            packet.destination,
            IbcEndpoint::new("wasm.counterparty", "channel-7")
        );
        assert_eq!(packet.data, b"payload".to_vec());
        assert_eq!(packet.timeout, IbcTimeout::at_height(2, 300));
        assert_eq!(
            f.channels.next_sequence_send(&ctx(), &f.port, CHANNEL),
            Some(2)
        );
    }

    /// Keeper whose sequence and descriptor tables can disagree.
    struct SplitKeeper {
        channel: Option<ChannelInfo>,
        reject_with: Option<DispatchError>,
        sends: AtomicUsize,
    }

    impl SplitKeeper {
        fn new(channel: Option<ChannelInfo>, reject_with: Option<DispatchError>) -> Self {
            Self {
                channel,
                reject_with,
                sends: AtomicUsize::new(0),
            }
        }
    }

    impl ChannelKeeper for SplitKeeper {
        fn next_sequence_send(&self, _: &Context, _: &str, _: &str) -> Option<u64> {
            Some(7)
        }

        fn get_channel(&self, _: &Context, _: &str, _: &str) -> Option<ChannelInfo> {
            self.channel.clone()
        }

        fn send_packet(&self, _: &Context, _: &Capability, _: Packet) -> Result<(), DispatchError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            match &self.reject_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn split_handler(keeper: Arc<SplitKeeper>, port: &str) -> PacketSendHandler {
        let capabilities = Arc::new(InMemoryCapabilityKeeper::new());
        capabilities.claim(&channel_capability_path(port, CHANNEL));
        PacketSendHandler::new(keeper, capabilities)
    }

    #[test]
    fn test_sequence_without_descriptor_is_channel_not_found() {
        let f = fixture();
        let keeper = Arc::new(SplitKeeper::new(None, None));
        let handler = split_handler(keeper.clone(), &f.port);
        let err = failure(handler.dispatch_msg(&ctx(), &f.contract, &f.port, &send_msg(CHANNEL)));
        assert!(matches!(err, DispatchError::ChannelNotFound { .. }));
        assert_eq!(keeper.sends.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_engine_unknown_msg_is_failure_not_decline() {
        let f = fixture();
        let channel = ChannelInfo {
            state: ChannelState::Open,
            ordering: ChannelOrder::Unordered,
            counterparty: IbcEndpoint::new("transfer", "channel-3"),
            connection_hops: vec!["connection-0".into()],
            version: "v1".into(),
        };
        let keeper = Arc::new(SplitKeeper::new(
            Some(channel),
            Some(DispatchError::unknown("packet")),
        ));
        let handler = split_handler(keeper.clone(), &f.port);
        let err = failure(handler.dispatch_msg(&ctx(), &f.contract, &f.port, &send_msg(CHANNEL)));
        assert!(matches!(err, DispatchError::UnknownMsg(_)));
        assert_eq!(keeper.sends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_other_messages_declined() {
        let f = fixture();
        let msg = ContractMsg::Bank(BankMsg::Burn {
            amount: vec![WasmCoin::new("ustake", 1)],
        });
        assert!(f
            .handler
            .dispatch_msg(&ctx(), &f.contract, &f.port, &msg)
            .is_not_mine());
    }
}
