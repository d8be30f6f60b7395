//! # Integration Test Flows
//!
//! Drives a contract end to end: the protocol engine calls the port module,
//! the relay runs the (mock) execution engine, and whatever the contract
//! returns goes through the handler chain into the bank and the channel
//! registry.
//!
//! ## Flows Tested:
//!
//! 1. **Receive → ledger send**: ack returned, funds moved, gas charged
//! 2. **Ack → packet send**: reply packet addressed to the counterparty
//! 3. **Timeout → burn**: supply shrinks by the burned amount
//! 4. **Mid-response failure**: earlier writes stay until the caller restores
//! 5. **Handshake**: version negotiation and channel closing

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared_types::{
        channel_capability_path, port_id_for_contract, Address, BlockInfo, ChannelInfo,
        ChannelOrder, ChannelState, Classified, Coin, Coins, Context, ErrorClass, GasMeter,
        IbcEndpoint, IbcTimeout, Packet, U256,
    };
    use std::sync::Arc;
    use wb_01_contract_events::prelude::{ContractAttribute, ContractEvent};
    use wb_02_message_dispatch::prelude::*;
    use wb_03_ibc_relay::prelude::*;
    use wb_telemetry::TelemetryConfig;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const CHANNEL: &str = "channel-0";
    const DENOM: &str = "ustake";

    struct Bridge {
        bank: Arc<InMemoryBank>,
        channels: Arc<InMemoryChannelKeeper>,
        module: IbcContractModule,
        contract: Address,
        port: String,
    }

    fn init_tracing() {
        let config = TelemetryConfig {
            log_level: "debug".into(),
            ansi: false,
            ..TelemetryConfig::default()
        };
        let _ = wb_telemetry::init_tracing(&config);
    }

    fn coins(amount: u64) -> Coins {
        Coins::new(vec![Coin::new(DENOM, amount)]).unwrap()
    }

    fn bridge(engine: MockWasmEngine) -> Bridge {
        bridge_with(engine, default_encoders(&DispatchConfig::default()))
    }

    fn bridge_with(engine: MockWasmEngine, encoder: Arc<dyn MessageEncoder>) -> Bridge {
        init_tracing();
        let config = DispatchConfig::default();
        let bank = Arc::new(InMemoryBank::new().with_burner_module(config.burn_module.clone()));
        let router = Arc::new(MsgServiceRouter::new());
        router.register("/cosmos.bank.v1beta1.MsgSend", bank.send_handler());
        let channels = Arc::new(InMemoryChannelKeeper::new());
        let capabilities = Arc::new(InMemoryCapabilityKeeper::new());

        let chain = default_message_handler(
            router,
            encoder,
            channels.clone(),
            capabilities.clone(),
            bank.clone(),
            &config,
        );
        let responses = ContractResponseHandler::new(Arc::new(chain), GasRegister::default());

        let contract = Address::contract("wasm", 1, 1);
        let port = port_id_for_contract(&contract);
        let registry = Arc::new(InMemoryContractRegistry::new());
        registry.register(
            contract.clone(),
            ContractInfo {
                code_id: 1,
                creator: Address::new(vec![1; 20]),
                admin: None,
                label: "escrow".into(),
                ibc_port_id: Some(port.clone()),
            },
            b"\0asm escrow",
        );

        let owner = capabilities.claim(&channel_capability_path(&port, CHANNEL));
        channels.open_channel(
            &port,
            CHANNEL,
            ChannelInfo {
                state: ChannelState::Open,
                ordering: ChannelOrder::Unordered,
                counterparty: IbcEndpoint::new("transfer", "channel-9"),
                connection_hops: vec!["connection-0".into()],
                version: "escrow-1".into(),
            },
            owner,
        );
        bank.mint(&contract, &coins(1_000)).unwrap();

        let relay = IbcRelay::new(registry, Arc::new(engine), Arc::new(HexAddressApi), responses);
        let module = IbcContractModule::new(Arc::new(relay), channels.clone());
        Bridge {
            bank,
            channels,
            module,
            contract,
            port,
        }
    }

    fn ctx() -> Context {
        Context::new(
            BlockInfo {
                height: 100,
                time: 1_700_000_000_000_000_000,
                chain_id: "bridge-1".into(),
            },
            GasMeter::new(1_000_000),
        )
    }

    fn relayer() -> Address {
        Address::new(vec![0x77; 20])
    }

    fn incoming(port: &str, data: serde_json::Value) -> Packet {
        Packet {
            sequence: 1,
            source: IbcEndpoint::new("transfer", "channel-9"),
            destination: IbcEndpoint::new(port, CHANNEL),
            data: serde_json::to_vec(&data).unwrap(),
            timeout: IbcTimeout::at_height(1, 500),
        }
    }

    fn outgoing(port: &str) -> Packet {
        Packet {
            sequence: 1,
            source: IbcEndpoint::new(port, CHANNEL),
            destination: IbcEndpoint::new("transfer", "channel-9"),
            data: b"ping".to_vec(),
            timeout: IbcTimeout::at_timestamp(42),
        }
    }

    fn send(to: &Address, amount: u64) -> ContractMsg {
        ContractMsg::Bank(BankMsg::Send {
            to_address: to.to_hex(),
            amount: vec![WasmCoin::new(DENOM, amount)],
        })
    }

    /// Contract that pays `amount` to `recipient` named in the packet.
    fn paying_engine() -> MockWasmEngine {
        MockWasmEngine::new()
            .with_gas_used(10_000)
            .on_receive(|_, msg, _| {
                let order: serde_json::Value =
                    serde_json::from_slice(&msg.packet.data).map_err(|e| e.to_string())?;
                let recipient = order["recipient"].as_str().ok_or("missing recipient")?;
                let recipient = Address::from_hex(recipient).map_err(|e| e.to_string())?;
                let amount = order["amount"].as_u64().ok_or("missing amount")?;
                Ok(IbcReceiveResult::Ok(IbcReceiveResponse {
                    acknowledgement: br#"{"result":"ok"}"#.to_vec(),
                    messages: vec![send(&recipient, amount)],
                    attributes: vec![ContractAttribute::new("action", "receive")],
                    events: Vec::new(),
                }))
            })
    }

    // =============================================================================
    // INTEGRATION TESTS: PACKET LIFECYCLE
    // =============================================================================

    #[test]
    fn test_received_packet_pays_out_and_acks() {
        let bridge = bridge(paying_engine());
        let payee = Address::new(vec![0x42; 20]);
        let packet = incoming(&bridge.port, json!({"recipient": payee.to_hex(), "amount": 25}));
        let c = ctx();

        let out = bridge.module.on_recv_packet(&c, &packet, &relayer()).unwrap();

        assert_eq!(out.acknowledgement, br#"{"result":"ok"}"#.to_vec());
        let types: Vec<&str> = out.events.iter().map(|e| e.ty.as_str()).collect();
        assert_eq!(types, vec!["wasm", "transfer"]);
        assert_eq!(bridge.bank.balance(&payee).amount_of(DENOM), U256::from(25));
        assert_eq!(
            bridge.bank.balance(&bridge.contract).amount_of(DENOM),
            U256::from(975)
        );
        // 10_000 engine gas at multiplier 100, plus one attribute
        assert_eq!(c.gas_consumed(), 110);
        assert!(out.ctx.shares_gas_meter(&c));
    }

    #[test]
    fn test_ack_triggers_reply_packet_to_counterparty() {
        let engine = MockWasmEngine::new().on_ack(|_, msg, _| {
            Ok(IbcBasicResponse {
                messages: vec![ContractMsg::Ibc(IbcMsg::SendPacket {
                    channel_id: msg.original_packet.source.channel_id.clone(),
                    data: msg.acknowledgement.clone(),
                    timeout: IbcTimeout::at_timestamp(99),
                })],
                ..IbcBasicResponse::default()
            })
        });
        let bridge = bridge(engine);

        let relayed = bridge
            .module
            .on_acknowledgement_packet(&ctx(), &outgoing(&bridge.port), b"pong", &relayer())
            .unwrap();

        assert!(relayed.events.is_empty());
        let sent = bridge.channels.sent_packets();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].sequence, 1);
        assert_eq!(sent[0].source, IbcEndpoint::new(bridge.port.clone(), CHANNEL));
        assert_eq!(sent[0].destination, IbcEndpoint::new("transfer", "channel-9"));
        assert_eq!(sent[0].data, b"pong".to_vec());
        assert_eq!(sent[0].timeout, IbcTimeout::at_timestamp(99));
    }

    #[test]
    fn test_timeout_burns_escrow() {
        let engine = MockWasmEngine::new().on_timeout(|_, _, _| {
            Ok(IbcBasicResponse {
                messages: vec![ContractMsg::Bank(BankMsg::Burn {
                    amount: vec![WasmCoin::new(DENOM, 1_000)],
                })],
                ..IbcBasicResponse::default()
            })
        });
        let bridge = bridge(engine);
        assert_eq!(bridge.bank.supply().amount_of(DENOM), U256::from(1_000));

        bridge
            .module
            .on_timeout_packet(&ctx(), &outgoing(&bridge.port), &relayer())
            .unwrap();

        assert_eq!(bridge.bank.supply().amount_of(DENOM), U256::zero());
        assert!(bridge.bank.balance(&bridge.contract).is_empty());
    }

    #[test]
    fn test_rejected_packet_has_no_ack_but_pays_gas() {
        let engine = MockWasmEngine::new()
            .with_gas_used(4_200)
            .on_receive(|_, _, _| Ok(IbcReceiveResult::Err("unknown denom".into())));
        let bridge = bridge(engine);
        let c = ctx();
        let packet = incoming(&bridge.port, json!({}));

        let err = bridge.module.on_recv_packet(&c, &packet, &relayer()).unwrap_err();

        assert_eq!(err.class(), ErrorClass::ExecutionFailure);
        assert!(err.to_string().contains("unknown denom"));
        assert_eq!(c.gas_consumed(), 42);
        assert_eq!(
            bridge.bank.balance(&bridge.contract).amount_of(DENOM),
            U256::from(1_000)
        );
    }

    #[test]
    fn test_failure_mid_response_needs_caller_checkpoint() {
        let first = Address::new(vec![0x01; 20]);
        let second = Address::new(vec![0x02; 20]);
        let (a, b) = (first.clone(), second.clone());
        let engine = MockWasmEngine::new().on_receive(move |_, _, _| {
            Ok(IbcReceiveResult::Ok(IbcReceiveResponse {
                acknowledgement: b"ok".to_vec(),
                messages: vec![send(&a, 10), send(&b, 5_000)],
                ..IbcReceiveResponse::default()
            }))
        });
        let bridge = bridge(engine);
        let packet = incoming(&bridge.port, json!({}));

        let checkpoint = bridge.bank.snapshot();
        let err = bridge.module.on_recv_packet(&ctx(), &packet, &relayer()).unwrap_err();
        assert!(matches!(
            err,
            RelayError::Dispatch(DispatchError::InsufficientFunds(_))
        ));
        // the handlers did not unwind the first transfer
        assert_eq!(bridge.bank.balance(&first).amount_of(DENOM), U256::from(10));

        bridge.bank.restore(checkpoint);
        assert!(bridge.bank.balance(&first).is_empty());
        assert!(bridge.bank.balance(&second).is_empty());
        assert_eq!(
            bridge.bank.balance(&bridge.contract).amount_of(DENOM),
            U256::from(1_000)
        );
    }

    #[test]
    fn test_invalid_contract_event_aborts_before_dispatch() {
        let payee = Address::new(vec![0x42; 20]);
        let target = payee.clone();
        let engine = MockWasmEngine::new().on_connect(move |_, _, _| {
            Ok(IbcBasicResponse {
                messages: vec![send(&target, 1)],
                events: vec![ContractEvent::new(" ab ")],
                ..IbcBasicResponse::default()
            })
        });
        let bridge = bridge(engine);

        let err = bridge
            .module
            .on_chan_open_confirm(&ctx(), &bridge.port, CHANNEL)
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::Validation);
        assert!(bridge.bank.balance(&payee).is_empty());
    }

    #[test]
    fn test_custom_encoder_cannot_sign_for_others() {
        let victim = Address::new(vec![0x99; 20]);
        let signer = victim.clone();
        let encoders = MessageEncoders::new(DispatchConfig::default()).with_custom(Arc::new(
            move |_contract: &Address,
                  payload: &serde_json::Value|
                  -> Result<Vec<LedgerOp>, DispatchError> {
                Ok(vec![LedgerOp::Custom {
                    type_url: "/bridge.v1.MsgSweep".into(),
                    signers: vec![signer.clone()],
                    payload: payload.clone(),
                }])
            },
        ));
        let engine = MockWasmEngine::new().on_close(|_, _, _| {
            Ok(IbcBasicResponse {
                messages: vec![ContractMsg::Custom(json!({"sweep": {}}))],
                ..IbcBasicResponse::default()
            })
        });
        let bridge = bridge_with(engine, Arc::new(encoders));

        let err = bridge
            .module
            .on_chan_close_init(&ctx(), &bridge.port, CHANNEL)
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::Authorization);
        assert!(matches!(
            err,
            RelayError::Dispatch(DispatchError::Unauthorized { ref signer, .. }) if *signer == victim
        ));
    }

    // =============================================================================
    // INTEGRATION TESTS: CHANNEL HANDSHAKE
    // =============================================================================

    #[test]
    fn test_handshake_then_close_makes_channel_unusable() {
        let engine = MockWasmEngine::new()
            .on_open(|_, msg, _| match msg {
                IbcChannelOpenMsg::OpenInit { .. } => Ok(None),
                IbcChannelOpenMsg::OpenTry { .. } => Ok(Some("escrow-2".into())),
            })
            .on_timeout(|_, msg, _| {
                Ok(IbcBasicResponse {
                    messages: vec![ContractMsg::Ibc(IbcMsg::SendPacket {
                        channel_id: msg.packet.source.channel_id.clone(),
                        data: b"retry".to_vec(),
                        timeout: IbcTimeout::at_timestamp(1),
                    })],
                    ..IbcBasicResponse::default()
                })
            });
        let bridge = bridge(engine);
        let opening = ChannelOpening {
            order: ChannelOrder::Unordered,
            connection_hops: vec!["connection-0".into()],
            port_id: bridge.port.clone(),
            channel_id: "channel-1".into(),
            counterparty: IbcEndpoint::new("transfer", ""),
            version: "escrow-1".into(),
        };

        assert_eq!(
            bridge.module.on_chan_open_init(&ctx(), &opening).unwrap(),
            "escrow-1"
        );
        assert_eq!(
            bridge
                .module
                .on_chan_open_try(&ctx(), &opening, "escrow-1")
                .unwrap(),
            "escrow-2"
        );

        bridge
            .module
            .on_chan_close_confirm(&ctx(), &bridge.port, CHANNEL)
            .unwrap();
        assert!(bridge.channels.close_channel(&bridge.port, CHANNEL));

        let err = bridge
            .module
            .on_timeout_packet(&ctx(), &outgoing(&bridge.port), &relayer())
            .unwrap_err();
        assert!(matches!(
            err,
            RelayError::Dispatch(DispatchError::OperationFailed { .. })
        ));
        assert!(bridge.channels.sent_packets().is_empty());
    }

    #[test]
    fn test_callbacks_on_unknown_contract_port() {
        let bridge = bridge(MockWasmEngine::new());
        let stranger = port_id_for_contract(&Address::contract("wasm", 5, 5));
        let err = bridge
            .module
            .on_recv_packet(&ctx(), &incoming(&stranger, json!({})), &relayer())
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::NotFound);
    }

    // =============================================================================
    // INTEGRATION TESTS: TELEMETRY
    // =============================================================================

    #[test]
    fn test_metrics_exported_after_relay() {
        let bridge = bridge(paying_engine());
        let payee = Address::new(vec![0x43; 20]);
        let packet = incoming(&bridge.port, json!({"recipient": payee.to_hex(), "amount": 1}));
        bridge.module.on_recv_packet(&ctx(), &packet, &relayer()).unwrap();

        let err = bridge
            .module
            .on_recv_packet(&ctx(), &incoming("transfer", json!({})), &relayer())
            .unwrap_err();
        wb_telemetry::record_error("relay", &err);

        let text = wb_telemetry::gather().unwrap();
        assert!(text.contains("wb_relay_callbacks_total"));
        assert!(text.contains("wb_relay_gas_consumed_total"));
        assert!(text.contains("wb_dispatch_messages_total"));
        assert!(text.contains("wb_dispatch_operations_total"));
        assert!(text.contains("wb_subsystem_errors_total"));
    }
}
