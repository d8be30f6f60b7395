//! # Contract Response Service
//!
//! Turns everything a contract returned from one invocation into ledger
//! effects: event gas is charged, telemetry is translated, then each message
//! is dispatched in order through the handler chain.

use crate::config::DispatchConfig;
use crate::domain::gas::EVENT_GAS_DESCRIPTOR;
use crate::domain::{ContractMsg, GasRegister, HandlerOutcome};
use crate::encoders::MessageEncoders;
use crate::errors::DispatchError;
use crate::handlers::{BurnHandler, LedgerOperationHandler, MessageHandlerChain, PacketSendHandler};
use crate::metrics;
use crate::ports::{Burner, CapabilityKeeper, ChannelKeeper, MessageEncoder, Messenger, OperationRouter};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, Context, Event};
use std::sync::Arc;
use tracing::{debug, warn};
use wb_01_contract_events::prelude::{custom_events, module_event, ContractAttribute, ContractEvent};

/// What a contract returned from one invocation.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractResponse {
    /// Messages to dispatch, in order.
    #[serde(default)]
    pub messages: Vec<ContractMsg>,
    /// Loose attributes, folded into one `wasm` event.
    #[serde(default)]
    pub attributes: Vec<ContractAttribute>,
    /// Contract-declared events.
    #[serde(default)]
    pub events: Vec<ContractEvent>,
    /// Opaque data returned to the caller.
    #[serde_as(as = "Option<Hex>")]
    pub data: Option<Vec<u8>>,
}

impl ContractResponse {
    /// Response carrying only messages.
    #[must_use]
    pub fn with_messages(messages: Vec<ContractMsg>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }
}

/// Ledger effects of a handled response.
#[derive(Debug, Clone)]
pub struct HandledResponse {
    /// Context after all messages were dispatched.
    pub ctx: Context,
    /// Translated telemetry followed by handler events, in order.
    pub events: Vec<Event>,
    /// The response's own data.
    pub data: Option<Vec<u8>>,
}

/// Applies contract responses.
#[derive(Clone)]
pub struct ContractResponseHandler {
    messenger: Arc<dyn Messenger>,
    gas: GasRegister,
}

impl ContractResponseHandler {
    /// Creates the service.
    pub fn new(messenger: Arc<dyn Messenger>, gas: GasRegister) -> Self {
        Self { messenger, gas }
    }

    /// Gas pricing in use.
    #[must_use]
    pub fn gas_register(&self) -> &GasRegister {
        &self.gas
    }

    /// Charges event gas, translates telemetry and dispatches all messages.
    ///
    /// The first failure aborts; nothing produced so far is returned.
    pub fn handle(
        &self,
        ctx: &Context,
        contract: &Address,
        ibc_port: &str,
        response: &ContractResponse,
    ) -> Result<HandledResponse, DispatchError> {
        ctx.consume_gas(
            self.gas.event_costs(&response.attributes, &response.events),
            EVENT_GAS_DESCRIPTOR,
        )?;

        let mut events = Vec::new();
        if !response.attributes.is_empty() {
            events.push(module_event(&response.attributes, contract).map_err(rejected)?);
        }
        if !response.events.is_empty() {
            events.extend(custom_events(&response.events, contract).map_err(rejected)?);
        }

        let mut working = ctx.clone();
        for msg in &response.messages {
            match self.messenger.dispatch_msg(&working, contract, ibc_port, msg) {
                HandlerOutcome::Claimed(dispatched) => {
                    working = dispatched.ctx;
                    events.extend(dispatched.events);
                }
                HandlerOutcome::NotMine => {
                    return Err(DispatchError::NoHandlerFound(msg.name().to_string()));
                }
                HandlerOutcome::Failed(err) => {
                    debug!(contract = %contract, msg = msg.name(), error = %err, "message dispatch failed");
                    return Err(err);
                }
            }
        }

        Ok(HandledResponse {
            ctx: working,
            events,
            data: response.data.clone(),
        })
    }
}

fn rejected(err: wb_01_contract_events::errors::EventError) -> DispatchError {
    warn!(error = %err, "rejecting contract events");
    metrics::record_events_rejected();
    err.into()
}

/// Builds the default chain: ledger operations, then raw packets, then burns.
pub fn default_message_handler(
    router: Arc<dyn OperationRouter>,
    encoder: Arc<dyn MessageEncoder>,
    channels: Arc<dyn ChannelKeeper>,
    capabilities: Arc<dyn CapabilityKeeper>,
    burner: Arc<dyn Burner>,
    config: &DispatchConfig,
) -> MessageHandlerChain {
    MessageHandlerChain::new(vec![
        Some(Arc::new(LedgerOperationHandler::new(router, encoder)) as Arc<dyn Messenger>),
        Some(Arc::new(PacketSendHandler::new(channels, capabilities)) as Arc<dyn Messenger>),
        Some(Arc::new(BurnHandler::new(burner, config.burn_module.clone())) as Arc<dyn Messenger>),
    ])
}

/// Default encoder set for `config`.
#[must_use]
pub fn default_encoders(config: &DispatchConfig) -> Arc<dyn MessageEncoder> {
    Arc::new(MessageEncoders::new(config.clone()))
}
