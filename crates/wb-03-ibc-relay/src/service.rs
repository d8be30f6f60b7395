//! # Relay Service
//!
//! Drives a contract through the six protocol callbacks. Every callback runs
//! the same pipeline:
//!
//! 1. resolve code and storage of the contract
//! 2. build [`Env`] from the block header
//! 3. call the engine with the remaining gas as budget
//! 4. charge the reported gas, whether or not the call succeeded
//! 5. surface an engine failure as [`RelayError::ExecutionFailed`]
//! 6. hand the response to the contract-response handler

use crate::domain::{
    Acknowledged, Callback, Env, IbcBasicResponse, IbcChannelCloseMsg, IbcChannelConnectMsg,
    IbcChannelOpenMsg, IbcPacketAckMsg, IbcPacketReceiveMsg, IbcPacketTimeoutMsg,
    IbcReceiveResult, Relayed,
};
use crate::errors::RelayError;
use crate::metrics;
use crate::ports::{AddressApi, ContractInstance, ContractRegistry, EngineOutput, IbcContractHandler, WasmEngine};
use shared_types::{Address, Classified, Context};
use std::sync::Arc;
use tracing::{debug, warn};
use wb_02_message_dispatch::service::{ContractResponse, ContractResponseHandler};

/// Relays protocol callbacks into contracts.
#[derive(Clone)]
pub struct IbcRelay {
    registry: Arc<dyn ContractRegistry>,
    engine: Arc<dyn WasmEngine>,
    api: Arc<dyn AddressApi>,
    responses: ContractResponseHandler,
}

impl IbcRelay {
    /// Creates the relay.
    pub fn new(
        registry: Arc<dyn ContractRegistry>,
        engine: Arc<dyn WasmEngine>,
        api: Arc<dyn AddressApi>,
        responses: ContractResponseHandler,
    ) -> Self {
        Self {
            registry,
            engine,
            api,
            responses,
        }
    }

    fn invoke<T>(
        &self,
        ctx: &Context,
        contract: &Address,
        call: impl FnOnce(&ContractInstance, &Env, u64) -> EngineOutput<T>,
    ) -> Result<(ContractInstance, T), RelayError> {
        let instance = self
            .registry
            .contract(ctx, contract)
            .ok_or_else(|| RelayError::ContractNotFound(contract.clone()))?;
        let env = Env::new(ctx, contract, instance.checksum);
        let gas = self.responses.gas_register();

        let output = call(&instance, &env, gas.runtime_gas_for_contract(ctx));
        let charged = gas.consume_runtime_gas(ctx, output.gas_used)?;
        metrics::record_gas_consumed(charged);

        let value = output
            .result
            .map_err(|err| RelayError::ExecutionFailed(err.to_string()))?;
        Ok((instance, value))
    }

    fn dispatch(
        &self,
        ctx: &Context,
        instance: &ContractInstance,
        contract: &Address,
        response: ContractResponse,
    ) -> Result<Relayed, RelayError> {
        let handled = self
            .responses
            .handle(ctx, contract, instance.info.port(), &response)?;
        Ok(Relayed {
            ctx: handled.ctx,
            events: handled.events,
        })
    }

    fn relay_basic(
        &self,
        ctx: &Context,
        contract: &Address,
        call: impl FnOnce(&ContractInstance, &Env, u64) -> EngineOutput<IbcBasicResponse>,
    ) -> Result<Relayed, RelayError> {
        let (instance, response) = self.invoke(ctx, contract, call)?;
        self.dispatch(ctx, &instance, contract, response.into())
    }
}

fn observe<T>(
    callback: Callback,
    contract: &Address,
    result: Result<T, RelayError>,
) -> Result<T, RelayError> {
    match &result {
        Ok(_) => {
            debug!(%callback, contract = %contract, "relayed callback");
            metrics::record_callback(callback.as_str(), "ok");
        }
        Err(err) => {
            warn!(%callback, contract = %contract, error = %err, "callback failed");
            metrics::record_callback(callback.as_str(), err.class().as_str());
        }
    }
    result
}

impl IbcContractHandler for IbcRelay {
    fn on_open_channel(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcChannelOpenMsg,
    ) -> Result<String, RelayError> {
        let result = self
            .invoke(ctx, contract, |instance, env, gas_limit| {
                self.engine.ibc_channel_open(
                    &instance.checksum,
                    env,
                    msg,
                    instance.store.as_ref(),
                    self.api.as_ref(),
                    gas_limit,
                )
            })
            .map(|(_, version)| version.unwrap_or_default());
        observe(Callback::OpenChannel, contract, result)
    }

    fn on_connect_channel(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcChannelConnectMsg,
    ) -> Result<Relayed, RelayError> {
        let result = self.relay_basic(ctx, contract, |instance, env, gas_limit| {
            self.engine.ibc_channel_connect(
                &instance.checksum,
                env,
                msg,
                instance.store.as_ref(),
                self.api.as_ref(),
                gas_limit,
            )
        });
        observe(Callback::ConnectChannel, contract, result)
    }

    fn on_close_channel(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcChannelCloseMsg,
    ) -> Result<Relayed, RelayError> {
        let result = self.relay_basic(ctx, contract, |instance, env, gas_limit| {
            self.engine.ibc_channel_close(
                &instance.checksum,
                env,
                msg,
                instance.store.as_ref(),
                self.api.as_ref(),
                gas_limit,
            )
        });
        observe(Callback::CloseChannel, contract, result)
    }

    fn on_recv_packet(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcPacketReceiveMsg,
    ) -> Result<Acknowledged, RelayError> {
        let result = self
            .invoke(ctx, contract, |instance, env, gas_limit| {
                self.engine.ibc_packet_receive(
                    &instance.checksum,
                    env,
                    msg,
                    instance.store.as_ref(),
                    self.api.as_ref(),
                    gas_limit,
                )
            })
            .and_then(|(instance, outcome)| match outcome {
                IbcReceiveResult::Ok(response) => {
                    let (acknowledgement, response) = response.into_parts();
                    let relayed = self.dispatch(ctx, &instance, contract, response)?;
                    Ok(Acknowledged {
                        ctx: relayed.ctx,
                        events: relayed.events,
                        acknowledgement,
                    })
                }
                IbcReceiveResult::Err(reason) => Err(RelayError::ExecutionFailed(reason)),
            });
        observe(Callback::ReceivePacket, contract, result)
    }

    fn on_ack_packet(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcPacketAckMsg,
    ) -> Result<Relayed, RelayError> {
        let result = self.relay_basic(ctx, contract, |instance, env, gas_limit| {
            self.engine.ibc_packet_ack(
                &instance.checksum,
                env,
                msg,
                instance.store.as_ref(),
                self.api.as_ref(),
                gas_limit,
            )
        });
        observe(Callback::AckPacket, contract, result)
    }

    fn on_timeout_packet(
        &self,
        ctx: &Context,
        contract: &Address,
        msg: &IbcPacketTimeoutMsg,
    ) -> Result<Relayed, RelayError> {
        let result = self.relay_basic(ctx, contract, |instance, env, gas_limit| {
            self.engine.ibc_packet_timeout(
                &instance.checksum,
                env,
                msg,
                instance.store.as_ref(),
                self.api.as_ref(),
                gas_limit,
            )
        });
        observe(Callback::TimeoutPacket, contract, result)
    }
}
