//! # Gas Register
//!
//! Prices contract telemetry and converts between ledger gas and the
//! execution engine's finer-grained gas units.

use crate::config::GasRegisterConfig;
use shared_types::{Context, OutOfGas};
use wb_01_contract_events::domain::{ContractAttribute, ContractEvent};

/// Descriptor used when charging engine gas.
pub const RUNTIME_GAS_DESCRIPTOR: &str = "wasm contract execution";

/// Descriptor used when charging event gas.
pub const EVENT_GAS_DESCRIPTOR: &str = "wasm contract events";

/// Gas pricing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasRegister {
    config: GasRegisterConfig,
}

impl Default for GasRegister {
    fn default() -> Self {
        Self::new(GasRegisterConfig::default())
    }
}

impl GasRegister {
    /// Register with explicit pricing. A zero multiplier is treated as 1.
    #[must_use]
    pub fn new(mut config: GasRegisterConfig) -> Self {
        config.gas_multiplier = config.gas_multiplier.max(1);
        Self { config }
    }

    /// Active pricing.
    #[must_use]
    pub fn config(&self) -> &GasRegisterConfig {
        &self.config
    }

    /// Ledger gas to engine gas.
    #[must_use]
    pub fn to_engine_gas(&self, ledger_gas: u64) -> u64 {
        ledger_gas.saturating_mul(self.config.gas_multiplier)
    }

    /// Engine gas to ledger gas.
    #[must_use]
    pub fn from_engine_gas(&self, engine_gas: u64) -> u64 {
        engine_gas / self.config.gas_multiplier
    }

    /// Cost of emitting the loose attributes and custom events of a response.
    #[must_use]
    pub fn event_costs(&self, attributes: &[ContractAttribute], events: &[ContractEvent]) -> u64 {
        let custom = events.iter().fold(0u64, |acc, event| {
            acc.saturating_add(self.config.custom_event_cost)
                .saturating_add(self.attribute_costs(&event.attributes))
        });
        self.attribute_costs(attributes).saturating_add(custom)
    }

    fn attribute_costs(&self, attributes: &[ContractAttribute]) -> u64 {
        if attributes.is_empty() {
            return 0;
        }
        let stored_bytes: u64 = attributes
            .iter()
            .map(|a| (a.key.len() + a.value.len()) as u64)
            .sum();
        let charged_bytes = stored_bytes.saturating_sub(self.config.event_attribute_data_free_tier);
        (attributes.len() as u64)
            .saturating_mul(self.config.event_per_attribute_cost)
            .saturating_add(charged_bytes.saturating_mul(self.config.event_attribute_data_cost))
    }

    /// Engine gas budget for a contract call in this context.
    ///
    /// Zero when the meter is exhausted, unbounded for an infinite meter.
    #[must_use]
    pub fn runtime_gas_for_contract(&self, ctx: &Context) -> u64 {
        let meter = ctx.gas_meter();
        if meter.is_out_of_gas() {
            return 0;
        }
        match meter.remaining() {
            None => u64::MAX,
            Some(remaining) => self.to_engine_gas(remaining),
        }
    }

    /// Charges engine gas reported by the execution engine.
    ///
    /// Reaching the limit is fatal to the enclosing transaction.
    pub fn consume_runtime_gas(&self, ctx: &Context, engine_gas: u64) -> Result<u64, OutOfGas> {
        let ledger_gas = self.from_engine_gas(engine_gas);
        ctx.consume_gas(ledger_gas, RUNTIME_GAS_DESCRIPTOR)?;
        let meter = ctx.gas_meter();
        if meter.is_out_of_gas() {
            return Err(OutOfGas {
                descriptor: RUNTIME_GAS_DESCRIPTOR.to_string(),
                limit: meter.limit().unwrap_or(u64::MAX),
                consumed: meter.consumed(),
            });
        }
        Ok(ledger_gas)
    }
}
