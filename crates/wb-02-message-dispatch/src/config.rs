//! Configuration for the Message Dispatch Subsystem

use serde::{Deserialize, Serialize};
use std::env;

/// Handler wiring configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Source port used when encoding token transfers.
    pub transfer_port: String,
    /// Module account that is allowed to destroy funds.
    pub burn_module: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            transfer_port: "transfer".to_string(),
            burn_module: "burner".to_string(),
        }
    }
}

/// Gas pricing configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasRegisterConfig {
    /// Engine gas units per ledger gas unit.
    pub gas_multiplier: u64,
    /// Cost per emitted event attribute.
    pub event_per_attribute_cost: u64,
    /// Cost per contract-declared event.
    pub custom_event_cost: u64,
    /// Cost per attribute byte above the free tier.
    pub event_attribute_data_cost: u64,
    /// Attribute bytes per batch that are not charged.
    pub event_attribute_data_free_tier: u64,
}

impl Default for GasRegisterConfig {
    fn default() -> Self {
        Self {
            gas_multiplier: 100,
            event_per_attribute_cost: 10,
            custom_event_cost: 20,
            event_attribute_data_cost: 1,
            event_attribute_data_free_tier: 100,
        }
    }
}

impl GasRegisterConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WB_GAS_MULTIPLIER` (default: 100, zero is ignored)
    /// - `WB_GAS_EVENT_PER_ATTRIBUTE` (default: 10)
    /// - `WB_GAS_CUSTOM_EVENT` (default: 20)
    /// - `WB_GAS_EVENT_DATA_COST` (default: 1)
    /// - `WB_GAS_EVENT_DATA_FREE_TIER` (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gas_multiplier: env_u64("WB_GAS_MULTIPLIER")
                .filter(|m| *m > 0)
                .unwrap_or(defaults.gas_multiplier),
            event_per_attribute_cost: env_u64("WB_GAS_EVENT_PER_ATTRIBUTE")
                .unwrap_or(defaults.event_per_attribute_cost),
            custom_event_cost: env_u64("WB_GAS_CUSTOM_EVENT")
                .unwrap_or(defaults.custom_event_cost),
            event_attribute_data_cost: env_u64("WB_GAS_EVENT_DATA_COST")
                .unwrap_or(defaults.event_attribute_data_cost),
            event_attribute_data_free_tier: env_u64("WB_GAS_EVENT_DATA_FREE_TIER")
                .unwrap_or(defaults.event_attribute_data_free_tier),
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
