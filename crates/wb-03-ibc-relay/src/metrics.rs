//! # Relay Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `wb_relay_callbacks_total` - Callback outcomes (by callback, outcome)
//! - `wb_relay_gas_consumed_total` - Ledger gas charged for engine execution

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Callback outcomes, labeled by callback and outcome
    pub static ref RELAY_CALLBACKS: IntCounterVec = register_int_counter_vec!(
        "wb_relay_callbacks_total",
        "Total number of protocol callbacks relayed into contracts",
        &["callback", "outcome"]
    )
    .expect("Failed to create RELAY_CALLBACKS metric");

    /// Ledger gas charged for engine execution
    pub static ref RELAY_GAS_CONSUMED: IntCounter = register_int_counter!(
        "wb_relay_gas_consumed_total",
        "Total ledger gas charged for contract execution during callbacks"
    )
    .expect("Failed to create RELAY_GAS_CONSUMED metric");
}

/// Record a callback outcome
#[cfg(feature = "metrics")]
pub fn record_callback(callback: &str, outcome: &str) {
    RELAY_CALLBACKS.with_label_values(&[callback, outcome]).inc();
}

/// Record charged gas
#[cfg(feature = "metrics")]
pub fn record_gas_consumed(gas: u64) {
    RELAY_GAS_CONSUMED.inc_by(gas);
}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_callback(_callback: &str, _outcome: &str) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_gas_consumed(_gas: u64) {}
