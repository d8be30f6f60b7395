//! # Dispatch Metrics
//!
//! Prometheus metrics for the handler chain.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! wb-02-message-dispatch = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `wb_dispatch_messages_total` - Handler outcomes (by handler, outcome)
//! - `wb_dispatch_operations_total` - Ledger operations executed
//! - `wb_dispatch_rejected_total` - Dispatch failures (by error class)
//! - `wb_events_rejected_total` - Contract event batches rejected

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Handler outcomes, labeled by handler and outcome
    pub static ref DISPATCH_MESSAGES: IntCounterVec = register_int_counter_vec!(
        "wb_dispatch_messages_total",
        "Total number of handler outcomes while dispatching contract messages",
        &["handler", "outcome"]
    )
    .expect("Failed to create DISPATCH_MESSAGES metric");

    /// Ledger operations executed
    pub static ref DISPATCH_OPERATIONS: IntCounter = register_int_counter!(
        "wb_dispatch_operations_total",
        "Total number of ledger operations executed on behalf of contracts"
    )
    .expect("Failed to create DISPATCH_OPERATIONS metric");

    /// Dispatch failures, labeled by error class
    pub static ref DISPATCH_REJECTED: IntCounterVec = register_int_counter_vec!(
        "wb_dispatch_rejected_total",
        "Total number of failed dispatches",
        &["class"]
    )
    .expect("Failed to create DISPATCH_REJECTED metric");

    /// Rejected contract event batches
    pub static ref EVENTS_REJECTED: IntCounter = register_int_counter!(
        "wb_events_rejected_total",
        "Total number of contract event batches rejected"
    )
    .expect("Failed to create EVENTS_REJECTED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record one handler outcome
#[cfg(feature = "metrics")]
pub fn record_handler_outcome(handler: &str, outcome: &str) {
    DISPATCH_MESSAGES.with_label_values(&[handler, outcome]).inc();
}

/// Record an executed ledger operation
#[cfg(feature = "metrics")]
pub fn record_operation_executed() {
    DISPATCH_OPERATIONS.inc();
}

/// Record a failed dispatch
#[cfg(feature = "metrics")]
pub fn record_dispatch_rejected(class: &str) {
    DISPATCH_REJECTED.with_label_values(&[class]).inc();
}

/// Record a rejected event batch
#[cfg(feature = "metrics")]
pub fn record_events_rejected() {
    EVENTS_REJECTED.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_handler_outcome(_handler: &str, _outcome: &str) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_operation_executed() {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_dispatch_rejected(_class: &str) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_events_rejected() {}
