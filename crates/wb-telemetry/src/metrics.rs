//! Prometheus metrics.
//!
//! Subsystem crates register their own counters behind their `metrics`
//! feature, all in the default registry. This module adds the cross-cutting
//! error counter and renders the registry.

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use shared_types::Classified;

use crate::TelemetryError;

lazy_static! {
    /// Errors surfaced to callers, labeled by subsystem and error class
    pub static ref SUBSYSTEM_ERRORS: IntCounterVec = register_int_counter_vec!(
        "wb_subsystem_errors_total",
        "Total errors surfaced by bridge subsystems",
        &["subsystem", "class"]
    )
    .expect("Failed to create SUBSYSTEM_ERRORS metric");
}

/// Counts an error surfaced by `subsystem`.
pub fn record_error(subsystem: &str, err: &dyn Classified) {
    SUBSYSTEM_ERRORS
        .with_label_values(&[subsystem, err.class().as_str()])
        .inc();
}

/// Renders every registered metric in the text exposition format.
pub fn gather() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
}
