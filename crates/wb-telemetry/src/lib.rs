//! # WB Telemetry
//!
//! Process-wide observability for the bridge subsystems.
//!
//! - **Logs**: `tracing-subscriber` with an env filter and a JSON or
//!   human-readable fmt layer
//! - **Metrics**: every subsystem registers its counters in the Prometheus
//!   default registry; [`gather`] renders them all
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wb_telemetry::{init_tracing, TelemetryConfig};
//!
//! init_tracing(&TelemetryConfig::from_env())?;
//! // ... relay callbacks, dispatch messages ...
//! let exposition = wb_telemetry::gather()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WB_SERVICE_NAME` | `wasm-bridge` | Service name attached to logs |
//! | `WB_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `WB_JSON_LOGS` | `false` | Emit JSON lines |

#![warn(missing_docs)]

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{gather, record_error, SUBSYSTEM_ERRORS};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or the filter is invalid.
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Metrics could not be encoded.
    #[error("Failed to encode Prometheus metrics: {0}")]
    Metrics(String),
}

/// Convenience macro for a span tagged with the subsystem name.
///
/// ```rust,ignore
/// let _span = wb_telemetry::subsystem_span!("relay", contract = %addr).entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($subsystem:expr $(, $($field:tt)*)?) => {
        tracing::info_span!("subsystem", subsystem = $subsystem $(, $($field)*)?)
    };
}
