//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to colour human-readable output
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "wasm-bridge".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WB_SERVICE_NAME`: Service name (default: wasm-bridge)
    /// - `WB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `WB_JSON_LOGS`: Enable JSON logs (default: false); also disables colours
    pub fn from_env() -> Self {
        let json_logs = env::var("WB_JSON_LOGS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Self {
            service_name: env::var("WB_SERVICE_NAME")
                .unwrap_or_else(|_| "wasm-bridge".to_string()),

            log_level: env::var("WB_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs,
            ansi: !json_logs,
        }
    }

    /// Configuration for a named subsystem.
    pub fn for_subsystem(subsystem_id: u8, subsystem_name: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("wb-{subsystem_id:02}-{subsystem_name}");
        config
    }
}
