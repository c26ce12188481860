//! # sc-telemetry — Structured Logging Init
//!
//! The observability backend a deployment ships logs to (Loki, Tempo,
//! Grafana) is external to this workspace (spec §1: logging is a
//! treated-as-external concern). What stays in-repo is the ambient
//! concern every binary needs regardless: a `tracing_subscriber`
//! initialization with an env-filter and a consistent service name
//! field, following the teacher's `quantum-telemetry` crate with the
//! OTLP/Loki/Prometheus exporters trimmed.

#![warn(missing_docs)]

mod config;

pub use config::LoggingConfig;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while initializing logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global tracing subscriber was already set.
    #[error("tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Initialize process-wide structured logging. Call once, near the top
/// of `main`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}
