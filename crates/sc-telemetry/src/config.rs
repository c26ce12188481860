//! Logging configuration from environment variables.

use std::env;

/// Configuration for this workspace's structured logging. The LGTM-style
/// aggregation backend (Loki/Tempo/Grafana) a deployment ships logs to is
/// external to this workspace (spec §1); this crate only shapes what
/// each binary writes to its own stdout.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Service name attached to every log line.
    pub service_name: String,
    /// `tracing_subscriber::EnvFilter` directive (e.g. `info`, `debug`).
    pub log_level: String,
    /// Emit newline-delimited JSON instead of human-readable text.
    pub json_logs: bool,
}

impl LoggingConfig {
    /// Build configuration for `service_name` from the process
    /// environment.
    ///
    /// # Environment Variables
    ///
    /// - `RUST_LOG` (or `SC_LOG_LEVEL`): filter directive (default: `info`)
    /// - `SC_JSON_LOGS`: emit JSON instead of text (default: `false`)
    pub fn for_service(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            log_level: env::var("SC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("SC_JSON_LOGS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_and_text() {
        let cfg = LoggingConfig::for_service("sc-tp");
        assert_eq!(cfg.service_name, "sc-tp");
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.json_logs);
    }
}
