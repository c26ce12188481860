//! # Configuration
//!
//! Environment-sourced configuration for every binary in the workspace,
//! following the teacher's `TelemetryConfig::from_env()` convention: one
//! `from_env()` constructor with documented variable names and sane
//! development defaults, no config-file parser.

use std::env;

/// Configuration shared by the transaction processor, ledger-sync daemon,
/// and REST submission façade (spec §6).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address of the platform's validator endpoint (`tcp://host:port`).
    pub validator_url: String,
    /// Read-store database host.
    pub db_host: String,
    /// Read-store database port.
    pub db_port: u16,
    /// Read-store database name.
    pub db_name: String,
    /// Read-store database user.
    pub db_user: String,
    /// Read-store database password.
    pub db_password: String,
    /// Fixed backoff between retries of a failed platform/database call.
    pub retry_wait_ms: u64,
    /// Delay after a COMMITTED status before returning to a `wait`ing
    /// caller, so the ledger-sync daemon has observed the block (spec
    /// §4.4).
    pub settle_interval_ms: u64,
    /// Delay before applying PropertyPage changes so the Property rows they
    /// depend on are visible (spec §4.5 step 4).
    pub property_page_settle_ms: u64,
    /// The batcher's long-lived secp256k1 signing key, 64 hex chars.
    pub private_key: Option<String>,
    /// Accepted for compatibility with deployments that still set it; JWT
    /// auth itself is out of scope for this workspace (spec §1).
    pub jwt_secret: Option<String>,
    /// Bind address for the REST submission façade.
    pub bind_addr: String,
}

/// Demo signing key used when `PRIVATE_KEY` is unset, matching spec §6's
/// "missing signing secrets emit a warning and fall back to insecure
/// defaults for demo use."
pub const INSECURE_DEMO_PRIVATE_KEY: &str =
    "0000000000000000000000000000000000000000000000000000000000000001";

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `VALIDATOR_URL` (default: `tcp://localhost:4004`)
    /// - `DB_HOST` (default: `localhost`)
    /// - `DB_PORT` (default: `5432`)
    /// - `DB_NAME` (default: `supply_chain`)
    /// - `DB_USER` (default: `sawtooth`)
    /// - `DB_PASSWORD` (default: empty)
    /// - `RETRY_WAIT` ms (default: `5000`)
    /// - `SETTLE_INTERVAL` ms (default: `1000`)
    /// - `PROPERTY_PAGE_SETTLE` ms (default: `100`)
    /// - `PRIVATE_KEY` (64 hex chars; warns and falls back if unset)
    /// - `JWT_SECRET` (accepted, unused)
    /// - `BIND_ADDR` (default: `0.0.0.0:8020`)
    pub fn from_env() -> Self {
        let private_key = env::var("PRIVATE_KEY").ok().or_else(|| {
            tracing::warn!(
                "PRIVATE_KEY not set; falling back to an insecure demo signing key"
            );
            None
        });

        Self {
            validator_url: env::var("VALIDATOR_URL")
                .unwrap_or_else(|_| "tcp://localhost:4004".to_string()),
            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            db_port: env::var("DB_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5432),
            db_name: env::var("DB_NAME").unwrap_or_else(|_| "supply_chain".to_string()),
            db_user: env::var("DB_USER").unwrap_or_else(|_| "sawtooth".to_string()),
            db_password: env::var("DB_PASSWORD").unwrap_or_default(),
            retry_wait_ms: env::var("RETRY_WAIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            settle_interval_ms: env::var("SETTLE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_000),
            property_page_settle_ms: env::var("PROPERTY_PAGE_SETTLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            private_key,
            jwt_secret: env::var("JWT_SECRET").ok(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8020".to_string()),
        }
    }

    /// The effective signing key: the configured `PRIVATE_KEY`, or the
    /// insecure demo key if none was set.
    pub fn effective_private_key(&self) -> &str {
        self.private_key
            .as_deref()
            .unwrap_or(INSECURE_DEMO_PRIVATE_KEY)
    }

    /// Postgres connection string built from the discrete `DB_*` fields.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }
}
