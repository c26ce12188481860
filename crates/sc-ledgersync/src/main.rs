//! `sc-ledgersync` — thin ledger-sync daemon binary (spec C5). Wires the
//! platform's event subscription and the read-store connection pool into
//! [`sc_ledger_sync::run`]; all pipeline logic lives in that crate.

use sc_platform::{EventPort, ValidatorAdapter};
use sc_types::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() {
    sc_telemetry::init_logging(&sc_telemetry::LoggingConfig::for_service("sc-ledgersync"))
        .expect("failed to initialize logging");

    let config = AppConfig::from_env();
    let retry_wait = Duration::from_millis(config.retry_wait_ms);

    let adapter = sc_types::retry::retry_forever("connect to validator", retry_wait, || async {
        ValidatorAdapter::connect(&config.validator_url)
    })
    .await;
    adapter
        .subscribe(sc_address::namespace_filter_regex())
        .expect("failed to establish block-commit/state-delta subscription");
    let events: Arc<dyn EventPort> = Arc::new(adapter);

    let pool = sc_types::retry::retry_forever("connect to read-store database", retry_wait, || async {
        sc_read_store::build_pool(&config.database_url())
    })
    .await;
    sc_read_store::run_migrations(&pool).expect("failed to apply read-store migrations");

    info!(validator_url = %config.validator_url, db_host = %config.db_host, "sc-ledgersync starting delta pipeline");
    sc_ledger_sync::run(
        events,
        pool,
        retry_wait,
        Duration::from_millis(config.property_page_settle_ms),
    )
    .await;
}
