//! `sc-rest-api` — thin HTTP submission facade binary (spec C4, §1 scope:
//! submission and status only).

mod app;
mod error;

use app::AppState;
use sc_batcher::Batcher;
use sc_crypto::Secp256k1KeyPair;
use sc_platform::{SubmissionPort, ValidatorAdapter};
use sc_types::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    sc_telemetry::init_logging(&sc_telemetry::LoggingConfig::for_service("sc-rest-api"))
        .expect("failed to initialize logging");

    let config = AppConfig::from_env();

    let keypair = load_batcher_key(&config).expect("failed to initialize batcher signing key");
    info!(batcher_public_key = %keypair.public_key().to_hex(), "batcher key ready");

    let adapter =
        sc_types::retry::retry_forever("connect to validator", Duration::from_millis(config.retry_wait_ms), || async {
            ValidatorAdapter::connect(&config.validator_url)
        })
        .await;
    let submission: Arc<dyn SubmissionPort> = Arc::new(adapter);

    let batcher = Arc::new(Batcher::new(
        keypair,
        Arc::clone(&submission),
        Duration::from_millis(config.settle_interval_ms),
    ));

    let state = AppState { batcher, submission };
    let router = app::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));
    info!(addr = %config.bind_addr, "sc-rest-api listening");
    axum::serve(listener, router).await.expect("axum server exited unexpectedly");
}

fn load_batcher_key(config: &AppConfig) -> Result<Secp256k1KeyPair, String> {
    let hex_key = config.effective_private_key();
    let bytes = hex::decode(hex_key).map_err(|e| format!("PRIVATE_KEY is not valid hex: {e}"))?;
    let arr: [u8; 32] = bytes.try_into().map_err(|_| "PRIVATE_KEY must be 32 bytes (64 hex chars)".to_string())?;
    Secp256k1KeyPair::from_bytes(arr).map_err(|e| e.to_string())
}
