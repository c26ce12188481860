//! `sc-tp` — thin transaction processor daemon binary (spec C3). Registers
//! with the platform for `supply_chain`/`1.1` transactions over the
//! application's namespace, then loops handing each delivered payload to
//! [`sc_txn_processor::apply_transaction`] and reporting the disposition.

use sc_platform::{TransactionOutcome, TransactionPort, ValidatorAdapter};
use sc_types::AppConfig;
use tracing::{info, warn};

const FAMILY_NAME: &str = "supply_chain";
const FAMILY_VERSION: &str = "1.1";

#[tokio::main]
async fn main() {
    sc_telemetry::init_logging(&sc_telemetry::LoggingConfig::for_service("sc-tp"))
        .expect("failed to initialize logging");

    let config = AppConfig::from_env();
    let retry_wait = std::time::Duration::from_millis(config.retry_wait_ms);

    let adapter = sc_types::retry::retry_forever("connect to validator", retry_wait, || async {
        ValidatorAdapter::connect(&config.validator_url)
    })
    .await;
    adapter
        .register(FAMILY_NAME.to_string(), FAMILY_VERSION.to_string(), vec![sc_address::NAMESPACE.to_string()])
        .expect("failed to register as transaction processor");

    info!(validator_url = %config.validator_url, family = FAMILY_NAME, version = FAMILY_VERSION, "sc-tp registered, awaiting transactions");

    loop {
        let transaction = match adapter.next_transaction().await {
            Ok(transaction) => transaction,
            Err(e) => {
                warn!(error = %e, "failed to receive next transaction, retrying");
                tokio::time::sleep(retry_wait).await;
                continue;
            }
        };

        let outcome = match sc_txn_processor::apply_transaction(&transaction.payload, &transaction.signer, &adapter).await {
            Ok(()) => TransactionOutcome::Ok,
            Err(e) => {
                warn!(signer = %transaction.signer, error = %e, "transaction rejected");
                TransactionOutcome::Invalid(e.to_string())
            }
        };

        if let Err(e) = adapter.respond(transaction.correlation_id, outcome).await {
            warn!(error = %e, "failed to report transaction disposition");
        }
    }
}
