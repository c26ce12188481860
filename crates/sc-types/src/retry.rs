//! # Fixed-Delay Retry
//!
//! Spec §5/§9: "platform reconnection and database readiness each back off
//! with a fixed retry wait ... and retry indefinitely." This is a
//! deliberate simplification (the design notes call for exponential backoff
//! as a future improvement) — implemented here exactly as specified, not
//! embellished.

use std::fmt::Debug;
use std::time::Duration;
use tracing::warn;

/// Retry `f` forever with a fixed delay between attempts, logging each
/// failure at `warn`. Returns the first success.
pub async fn retry_forever<T, E, F, Fut>(operation: &str, delay: Duration, mut f: F) -> T
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Debug,
{
    loop {
        match f().await {
            Ok(v) => return v,
            Err(e) => {
                warn!(operation, error = ?e, delay_ms = delay.as_millis() as u64, "retrying after failure");
                tokio::time::sleep(delay).await;
            }
        }
    }
}
