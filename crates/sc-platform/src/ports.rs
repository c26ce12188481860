//! Outbound ports for the platform boundary (spec §6): the state-store
//! interface consumed by C3, the event interface consumed by C5, and the
//! submission interface consumed by C4. Modeled as traits so the
//! transaction processor, ledger-sync daemon, and batcher can each be
//! tested against an in-memory double instead of a live platform.

use crate::error::PlatformError;
use crate::types::{BatchStatus, BlockCommitted, IncomingTransaction, SubmitOutcome, TransactionOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// `get_state` / `set_state` over the platform's flat address space (spec
/// §6). Addresses are 70-hex; values are encoded Container messages.
#[async_trait]
pub trait StatePort: Send + Sync {
    /// Fetch the current bytes at each address. Addresses with no value
    /// are omitted from the result map.
    async fn get_state(&self, addresses: &[String]) -> Result<HashMap<String, Vec<u8>>, PlatformError>;

    /// Write the given address → bytes pairs, replacing any prior value.
    async fn set_state(&self, writes: HashMap<String, Vec<u8>>) -> Result<(), PlatformError>;
}

/// A long-lived subscription to `block-commit` and namespaced
/// `state-delta` events (spec §4.5, §6). Implementations establish the
/// subscription from the genesis anchor; C5 does not resume from a
/// persisted cursor.
#[async_trait]
pub trait EventPort: Send + Sync {
    /// Block until the next committed block and its namespaced deltas are
    /// available, or the subscription fails.
    async fn next_block(&self) -> Result<BlockCommitted, PlatformError>;
}

/// Inbound transaction delivery for a registered processor (spec §4.3):
/// the platform pushes one transaction at a time and expects a disposition
/// back before the next one arrives.
#[async_trait]
pub trait TransactionPort: Send + Sync {
    /// Block until the platform routes the next transaction to this
    /// processor, or the registration fails.
    async fn next_transaction(&self) -> Result<IncomingTransaction, PlatformError>;

    /// Report the outcome of the most recently received transaction.
    async fn respond(&self, correlation_id: String, outcome: TransactionOutcome) -> Result<(), PlatformError>;
}

/// Submission and status polling for signed batches (spec §4.4, §6).
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    /// Submit one or more signed, encoded batches.
    async fn submit(&self, batches: Vec<Vec<u8>>) -> Result<SubmitOutcome, PlatformError>;

    /// Poll batch status, optionally blocking server-side up to `timeout`
    /// for a terminal state.
    async fn status(
        &self,
        batch_ids: &[String],
        wait: bool,
        timeout: Duration,
    ) -> Result<HashMap<String, BatchStatus>, PlatformError>;
}
