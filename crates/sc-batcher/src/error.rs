//! Errors raised while batching and submitting transactions (spec §4.4, §7).
//!
//! Validation failures here (a mismatched batcher key) are never retried,
//! same disposition as C3's `ValidationError`. Everything past submission —
//! a non-OK submit result or a non-COMMITTED status — is surfaced to the
//! caller verbatim, per spec §4.4's "surfaced to the caller" wording; this
//! crate does not retry or reinterpret those outcomes.

use sc_platform::{BatchStatus, PlatformError, SubmitOutcome};

/// Why a batch submission did not complete successfully.
#[derive(Debug, thiserror::Error)]
pub enum BatcherError {
    /// A transaction's `batcherPublicKey` did not equal this server's key.
    #[error("transaction batcher key {found} does not match this server's key {expected}")]
    BatcherKeyMismatch {
        /// This server's batcher public key.
        expected: String,
        /// The key found on the offending transaction's header.
        found: String,
    },
    /// A transaction header or payload failed to decode.
    #[error("malformed transaction header: {0}")]
    MalformedTransaction(String),
    /// No transactions were supplied.
    #[error("a batch must contain at least one transaction")]
    EmptyBatch,
    /// The platform rejected the submit or status RPC itself.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
    /// The platform accepted the RPC but rejected the batch.
    #[error("batch submission was not accepted: {0:?}")]
    SubmitRejected(SubmitOutcome),
    /// The caller asked to wait and the batch reached a non-committed
    /// terminal status.
    #[error("batch {batch_id} did not commit: {status:?}")]
    NotCommitted {
        /// The submitted batch's id.
        batch_id: String,
        /// The terminal (or still-pending) status observed.
        status: BatchStatus,
    },
}
