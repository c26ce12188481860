//! Errors raised while applying one block-job (spec §4.5, §7).

use sc_read_store::ReadStoreError;
use sc_types::TransientPlatformError;
use thiserror::Error;

/// Failure applying one block-job. `DecodeError` is deliberately absent:
/// per spec §9's resolved open question, a malformed container is logged
/// and the offending change skipped, not surfaced as a pipeline failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The read-store database rejected a read or write.
    #[error("read store error: {0}")]
    ReadStore(#[from] ReadStoreError),
}

impl From<PipelineError> for TransientPlatformError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ReadStore(e) => e.into(),
        }
    }
}
