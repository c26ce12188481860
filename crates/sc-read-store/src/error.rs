//! Read-store errors fold into [`sc_types::TransientPlatformError::Database`]
//! (spec §7) — every failure here is recovered by the caller's indefinite
//! retry loop, not surfaced as a validation or fatal error.

use sc_types::TransientPlatformError;
use thiserror::Error;

/// Failure connecting to, migrating, or querying the read-store database.
#[derive(Debug, Error)]
pub enum ReadStoreError {
    /// The connection pool could not be built or a connection could not
    /// be checked out.
    #[error("database connection error: {0}")]
    Connection(String),
    /// A query or transaction failed.
    #[error("database query error: {0}")]
    Query(String),
    /// Pending migrations failed to apply.
    #[error("database migration error: {0}")]
    Migration(String),
}

impl From<ReadStoreError> for TransientPlatformError {
    fn from(e: ReadStoreError) -> Self {
        TransientPlatformError::Database(e.to_string())
    }
}
