//! Errors raised at the platform boundary.
//!
//! All variants here fold into [`sc_types::TransientPlatformError`] (spec
//! §7): every failure this crate can produce is recoverable by the
//! caller's indefinite retry loop, never a [`sc_types::FatalError`] — a
//! hard subscription rejection is promoted to fatal by the caller, not
//! by this crate.

use sc_types::TransientPlatformError;
use thiserror::Error;

/// Errors raised by a [`crate::ports::StatePort`], [`crate::ports::EventPort`],
/// or [`crate::ports::SubmissionPort`] implementation.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The connection to the platform could not be established or was lost.
    #[error("platform connection error: {0}")]
    Connection(String),
    /// The platform rejected or failed to answer an RPC.
    #[error("platform rpc error: {0}")]
    Rpc(String),
    /// A response arrived that did not match any pending request.
    #[error("unexpected or stale correlation id: {0}")]
    StaleCorrelation(String),
}

impl From<PlatformError> for TransientPlatformError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::Connection(msg) => TransientPlatformError::Connection(msg),
            PlatformError::Rpc(msg) | PlatformError::StaleCorrelation(msg) => {
                TransientPlatformError::Rpc(msg)
            }
        }
    }
}
