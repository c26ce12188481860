//! # Error Taxonomy
//!
//! The five abstract error kinds from spec §7, shared by every component so
//! a caller can reason about disposition (retry, reject, skip, exit) without
//! knowing which crate raised the error.

use thiserror::Error;

/// A malformed payload, authorization failure, or invariant violation.
///
/// Raised by the transaction processor (C3) and the batcher's pre-submit
/// checks (C4). Never retried; surfaced to the submitter as a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Build a validation error from anything `Display`-able.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A submit/status/subscribe RPC failure, a dropped event stream, or an
/// unreachable database. Recovered locally by indefinite retry with a fixed
/// backoff (`RETRY_WAIT`); logged at `warn`.
#[derive(Debug, Error)]
pub enum TransientPlatformError {
    /// The platform connection could not be established or was lost.
    #[error("platform connection error: {0}")]
    Connection(String),
    /// The platform rejected a submission or status request.
    #[error("platform rpc error: {0}")]
    Rpc(String),
    /// The read-store database is unreachable.
    #[error("database error: {0}")]
    Database(String),
}

/// Container bytes failed to parse. Per spec §9, the offending change is
/// logged and skipped; block commit still proceeds.
#[derive(Debug, Error)]
#[error("failed to decode container at address {address}: {reason}")]
pub struct DecodeError {
    /// The address whose value failed to decode.
    pub address: String,
    /// Why decoding failed.
    pub reason: String,
}

/// The requested entity does not exist in the read store. Surfaced as a
/// 404-class response on the (external, out-of-scope) HTTP query surface;
/// kept here only so internal lookups have a typed "not found" to return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not found: {0}")]
pub struct NotFoundError(pub String);

/// Unrecoverable: signing-key initialization failure, or a hard
/// subscription rejection after the first successful handshake. The process
/// should exit after logging this.
#[derive(Debug, Error)]
pub enum FatalError {
    /// The batcher/signing key could not be initialized.
    #[error("signing key initialization failed: {0}")]
    KeyInit(String),
    /// The event subscription was rejected after an established session.
    #[error("subscription rejected: {0}")]
    SubscriptionRejected(String),
}
