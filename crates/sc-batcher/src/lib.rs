//! # sc-batcher — Batcher / Submitter (spec C4)
//!
//! Wraps already user-signed transactions into a single batch signed by
//! the server's long-lived batcher key, validates each transaction's
//! declared `batcherPublicKey` before submission, and — when the caller
//! asks to wait — polls the platform for a terminal status before
//! returning (spec §4.4). Transport-agnostic: depends on
//! [`sc_platform::SubmissionPort`], not a concrete client, so it is
//! unit-testable against [`sc_platform::FakeSubmissionSink`].

#![warn(missing_docs)]

mod batch;
mod error;
mod submit;

pub use batch::{build_batch, build_transaction, random_nonce, FAMILY_NAME, FAMILY_VERSION};
pub use error::BatcherError;
pub use submit::{BatchOutcome, Batcher};
