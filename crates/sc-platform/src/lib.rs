//! # sc-platform — Platform Boundary Ports and Adapters (spec §6)
//!
//! The blockchain platform itself — consensus, the wire-level client
//! API, event streaming — is an external collaborator (spec §1). This
//! crate defines the four ports this workspace consumes from it
//! ([`ports::StatePort`], [`ports::EventPort`], [`ports::SubmissionPort`],
//! [`ports::TransactionPort`]) and one concrete adapter reaching a
//! validator over ZeroMQ, so C3, C4, and C5 depend on traits, not a
//! transport.

#![warn(missing_docs)]

pub mod adapters;
pub mod error;
pub mod ports;
pub mod types;

pub use adapters::{
    FakeEventFeed, FakeStateStore, FakeSubmissionSink, FakeTransactionFeed, ValidatorAdapter, ValidatorClient,
};
pub use error::PlatformError;
pub use ports::{EventPort, StatePort, SubmissionPort, TransactionPort};
pub use types::{BatchStatus, BlockCommitted, IncomingTransaction, StateChange, SubmitOutcome, TransactionOutcome};
