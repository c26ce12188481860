//! # sc-ledger-sync — Ledger-Sync Delta Pipeline (spec C5)
//!
//! Maintains the platform's long-lived `block-commit` + namespaced
//! `state-delta` event subscription (established from genesis on every
//! startup — no persisted cursor, since the read store's block-upsert
//! primitive is idempotent under replay) and projects each committed
//! block into [`sc_read_store`] through a single-writer delta queue
//! (spec §4.5, §9): blocks are applied strictly one at a time, in arrival
//! order, never concurrently.
//!
//! [`pipeline::apply_block`] implements the six-step per-block job;
//! [`worker::run`] is the bounded-channel queue that drives it.

#![warn(missing_docs)]

pub mod decode;
pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod worker;

pub use error::PipelineError;
pub use pipeline::apply_block;
pub use worker::{run, QUEUE_CAPACITY};
