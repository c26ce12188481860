//! # sc-txn-processor — Transaction Processor (spec C3)
//!
//! Validates and applies the eight supply-chain action contracts (spec
//! §4.3): `CREATE_AGENT`, `CREATE_RECORD_TYPE`, `CREATE_RECORD`,
//! `UPDATE_PROPERTIES`, `CREATE_PROPOSAL`, `ANSWER_PROPOSAL`,
//! `REVOKE_REPORTER`, `FINALIZE_RECORD`.
//!
//! [`domain`] holds pure validation and state-transition logic behind the
//! [`ports::StateReader`]/[`ports::StateWriter`] seam, so every handler runs
//! identically against [`ports::MapState`] in a unit test or a live
//! [`sc_platform::StatePort`] connection via [`handler::apply_transaction`].

#![warn(missing_docs)]

pub mod domain;
pub mod handler;
pub mod ports;

pub use domain::TpError;
pub use handler::apply_transaction;
