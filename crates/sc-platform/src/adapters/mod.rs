//! Adapters implementing this crate's ports.

mod envelope;
pub mod fake;
pub mod validator_adapter;
pub mod zmq_client;

pub use fake::{FakeEventFeed, FakeStateStore, FakeSubmissionSink, FakeTransactionFeed};
pub use validator_adapter::ValidatorAdapter;
pub use zmq_client::ValidatorClient;
