//! In-memory test doubles for the platform ports, used by this crate's
//! own tests and by downstream crates exercising C3/C4/C5 without a live
//! validator.

use crate::error::PlatformError;
use crate::ports::{EventPort, StatePort, SubmissionPort, TransactionPort};
use crate::types::{BatchStatus, BlockCommitted, IncomingTransaction, SubmitOutcome, TransactionOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;

/// An in-memory flat key-value store standing in for the platform's
/// state interface (spec §6).
#[derive(Default)]
pub struct FakeStateStore {
    state: Mutex<HashMap<String, Vec<u8>>>,
}

impl FakeStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only snapshot, for assertions in tests.
    pub fn snapshot(&self) -> HashMap<String, Vec<u8>> {
        self.state.lock().expect("state mutex poisoned").clone()
    }
}

#[async_trait]
impl StatePort for FakeStateStore {
    async fn get_state(&self, addresses: &[String]) -> Result<HashMap<String, Vec<u8>>, PlatformError> {
        let state = self.state.lock().expect("state mutex poisoned");
        Ok(addresses
            .iter()
            .filter_map(|addr| state.get(addr).map(|bytes| (addr.clone(), bytes.clone())))
            .collect())
    }

    async fn set_state(&self, writes: HashMap<String, Vec<u8>>) -> Result<(), PlatformError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.extend(writes);
        Ok(())
    }
}

/// A scripted sequence of block-commit events, for C5 pipeline tests.
pub struct FakeEventFeed {
    blocks: AsyncMutex<std::collections::VecDeque<BlockCommitted>>,
}

impl FakeEventFeed {
    /// Build a feed that yields `blocks` in order, then hangs forever
    /// (mirroring a live, idle subscription).
    pub fn new(blocks: Vec<BlockCommitted>) -> Self {
        Self { blocks: AsyncMutex::new(blocks.into()) }
    }
}

#[async_trait]
impl EventPort for FakeEventFeed {
    async fn next_block(&self) -> Result<BlockCommitted, PlatformError> {
        let mut blocks = self.blocks.lock().await;
        match blocks.pop_front() {
            Some(block) => Ok(block),
            None => std::future::pending().await,
        }
    }
}

/// A scripted sequence of inbound transactions, for C3 binary-wiring tests.
pub struct FakeTransactionFeed {
    queue: AsyncMutex<std::collections::VecDeque<IncomingTransaction>>,
    responses: Mutex<Vec<(String, TransactionOutcome)>>,
}

impl FakeTransactionFeed {
    /// Build a feed that yields `transactions` in order, then hangs
    /// forever (mirroring a live, idle registration).
    pub fn new(transactions: Vec<IncomingTransaction>) -> Self {
        Self { queue: AsyncMutex::new(transactions.into()), responses: Mutex::new(Vec::new()) }
    }

    /// Dispositions reported so far, for assertions in tests.
    pub fn responses(&self) -> Vec<(String, TransactionOutcome)> {
        self.responses.lock().expect("responses mutex poisoned").clone()
    }
}

#[async_trait]
impl TransactionPort for FakeTransactionFeed {
    async fn next_transaction(&self) -> Result<IncomingTransaction, PlatformError> {
        let mut queue = self.queue.lock().await;
        match queue.pop_front() {
            Some(tx) => Ok(tx),
            None => std::future::pending().await,
        }
    }

    async fn respond(&self, correlation_id: String, outcome: TransactionOutcome) -> Result<(), PlatformError> {
        self.responses.lock().expect("responses mutex poisoned").push((correlation_id, outcome));
        Ok(())
    }
}

/// A submission sink that always accepts and immediately reports
/// `Committed`, for C4 tests that don't need real platform round trips.
#[derive(Default)]
pub struct FakeSubmissionSink {
    submitted: Mutex<Vec<Vec<u8>>>,
}

impl FakeSubmissionSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches submitted so far, for assertions in tests.
    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.submitted.lock().expect("submitted mutex poisoned").clone()
    }
}

#[async_trait]
impl SubmissionPort for FakeSubmissionSink {
    async fn submit(&self, batches: Vec<Vec<u8>>) -> Result<SubmitOutcome, PlatformError> {
        self.submitted.lock().expect("submitted mutex poisoned").extend(batches);
        Ok(SubmitOutcome::Ok)
    }

    async fn status(
        &self,
        batch_ids: &[String],
        _wait: bool,
        _timeout: Duration,
    ) -> Result<HashMap<String, BatchStatus>, PlatformError> {
        Ok(batch_ids.iter().map(|id| (id.clone(), BatchStatus::Committed)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_state_store_roundtrips() {
        let store = FakeStateStore::new();
        let mut writes = HashMap::new();
        writes.insert("addr1".to_string(), vec![1, 2, 3]);
        store.set_state(writes).await.unwrap();

        let read = store.get_state(&["addr1".to_string(), "addr2".to_string()]).await.unwrap();
        assert_eq!(read.get("addr1"), Some(&vec![1, 2, 3]));
        assert_eq!(read.get("addr2"), None);
    }

    #[tokio::test]
    async fn fake_transaction_feed_yields_in_order_then_records_responses() {
        let feed = FakeTransactionFeed::new(vec![IncomingTransaction {
            correlation_id: "c1".into(),
            payload: vec![1],
            signer: "pk1".into(),
        }]);
        let tx = feed.next_transaction().await.unwrap();
        assert_eq!(tx.correlation_id, "c1");

        feed.respond(tx.correlation_id, TransactionOutcome::Ok).await.unwrap();
        assert_eq!(feed.responses(), vec![("c1".to_string(), TransactionOutcome::Ok)]);
    }

    #[tokio::test]
    async fn fake_submission_sink_reports_committed() {
        let sink = FakeSubmissionSink::new();
        sink.submit(vec![vec![9, 9]]).await.unwrap();
        assert_eq!(sink.submitted(), vec![vec![9, 9]]);

        let statuses = sink.status(&["b1".into()], true, Duration::from_secs(1)).await.unwrap();
        assert_eq!(statuses.get("b1"), Some(&BatchStatus::Committed));
    }
}
