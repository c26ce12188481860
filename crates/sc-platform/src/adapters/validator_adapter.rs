//! Concrete [`StatePort`]/[`EventPort`]/[`SubmissionPort`] implementation
//! backed by [`ValidatorClient`].

use super::envelope::{self, BatchStatusWire, EventFrame, Request, Response, SubmitResultWire, TpOutcomeWire, TpRequestFrame};
use super::zmq_client::ValidatorClient;
use crate::error::PlatformError;
use crate::ports::{EventPort, StatePort, SubmissionPort, TransactionPort};
use crate::types::{BatchStatus, BlockCommitted, IncomingTransaction, StateChange, SubmitOutcome, TransactionOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Platform adapter over a ZeroMQ DEALER connection to the validator.
pub struct ValidatorAdapter {
    client: ValidatorClient,
    events: Mutex<Option<mpsc::UnboundedReceiver<Vec<u8>>>>,
    transactions: Mutex<Option<mpsc::UnboundedReceiver<Vec<u8>>>>,
}

impl ValidatorAdapter {
    /// Connect to `validator_url` without yet establishing the event
    /// subscription (call [`Self::subscribe`] once at startup, per
    /// spec §4.5).
    pub fn connect(validator_url: &str) -> Result<Self, PlatformError> {
        let client = ValidatorClient::connect(validator_url)?;
        Ok(Self { client, events: Mutex::new(None), transactions: Mutex::new(None) })
    }

    /// Establish the long-lived `block-commit` + namespaced `state-delta`
    /// subscription filtered to `namespace_filter` (spec §4.5, §6).
    pub fn subscribe(&self, namespace_filter: String) -> Result<(), PlatformError> {
        let rx = self
            .client
            .subscribe(envelope::encode(&Request::SubscribeEvents { namespace_filter }))?;
        *self.events.lock().expect("event receiver mutex poisoned") = Some(rx);
        Ok(())
    }

    /// Register this process as the transaction processor for
    /// `family_name`/`family_version` over `namespaces` (spec §4.3), so the
    /// platform starts routing matching transactions here.
    pub fn register(&self, family_name: String, family_version: String, namespaces: Vec<String>) -> Result<(), PlatformError> {
        let rx = self.client.subscribe(envelope::encode(&Request::RegisterTransactionProcessor {
            family_name,
            family_version,
            namespaces,
        }))?;
        *self.transactions.lock().expect("transaction receiver mutex poisoned") = Some(rx);
        Ok(())
    }
}

#[async_trait]
impl StatePort for ValidatorAdapter {
    async fn get_state(&self, addresses: &[String]) -> Result<HashMap<String, Vec<u8>>, PlatformError> {
        let request = Request::GetState { addresses: addresses.to_vec() };
        let bytes = self.client.request(envelope::encode(&request), DEFAULT_RPC_TIMEOUT).await?;
        match envelope::decode(&bytes).map_err(PlatformError::Rpc)? {
            Response::State(state) => Ok(state),
            _ => Err(PlatformError::Rpc("unexpected response to get_state".into())),
        }
    }

    async fn set_state(&self, writes: HashMap<String, Vec<u8>>) -> Result<(), PlatformError> {
        let request = Request::SetState { writes };
        let bytes = self.client.request(envelope::encode(&request), DEFAULT_RPC_TIMEOUT).await?;
        match envelope::decode(&bytes).map_err(PlatformError::Rpc)? {
            Response::Ack => Ok(()),
            _ => Err(PlatformError::Rpc("unexpected response to set_state".into())),
        }
    }
}

#[async_trait]
impl EventPort for ValidatorAdapter {
    async fn next_block(&self) -> Result<BlockCommitted, PlatformError> {
        let bytes = {
            let mut guard = self.events.lock().expect("event receiver mutex poisoned");
            let rx = guard
                .as_mut()
                .ok_or_else(|| PlatformError::Connection("subscribe() was never called".into()))?;
            rx.recv().await
        };
        let bytes = bytes.ok_or_else(|| PlatformError::Connection("event subscription closed".into()))?;
        let frame: EventFrame = envelope::decode(&bytes).map_err(PlatformError::Rpc)?;
        Ok(BlockCommitted {
            block_num: frame.block_num,
            block_id: frame.block_id,
            state_root_hash: frame.state_root_hash,
            changes: frame
                .changes
                .into_iter()
                .map(|(address, value)| StateChange { address, value })
                .collect(),
        })
    }
}

#[async_trait]
impl TransactionPort for ValidatorAdapter {
    async fn next_transaction(&self) -> Result<IncomingTransaction, PlatformError> {
        let bytes = {
            let mut guard = self.transactions.lock().expect("transaction receiver mutex poisoned");
            let rx = guard
                .as_mut()
                .ok_or_else(|| PlatformError::Connection("register() was never called".into()))?;
            rx.recv().await
        };
        let bytes = bytes.ok_or_else(|| PlatformError::Connection("transaction subscription closed".into()))?;
        let frame: TpRequestFrame = envelope::decode(&bytes).map_err(PlatformError::Rpc)?;
        Ok(IncomingTransaction { correlation_id: frame.correlation_id, payload: frame.payload, signer: frame.signer })
    }

    async fn respond(&self, correlation_id: String, outcome: TransactionOutcome) -> Result<(), PlatformError> {
        let wire = match outcome {
            TransactionOutcome::Ok => TpOutcomeWire::Ok,
            TransactionOutcome::Invalid(reason) => TpOutcomeWire::Invalid(reason),
        };
        self.client.notify(envelope::encode(&Request::TpProcessResponse { correlation_id, outcome: wire }))
    }
}

#[async_trait]
impl SubmissionPort for ValidatorAdapter {
    async fn submit(&self, batches: Vec<Vec<u8>>) -> Result<SubmitOutcome, PlatformError> {
        let request = Request::SubmitBatches { batches };
        let bytes = self.client.request(envelope::encode(&request), DEFAULT_RPC_TIMEOUT).await?;
        match envelope::decode(&bytes).map_err(PlatformError::Rpc)? {
            Response::SubmitResult(SubmitResultWire::Ok) => Ok(SubmitOutcome::Ok),
            Response::SubmitResult(SubmitResultWire::InvalidBatch) => Ok(SubmitOutcome::InvalidBatch),
            Response::SubmitResult(SubmitResultWire::QueueFull) => Ok(SubmitOutcome::QueueFull),
            _ => Err(PlatformError::Rpc("unexpected response to submit".into())),
        }
    }

    async fn status(
        &self,
        batch_ids: &[String],
        wait: bool,
        timeout: Duration,
    ) -> Result<HashMap<String, BatchStatus>, PlatformError> {
        let request = Request::BatchStatus {
            batch_ids: batch_ids.to_vec(),
            wait,
            timeout_ms: timeout.as_millis() as u64,
        };
        // The server-side wait is bounded by `timeout`; give the round trip
        // itself a little headroom beyond that.
        let bytes = self.client.request(envelope::encode(&request), timeout + Duration::from_secs(2)).await?;
        match envelope::decode(&bytes).map_err(PlatformError::Rpc)? {
            Response::BatchStatuses(statuses) => Ok(statuses
                .into_iter()
                .map(|(id, status)| {
                    let status = match status {
                        BatchStatusWire::Committed => BatchStatus::Committed,
                        BatchStatusWire::Pending => BatchStatus::Pending,
                        BatchStatusWire::Invalid => BatchStatus::Invalid,
                        BatchStatusWire::Unknown => BatchStatus::Unknown,
                    };
                    (id, status)
                })
                .collect()),
            _ => Err(PlatformError::Rpc("unexpected response to status".into())),
        }
    }
}
