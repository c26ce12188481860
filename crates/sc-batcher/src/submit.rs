//! Batch validation and submission (spec §4.4).

use crate::batch::build_batch;
use crate::error::BatcherError;
use prost::Message as _;
use sc_crypto::Secp256k1KeyPair;
use sc_platform::{BatchStatus, SubmissionPort, SubmitOutcome};
use sc_schema::{Transaction, TransactionHeader};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a successful `submit_batch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The submitted batch's id (its own `header_signature`).
    pub batch_id: String,
    /// The status observed before returning. `Pending` when the caller did
    /// not request `wait`.
    pub status: BatchStatus,
}

/// Signs and submits end-user transactions as a single batcher-signed
/// batch (spec §4.4). Holds the server's long-lived signing key K_b and a
/// handle to the platform's submission port.
pub struct Batcher {
    keypair: Secp256k1KeyPair,
    submission: Arc<dyn SubmissionPort>,
    settle_interval: Duration,
}

impl Batcher {
    /// Build a batcher over `keypair`, submitting through `submission`.
    /// `settle_interval` is the pause after a `wait`ed COMMITTED status
    /// before returning, so C5 has had a chance to observe the block
    /// (spec §4.4).
    pub fn new(keypair: Secp256k1KeyPair, submission: Arc<dyn SubmissionPort>, settle_interval: Duration) -> Self {
        Self { keypair, submission, settle_interval }
    }

    /// This server's batcher public key, hex-encoded. Every incoming
    /// transaction's header `batcherPublicKey` must equal this.
    pub fn public_key(&self) -> String {
        self.keypair.public_key().to_hex()
    }

    /// Validate, sign, and submit `transactions` as one batch.
    ///
    /// Rejects before submission (`BatcherKeyMismatch`, taxonomy
    /// `BadRequest`) if any transaction's header names a different
    /// batcher key than this server's. If `wait`, polls status up to
    /// `timeout` and, on `COMMITTED`, sleeps `settle_interval` before
    /// returning (spec §4.4). Non-OK submit or non-COMMITTED status is
    /// returned verbatim, not retried.
    pub async fn submit_batch(
        &self,
        transactions: Vec<Transaction>,
        wait: bool,
        timeout: Duration,
    ) -> Result<BatchOutcome, BatcherError> {
        if transactions.is_empty() {
            return Err(BatcherError::EmptyBatch);
        }
        let my_key = self.public_key();
        for txn in &transactions {
            let header = TransactionHeader::decode(txn.header.as_slice())
                .map_err(|e| BatcherError::MalformedTransaction(e.to_string()))?;
            if header.batcher_public_key != my_key {
                return Err(BatcherError::BatcherKeyMismatch {
                    expected: my_key,
                    found: header.batcher_public_key,
                });
            }
        }

        let batch = build_batch(&self.keypair, transactions);
        let batch_id = batch.header_signature.clone();
        let encoded = batch.encode_to_vec();

        match self.submission.submit(vec![encoded]).await? {
            SubmitOutcome::Ok => {}
            other => return Err(BatcherError::SubmitRejected(other)),
        }

        if !wait {
            return Ok(BatchOutcome { batch_id, status: BatchStatus::Pending });
        }

        let statuses = self.submission.status(&[batch_id.clone()], true, timeout).await?;
        let status = *statuses.get(&batch_id).unwrap_or(&BatchStatus::Unknown);
        match status {
            BatchStatus::Committed => {
                tokio::time::sleep(self.settle_interval).await;
                Ok(BatchOutcome { batch_id, status })
            }
            _ => Err(BatcherError::NotCommitted { batch_id, status }),
        }
    }
}
