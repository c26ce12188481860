//! Internal request/response envelope carried over [`super::zmq_client`]'s
//! DEALER frames. This is this workspace's own framing, not the
//! platform's actual wire protocol (out of scope, spec §1) — it only
//! needs to round-trip between this adapter and whatever responds on the
//! other end of `VALIDATOR_URL`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize)]
pub enum Request {
    GetState { addresses: Vec<String> },
    SetState { writes: HashMap<String, Vec<u8>> },
    SubmitBatches { batches: Vec<Vec<u8>> },
    BatchStatus { batch_ids: Vec<String>, wait: bool, timeout_ms: u64 },
    SubscribeEvents { namespace_filter: String },
    RegisterTransactionProcessor { family_name: String, family_version: String, namespaces: Vec<String> },
    TpProcessResponse { correlation_id: String, outcome: TpOutcomeWire },
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Response {
    State(HashMap<String, Vec<u8>>),
    Ack,
    SubmitResult(SubmitResultWire),
    BatchStatuses(HashMap<String, BatchStatusWire>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TpOutcomeWire {
    Ok,
    Invalid(String),
}

/// One pushed transaction-processing request, delivered to a registered
/// processor (spec §4.3).
#[derive(Debug, Serialize, Deserialize)]
pub struct TpRequestFrame {
    pub correlation_id: String,
    pub payload: Vec<u8>,
    pub signer: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SubmitResultWire {
    Ok,
    InvalidBatch,
    QueueFull,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum BatchStatusWire {
    Committed,
    Pending,
    Invalid,
    Unknown,
}

/// One pushed event frame: a committed block plus its namespaced deltas.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventFrame {
    pub block_num: i64,
    pub block_id: String,
    pub state_root_hash: String,
    pub changes: Vec<(String, Vec<u8>)>,
}

pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    bincode::serialize(value).expect("envelope types are always serializable")
}

pub fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, String> {
    bincode::deserialize(bytes).map_err(|e| e.to_string())
}
