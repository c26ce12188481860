//! Domain types exchanged at the platform boundary (spec §6).

use sc_types::BlockNum;

/// One namespaced state change delivered inside a `state-delta` event
/// (spec §6: "each state-delta carries a list of `{address, value-bytes,
/// type}`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// The 70-hex address that changed.
    pub address: String,
    /// The new container bytes at that address (empty on delete).
    pub value: Vec<u8>,
}

/// One delivered event envelope: a committed block plus its namespaced
/// state deltas (spec §4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCommitted {
    /// Height of the committed block.
    pub block_num: BlockNum,
    /// The block's identifier.
    pub block_id: String,
    /// State root hash after applying this block.
    pub state_root_hash: String,
    /// Namespaced state changes carried by this block, in delivery order.
    pub changes: Vec<StateChange>,
}

/// Outcome of submitting a batch list (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The platform accepted the batch list for processing.
    Ok,
    /// At least one batch failed structural validation.
    InvalidBatch,
    /// The platform's submission queue is full; retry later.
    QueueFull,
}

/// One transaction routed to this processor by the platform (spec §4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingTransaction {
    /// Correlates this transaction with its eventual [`TransactionOutcome`].
    pub correlation_id: String,
    /// The transaction family payload bytes (spec §4.2).
    pub payload: Vec<u8>,
    /// The public key that signed the enclosing transaction.
    pub signer: String,
}

/// Disposition reported back to the platform for one processed transaction
/// (spec §4.3, §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Applied successfully.
    Ok,
    /// Rejected: malformed payload, authorization failure, or invariant
    /// violation.
    Invalid(String),
}

/// Status of a previously submitted batch (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Committed to a block.
    Committed,
    /// Still awaiting validation or commit.
    Pending,
    /// Rejected during validation.
    Invalid,
    /// The platform has no record of this batch ID.
    Unknown,
}
