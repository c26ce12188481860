//! Ports the domain depends on, injected rather than hard-wired to a
//! transport — this is what lets every handler in `handlers/` be
//! unit-tested against an in-memory map instead of a live platform
//! connection.

use async_trait::async_trait;

/// Read-only view over on-chain state, scoped to one transaction. Async
/// because the production adapter (`handler.rs`) backs it with a round
/// trip to `sc_platform::StatePort::get_state`; the in-memory
/// [`MapState`] fake resolves immediately.
#[async_trait]
pub trait StateReader {
    /// Fetch the raw bytes at `address`, or `None` if the address has
    /// never been written.
    async fn get(&self, address: &str) -> Option<Vec<u8>>;
}

/// Accumulates writes made during one transaction. Staged in-process, not
/// round-tripped per write, so "two writes to the same address within one
/// transaction must compose" (spec §4.3) is trivially satisfied — the
/// processor commits the accumulated map once dispatch returns `Ok`.
pub trait StateWriter {
    /// Stage a write to `address`. Overwrites any prior staged write to the
    /// same address within this transaction.
    fn put(&mut self, address: String, value: Vec<u8>);
}

/// The simplest possible [`StateReader`]/[`StateWriter`] pair, backed by an
/// in-memory map. Used by unit tests and by `handler.rs`, which seeds this
/// from a platform `get_state` call, lets the domain layer read/write
/// against it synchronously in memory, then stages the result back via
/// `sc_platform::StatePort::set_state`.
#[derive(Debug, Default, Clone)]
pub struct MapState {
    entries: std::collections::HashMap<String, Vec<u8>>,
}

impl MapState {
    /// An empty state view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing address→bytes map (e.g. the result of a
    /// platform `get_state` call).
    pub fn from_map(entries: std::collections::HashMap<String, Vec<u8>>) -> Self {
        Self { entries }
    }

    /// Consume the writer, returning everything staged or seeded.
    pub fn into_map(self) -> std::collections::HashMap<String, Vec<u8>> {
        self.entries
    }
}

#[async_trait]
impl StateReader for MapState {
    async fn get(&self, address: &str) -> Option<Vec<u8>> {
        self.entries.get(address).cloned()
    }
}

impl StateWriter for MapState {
    fn put(&mut self, address: String, value: Vec<u8>) {
        self.entries.insert(address, value);
    }
}
