//! # sc-types — Shared Configuration and Error Taxonomy
//!
//! Cross-cutting types every component in the workspace depends on:
//! environment-sourced configuration (§6), the five-member error taxonomy
//! (§7), and a fixed-delay retry helper (§5).

pub mod config;
pub mod error;
pub mod retry;

pub use config::AppConfig;
pub use error::{DecodeError, FatalError, NotFoundError, TransientPlatformError, ValidationError};
pub use retry::retry_forever;

/// A block height. Spec: block numbers are non-decreasing and compared with
/// a sentinel "current" value (`END_OF_TIME`) for open read-store rows.
pub type BlockNum = i64;

/// Sentinel `endBlockNum` meaning "current" (spec §3, §4.6).
pub const END_OF_TIME: BlockNum = i64::MAX;

/// A block descriptor, as delivered by a `block-commit` event (spec §4.5,
/// §6) and persisted into the read store's `blocks` table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockDescriptor {
    /// Height of the committed block.
    pub block_num: BlockNum,
    /// The block's identifier (hex digest).
    pub block_id: String,
    /// The state root hash after applying this block.
    pub state_root_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_time_is_max() {
        assert_eq!(END_OF_TIME, i64::MAX);
    }
}
