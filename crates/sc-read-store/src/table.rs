//! The six interval-row tables projected from committed on-chain state
//! (spec §4.6). `doc` is the projected JSON document, opaque to the
//! block-upsert primitive.
//!
//! Spec §4.6 names each table's index as a decomposed key tuple (e.g.
//! `properties` / `[name, recordId]`). Every address in this application
//! is already a pure, deterministic function of that same tuple
//! (`sc_address::derive_*`, spec §4.1), so `sc-ledger-sync` indexes every
//! table on the on-chain address itself rather than carrying the
//! decomposed fields a second time: any caller who knows the tuple
//! derives the identical address and queries by it. This also sidesteps
//! `propertyPages`, whose wire message carries no `name/recordId/pageNum`
//! fields to decompose from in the first place (see
//! `sc-ledger-sync::enrich` for how that identity is recovered instead).

/// One of the six entity tables the block-upsert primitive writes to.
/// Each row's `index_key` is the entity's on-chain address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTable {
    /// `agents`, indexed by address (spec §4.1: a pure function of `publicKey`).
    Agents,
    /// `records`, indexed by address (a pure function of `recordId`).
    Records,
    /// `record_types`, indexed by address (a pure function of `name`).
    RecordTypes,
    /// `properties`, indexed by address (a pure function of `[name, recordId]`).
    Properties,
    /// `property_pages`, indexed by address (a pure function of `[name, recordId, pageNum]`).
    PropertyPages,
    /// `proposals`, indexed by address (a pure function of `[recordId, receivingAgent, role]`).
    Proposals,
}

impl EntityTable {
    /// The backing SQL table name. Values come from this closed enum, not
    /// external input, so interpolating this into raw SQL carries no
    /// injection risk.
    pub fn sql_name(self) -> &'static str {
        match self {
            EntityTable::Agents => "agents",
            EntityTable::Records => "records",
            EntityTable::RecordTypes => "record_types",
            EntityTable::Properties => "properties",
            EntityTable::PropertyPages => "property_pages",
            EntityTable::Proposals => "proposals",
        }
    }
}
