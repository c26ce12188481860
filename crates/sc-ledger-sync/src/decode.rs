//! Container decoding (spec §4.5 step 2) and the address-kind → table
//! mapping (spec §4.6).
//!
//! Every `*Container` message derives `serde::Serialize` (see
//! `sc-schema`'s `build.rs`), so projecting a decoded container into the
//! read store's JSONB `doc` column is a direct `serde_json::to_value`
//! rather than a hand-written field mapping.

use prost::Message;
use sc_address::AddressKind;
use sc_read_store::EntityTable;
use sc_schema::{
    AgentContainer, PropertyContainer, PropertyPageContainer, ProposalContainer, RecordContainer,
    RecordTypeContainer,
};
use sc_types::DecodeError;

/// A container decoded from one namespaced state change, still typed so
/// [`crate::enrich`] can inspect it before projection.
pub enum DecodedContainer {
    /// An [`AgentContainer`].
    Agent(AgentContainer),
    /// A [`RecordTypeContainer`].
    RecordType(RecordTypeContainer),
    /// A [`RecordContainer`].
    Record(RecordContainer),
    /// A [`PropertyContainer`].
    Property(PropertyContainer),
    /// A [`PropertyPageContainer`].
    PropertyPage(PropertyPageContainer),
    /// A [`ProposalContainer`].
    Proposal(ProposalContainer),
}

/// The read-store table a given [`AddressKind`] projects into.
pub fn table_for_kind(kind: AddressKind) -> EntityTable {
    match kind {
        AddressKind::Agent => EntityTable::Agents,
        AddressKind::RecordType => EntityTable::RecordTypes,
        AddressKind::Record => EntityTable::Records,
        AddressKind::Property => EntityTable::Properties,
        AddressKind::PropertyPage(_) => EntityTable::PropertyPages,
        AddressKind::Proposal => EntityTable::Proposals,
    }
}

/// Decode `bytes` as the Container message matching `kind` (spec §4.5
/// step 2).
pub fn decode_container(kind: AddressKind, address: &str, bytes: &[u8]) -> Result<DecodedContainer, DecodeError> {
    let wrap = |reason: prost::DecodeError| DecodeError { address: address.to_string(), reason: reason.to_string() };
    Ok(match kind {
        AddressKind::Agent => DecodedContainer::Agent(AgentContainer::decode(bytes).map_err(wrap)?),
        AddressKind::RecordType => DecodedContainer::RecordType(RecordTypeContainer::decode(bytes).map_err(wrap)?),
        AddressKind::Record => DecodedContainer::Record(RecordContainer::decode(bytes).map_err(wrap)?),
        AddressKind::Property => DecodedContainer::Property(PropertyContainer::decode(bytes).map_err(wrap)?),
        AddressKind::PropertyPage(_) => {
            DecodedContainer::PropertyPage(PropertyPageContainer::decode(bytes).map_err(wrap)?)
        }
        AddressKind::Proposal => DecodedContainer::Proposal(ProposalContainer::decode(bytes).map_err(wrap)?),
    })
}

/// Project a decoded container to the JSON document stored in the read
/// store's `doc` column.
pub fn to_doc(container: &DecodedContainer) -> serde_json::Value {
    match container {
        DecodedContainer::Agent(c) => serde_json::to_value(c),
        DecodedContainer::RecordType(c) => serde_json::to_value(c),
        DecodedContainer::Record(c) => serde_json::to_value(c),
        DecodedContainer::Property(c) => serde_json::to_value(c),
        DecodedContainer::PropertyPage(c) => serde_json::to_value(c),
        DecodedContainer::Proposal(c) => serde_json::to_value(c),
    }
    .expect("protobuf containers serialize to JSON infallibly")
}
