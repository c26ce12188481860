//! Container sort/merge helpers (spec §3, §4.3 "write semantics", §9
//! "container-per-address").
//!
//! Every on-chain address holds a [`Container`](crate)-style message: an
//! ordered `entries` list. A write loads the container (empty if the
//! address was previously unset), inserts or replaces the entity by its
//! natural key, re-sorts, and writes the container back. This module is
//! the single place that sort-and-merge logic lives, so C3 (writer) and
//! C5 (reader, for decode-only consumption) agree on ordering.

use crate::{Agent, AgentContainer, Property, PropertyContainer, PropertyPage, PropertyPageContainer,
            Proposal, ProposalContainer, Record, RecordContainer, RecordType, RecordTypeContainer};

/// Insert or replace `item` in `entries`, keeping the list sorted ascending
/// by `key`. If an entry with the same key already exists, it is replaced
/// in place (no duplicate keys survive, per spec §3 invariant 2).
fn upsert<T, K: Ord>(entries: &mut Vec<T>, item: T, key: impl Fn(&T) -> K) {
    let item_key = key(&item);
    match entries.binary_search_by_key(&item_key, &key) {
        Ok(pos) => entries[pos] = item,
        Err(pos) => entries.insert(pos, item),
    }
}

impl AgentContainer {
    /// Insert or replace an Agent, keyed by `publicKey`.
    pub fn upsert(&mut self, agent: Agent) {
        upsert(&mut self.entries, agent, |a| a.public_key.clone());
    }

    /// Look up an Agent by `publicKey`.
    pub fn find(&self, public_key: &str) -> Option<&Agent> {
        self.entries.iter().find(|a| a.public_key == public_key)
    }
}

impl RecordTypeContainer {
    /// Insert or replace a RecordType, keyed by `name`.
    pub fn upsert(&mut self, record_type: RecordType) {
        upsert(&mut self.entries, record_type, |rt| rt.name.clone());
    }

    /// Look up a RecordType by `name`.
    pub fn find(&self, name: &str) -> Option<&RecordType> {
        self.entries.iter().find(|rt| rt.name == name)
    }
}

impl RecordContainer {
    /// Insert or replace a Record, keyed by `recordId`.
    pub fn upsert(&mut self, record: Record) {
        upsert(&mut self.entries, record, |r| r.record_id.clone());
    }

    /// Look up a Record by `recordId`.
    pub fn find(&self, record_id: &str) -> Option<&Record> {
        self.entries.iter().find(|r| r.record_id == record_id)
    }

    /// Mutable lookup of a Record by `recordId`.
    pub fn find_mut(&mut self, record_id: &str) -> Option<&mut Record> {
        self.entries.iter_mut().find(|r| r.record_id == record_id)
    }
}

impl PropertyContainer {
    /// Insert or replace a Property, keyed by `name` (the container already
    /// lives at an address scoped to one `recordId`; see spec §4.1).
    pub fn upsert(&mut self, property: Property) {
        upsert(&mut self.entries, property, |p| p.name.clone());
    }

    /// Look up a Property by `name`.
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.entries.iter().find(|p| p.name == name)
    }

    /// Mutable lookup of a Property by `name`.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.entries.iter_mut().find(|p| p.name == name)
    }
}

impl ProposalContainer {
    /// Insert or replace a Proposal, keyed by
    /// `(recordId, timestamp, receivingAgent, role)` (spec §3).
    pub fn upsert(&mut self, proposal: Proposal) {
        upsert(&mut self.entries, proposal, |p| {
            (p.record_id.clone(), p.timestamp, p.receiving_agent.clone(), p.role)
        });
    }

    /// The OPEN proposal, if any, for `(receivingAgent, role)` within this
    /// container (spec §3 invariant 6: at most one).
    pub fn find_open(&self, receiving_agent: &str, role: i32) -> Option<&Proposal> {
        self.entries
            .iter()
            .find(|p| p.receiving_agent == receiving_agent && p.role == role && p.status == crate::ProposalStatus::Open as i32)
    }
}

impl PropertyPageContainer {
    /// A PropertyPage's address already fully identifies
    /// `(recordId, name, pageNum)` (spec §4.1), so unlike the other
    /// containers there is no natural key to sort multiple entries by —
    /// in practice exactly one entry ever lives at this address.
    /// `replace` keeps that invariant explicit rather than leaving a
    /// collision-merge path nothing exercises.
    pub fn replace(&mut self, page: PropertyPage) {
        self.entries = vec![page];
    }

    /// The page stored at this address, if any has been written yet.
    pub fn only(&self) -> Option<&PropertyPage> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_container_replaces_by_public_key() {
        let mut c = AgentContainer::default();
        c.upsert(Agent { public_key: "pk1".into(), name: "Alice".into(), timestamp: 1 });
        c.upsert(Agent { public_key: "pk1".into(), name: "Alice2".into(), timestamp: 2 });
        assert_eq!(c.entries.len(), 1);
        assert_eq!(c.find("pk1").unwrap().name, "Alice2");
    }

    #[test]
    fn agent_container_stays_sorted() {
        let mut c = AgentContainer::default();
        for pk in ["pk3", "pk1", "pk2"] {
            c.upsert(Agent { public_key: pk.into(), name: String::new(), timestamp: 0 });
        }
        let keys: Vec<_> = c.entries.iter().map(|a| a.public_key.clone()).collect();
        assert_eq!(keys, vec!["pk1", "pk2", "pk3"]);
    }

    #[test]
    fn proposal_container_keys_on_full_tuple() {
        let mut c = ProposalContainer::default();
        c.upsert(Proposal {
            record_id: "r1".into(),
            receiving_agent: "pk2".into(),
            issuing_agent: "pk1".into(),
            role: crate::Role::Owner as i32,
            properties: vec![],
            status: crate::ProposalStatus::Open as i32,
            terms: String::new(),
            timestamp: 10,
        });
        assert_eq!(c.entries.len(), 1);
        assert!(c.find_open("pk2", crate::Role::Owner as i32).is_some());
    }

    #[test]
    fn property_page_container_replace_keeps_single_entry() {
        let mut c = PropertyPageContainer::default();
        c.replace(PropertyPage { reported_values: vec![] });
        c.replace(PropertyPage {
            reported_values: vec![crate::PropertyPageReport {
                reporter_index: 0,
                timestamp: 1,
                ..Default::default()
            }],
        });
        assert_eq!(c.entries.len(), 1);
        assert_eq!(c.only().unwrap().reported_values.len(), 1);
    }
}
