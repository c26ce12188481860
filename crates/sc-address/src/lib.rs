//! # sc-address — On-Chain Address Scheme (spec §4.1, component C1)
//!
//! Every address is 70 hex characters: a 6-hex namespace prefix shared by
//! this application, a 2-hex type prefix identifying the entity kind, and a
//! 62-hex body that is a (possibly truncated) SHA-512 digest of the
//! entity's natural key.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant |
//! |----|-----------|
//! | I-1 | Every address is exactly 70 hex characters. |
//! | I-2 | Every address begins with [`NAMESPACE`]. |
//! | I-3 | Address derivation is a pure, deterministic function of (kind, key). |
//! | I-4 | A Property's address always ends in `0000`; a PropertyPage's never does (page 0 does not exist — pages are 1-indexed). |
//!
//! Address derivation must be bit-identical across every consumer (the
//! transaction processor, the batcher, and the ledger-sync daemon) or state
//! silently diverges (spec §4.1) — this crate is the single place that
//! logic lives.

#![warn(missing_docs)]

use thiserror::Error;

/// The 6-hex namespace prefix identifying this application's on-chain data
/// (spec §6).
pub const NAMESPACE: &str = "3400de";

/// Total address length in hex characters.
pub const ADDRESS_LEN: usize = 70;

const TYPE_AGENT: &str = "ae";
const TYPE_RECORD_TYPE: &str = "ec";
const TYPE_RECORD: &str = "ee";
const TYPE_PROPERTY_OR_PAGE: &str = "ea";
const TYPE_PROPOSAL: &str = "aa";

const EMPTY_PAGE: &str = "0000";

/// The role a Proposal offers to transfer (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    /// Transfer of the Record's `owner`.
    Owner,
    /// Transfer of the Record's `custodian`.
    Custodian,
    /// Authorization to report on a subset of a Record's properties.
    Reporter,
}

impl Role {
    /// The canonical string used when hashing a Proposal's address
    /// (spec §4.1: "role-as-string").
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Custodian => "CUSTODIAN",
            Role::Reporter => "REPORTER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while deriving or classifying an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The address was not 70 hex characters, or contained non-hex bytes.
    #[error("malformed address `{0}`: expected {ADDRESS_LEN} hex characters")]
    Malformed(String),
    /// The address did not start with [`NAMESPACE`].
    #[error("address `{0}` is outside namespace {NAMESPACE}")]
    WrongNamespace(String),
    /// The 2-hex type prefix did not match any known entity kind.
    #[error("address `{0}` has unknown type prefix")]
    UnknownType(String),
}

/// The entity kind an address decodes to, per spec §4.1's "decoding the
/// type from an address" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// An Agent container address.
    Agent,
    /// A RecordType container address.
    RecordType,
    /// A Record container address.
    Record,
    /// A Property container address (page tail is `0000`).
    Property,
    /// A PropertyPage container address, carrying its 16-bit page number.
    PropertyPage(u16),
    /// A Proposal container address.
    Proposal,
}

fn first_hex(digest: sc_crypto::Digest512, n: usize) -> String {
    let hex = sc_crypto::to_hex(&digest);
    hex[..n].to_string()
}

/// Derive an Agent's address from its public key.
pub fn derive_agent_address(public_key: &str) -> String {
    let body = first_hex(sc_crypto::sha512(public_key.as_bytes()), 62);
    format!("{NAMESPACE}{TYPE_AGENT}{body}")
}

/// Derive a RecordType's address from its name.
pub fn derive_record_type_address(name: &str) -> String {
    let body = first_hex(sc_crypto::sha512(name.as_bytes()), 62);
    format!("{NAMESPACE}{TYPE_RECORD_TYPE}{body}")
}

/// Derive a Record's address from its record ID.
pub fn derive_record_address(record_id: &str) -> String {
    let body = first_hex(sc_crypto::sha512(record_id.as_bytes()), 62);
    format!("{NAMESPACE}{TYPE_RECORD}{body}")
}

fn property_body(record_id: &str, name: &str, page_num: u16) -> String {
    let record_part = first_hex(sc_crypto::sha512(record_id.as_bytes()), 36);
    let name_part = first_hex(sc_crypto::sha512(name.as_bytes()), 22);
    format!("{record_part}{name_part}{page_num:04x}")
}

/// Derive a Property's address: `(recordId, name)`, page tail fixed at
/// `0000`.
pub fn derive_property_address(record_id: &str, name: &str) -> String {
    let body = property_body(record_id, name, 0);
    format!("{NAMESPACE}{TYPE_PROPERTY_OR_PAGE}{body}")
}

/// Derive a PropertyPage's address: `(recordId, name, pageNum)`. `page_num`
/// must be in `[1, MAX_PAGES]` (spec §3 invariant 3); this function does
/// not itself enforce that bound, callers that mutate `currentPage` do.
pub fn derive_property_page_address(record_id: &str, name: &str, page_num: u16) -> String {
    let body = property_body(record_id, name, page_num);
    format!("{NAMESPACE}{TYPE_PROPERTY_OR_PAGE}{body}")
}

/// Derive a Proposal's address: `(recordId, receivingAgent, role)`. Note
/// the address intentionally omits `timestamp` — multiple proposals for the
/// same tuple at different timestamps collide into one container, which is
/// how "only one OPEN proposal per tuple" (spec §3 invariant 6) is enforced
/// by the processor reading that single address.
pub fn derive_proposal_address(record_id: &str, receiving_agent: &str, role: Role) -> String {
    let digest = sc_crypto::sha512::sha512_many(&[
        record_id.as_bytes(),
        b"\x00",
        receiving_agent.as_bytes(),
        b"\x00",
        role.as_str().as_bytes(),
    ]);
    let body = first_hex(digest, 62);
    format!("{NAMESPACE}{TYPE_PROPOSAL}{body}")
}

/// Classify an address into its [`AddressKind`], validating its shape.
pub fn classify(address: &str) -> Result<AddressKind, AddressError> {
    if address.len() != ADDRESS_LEN || !address.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::Malformed(address.to_string()));
    }
    if &address[0..6] != NAMESPACE {
        return Err(AddressError::WrongNamespace(address.to_string()));
    }
    let type_prefix = &address[6..8];
    match type_prefix {
        TYPE_AGENT => Ok(AddressKind::Agent),
        TYPE_RECORD_TYPE => Ok(AddressKind::RecordType),
        TYPE_RECORD => Ok(AddressKind::Record),
        TYPE_PROPOSAL => Ok(AddressKind::Proposal),
        TYPE_PROPERTY_OR_PAGE => {
            let tail = &address[66..70];
            if tail == EMPTY_PAGE {
                Ok(AddressKind::Property)
            } else {
                let page_num = u16::from_str_radix(tail, 16)
                    .map_err(|_| AddressError::Malformed(address.to_string()))?;
                Ok(AddressKind::PropertyPage(page_num))
            }
        }
        _ => Err(AddressError::UnknownType(address.to_string())),
    }
}

/// A case-insensitive regex matching every address in this application's
/// namespace, for the platform's `state-delta` subscription filter
/// (spec §6).
pub fn namespace_filter_regex() -> String {
    format!("^{NAMESPACE}.*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_address_is_well_formed() {
        let addr = derive_agent_address("02abc");
        assert_eq!(addr.len(), ADDRESS_LEN);
        assert!(addr.starts_with(NAMESPACE));
        assert_eq!(classify(&addr).unwrap(), AddressKind::Agent);
    }

    #[test]
    fn record_type_address_roundtrips_kind() {
        let addr = derive_record_type_address("asset");
        assert_eq!(classify(&addr).unwrap(), AddressKind::RecordType);
    }

    #[test]
    fn record_address_roundtrips_kind() {
        let addr = derive_record_address("r1");
        assert_eq!(classify(&addr).unwrap(), AddressKind::Record);
    }

    #[test]
    fn property_address_ends_in_zero_page() {
        let addr = derive_property_address("r1", "temp");
        assert!(addr.ends_with("0000"));
        assert_eq!(classify(&addr).unwrap(), AddressKind::Property);
    }

    #[test]
    fn property_page_address_carries_page_number() {
        let addr = derive_property_page_address("r1", "temp", 1);
        assert!(addr.ends_with("0001"));
        assert_eq!(classify(&addr).unwrap(), AddressKind::PropertyPage(1));
    }

    #[test]
    fn property_and_page_share_record_and_name_prefix() {
        let prop = derive_property_address("r1", "temp");
        let page = derive_property_page_address("r1", "temp", 7);
        assert_eq!(&prop[0..66], &page[0..66]);
    }

    #[test]
    fn proposal_address_is_stable_per_tuple() {
        let a = derive_proposal_address("r1", "pub2", Role::Owner);
        let b = derive_proposal_address("r1", "pub2", Role::Owner);
        assert_eq!(a, b);
        assert_eq!(classify(&a).unwrap(), AddressKind::Proposal);
    }

    #[test]
    fn proposal_address_depends_on_role() {
        let owner = derive_proposal_address("r1", "pub2", Role::Owner);
        let custodian = derive_proposal_address("r1", "pub2", Role::Custodian);
        assert_ne!(owner, custodian);
    }

    #[test]
    fn distinct_record_ids_do_not_collide() {
        let a = derive_record_address("r1");
        let b = derive_record_address("r2");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_address_rejected() {
        assert!(classify("not-an-address").is_err());
        assert!(classify(&"a".repeat(70)).is_err()); // wrong namespace
    }

    #[test]
    fn namespace_filter_matches_derived_addresses() {
        let re = namespace_filter_regex();
        assert!(re.starts_with('^'));
        assert!(derive_agent_address("x").starts_with(NAMESPACE));
    }

    proptest::proptest! {
        #[test]
        fn all_derived_addresses_are_70_hex_chars(s in "[a-zA-Z0-9]{1,40}") {
            let a = derive_agent_address(&s);
            let rt = derive_record_type_address(&s);
            let r = derive_record_address(&s);
            let p = derive_property_address(&s, "x");
            for addr in [a, rt, r, p] {
                proptest::prop_assert_eq!(addr.len(), ADDRESS_LEN);
                proptest::prop_assert!(addr.chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }
}
