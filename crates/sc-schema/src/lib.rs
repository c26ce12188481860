//! # sc-schema — Binary Wire Schema (spec §4.2, component C2)
//!
//! Domain messages are [prost](https://docs.rs/prost)-generated from the
//! `.proto` files under `proto/`: the top-level `Payload`, one message per
//! action, one container message per on-chain entity kind, and a tagged
//! value union (`BYTES`/`BOOLEAN`/`NUMBER`/`STRING`/`ENUM`/`LOCATION`/
//! `STRUCT`). Encoding is generated, not hand-rolled, so it stays
//! byte-stable across every consumer of this crate (spec §9: "prefer a
//! schema-compiler-generated codec").
//!
//! This crate also owns the container sort/merge helpers shared by the
//! transaction processor (writer) and the ledger-sync daemon (reader):
//! spec §3 invariant 2 requires every container to be sorted ascending by
//! its entity's natural key with no duplicate keys.

#![warn(missing_docs)]

include!(concat!(env!("OUT_DIR"), "/supply_chain.rs"));

pub mod container;

impl From<sc_address::Role> for Role {
    fn from(role: sc_address::Role) -> Self {
        match role {
            sc_address::Role::Owner => Role::Owner,
            sc_address::Role::Custodian => Role::Custodian,
            sc_address::Role::Reporter => Role::Reporter,
        }
    }
}

impl TryFrom<Role> for sc_address::Role {
    type Error = ();

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::Owner => Ok(sc_address::Role::Owner),
            Role::Custodian => Ok(sc_address::Role::Custodian),
            Role::Reporter => Ok(sc_address::Role::Reporter),
            Role::UnsetRole => Err(()),
        }
    }
}
