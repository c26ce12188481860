//! Pure validation and state-transition logic (spec §4.3). Every handler
//! is generic over [`crate::ports::StateReader`] +
//! [`crate::ports::StateWriter`], so it runs identically against a live
//! platform connection or an in-memory fake.

pub mod dispatch;
pub mod errors;
mod handlers;
mod validate;

pub use dispatch::apply;
pub use errors::TpError;

use crate::ports::{StateReader, StateWriter};
use prost::Message;

/// Reports per PropertyPage (spec §3 invariant 4).
pub const PAGE_SIZE: u32 = 256;
/// Highest page number before wraparound (`16^4 - 1`, spec §3 invariant 3).
pub const MAX_PAGES: u32 = 0xFFFF;

/// Load the container at `address`, or its default (empty) value if the
/// address has never been written.
pub(crate) async fn load<T: Message + Default>(
    state: &(impl StateReader + Sync),
    address: &str,
) -> Result<T, TpError> {
    match state.get(address).await {
        Some(bytes) => T::decode(bytes.as_slice()).map_err(|e| TpError::MalformedPayload {
            reason: e.to_string(),
        }),
        None => Ok(T::default()),
    }
}

/// Encode `container` and stage it as a write to `address`.
pub(crate) fn save<T: Message>(state: &mut impl StateWriter, address: &str, container: &T) {
    state.put(address.to_string(), container.encode_to_vec());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MapState;
    use sc_schema::{Agent, AgentContainer};

    #[tokio::test]
    async fn load_missing_address_yields_default() {
        let state = MapState::new();
        let c: AgentContainer = load(&state, "missing").await.unwrap();
        assert!(c.entries.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let mut state = MapState::new();
        let mut c = AgentContainer::default();
        c.upsert(Agent {
            public_key: "pk1".into(),
            name: "Alice".into(),
            timestamp: 1,
        });
        save(&mut state, "addr1", &c);
        let loaded: AgentContainer = load(&state, "addr1").await.unwrap();
        assert_eq!(loaded, c);
    }
}
