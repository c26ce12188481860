//! Binds the domain layer's [`StateReader`]/[`StateWriter`] ports to a live
//! [`sc_platform::StatePort`] connection (spec §4.3, §6). This is the only
//! place in the crate that talks to the platform boundary; everything under
//! `domain/` stays transport-agnostic.

use crate::domain::{self, TpError};
use crate::ports::{StateReader, StateWriter};
use async_trait::async_trait;
use sc_platform::StatePort;
use std::collections::HashMap;
use std::sync::Mutex;

/// Decode and apply one transaction's payload against a live platform
/// connection: reads round-trip to [`StatePort::get_state`] on demand, one
/// call per distinct address, cached for the rest of the transaction; writes
/// accumulate in memory and are staged back via a single [`StatePort::set_state`]
/// call once `domain::apply` succeeds.
///
/// Per spec §4.3 "failure semantics", a rejected transaction leaves no state
/// writes behind — `set_state` is only reached after `domain::apply` returns
/// `Ok`.
pub async fn apply_transaction(
    payload_bytes: &[u8],
    signer: &str,
    platform: &dyn StatePort,
) -> Result<(), TpError> {
    let mut state = PlatformState::new(platform);
    domain::apply(payload_bytes, signer, &mut state).await?;
    platform
        .set_state(state.writes)
        .await
        .map_err(|e| TpError::PlatformUnavailable { reason: e.to_string() })
}

/// [`StateReader`]/[`StateWriter`] pair that round-trips to `platform` on
/// every distinct address the domain layer reads, caching the result for
/// the remainder of the transaction. A write to an address answers all
/// subsequent reads of it within the same transaction without a round trip.
struct PlatformState<'a> {
    platform: &'a dyn StatePort,
    cache: Mutex<HashMap<String, Option<Vec<u8>>>>,
    writes: HashMap<String, Vec<u8>>,
}

impl<'a> PlatformState<'a> {
    fn new(platform: &'a dyn StatePort) -> Self {
        Self {
            platform,
            cache: Mutex::new(HashMap::new()),
            writes: HashMap::new(),
        }
    }
}

#[async_trait]
impl<'a> StateReader for PlatformState<'a> {
    async fn get(&self, address: &str) -> Option<Vec<u8>> {
        if let Some(value) = self.writes.get(address) {
            return Some(value.clone());
        }
        if let Some(cached) = self.cache.lock().expect("cache mutex poisoned").get(address) {
            return cached.clone();
        }
        let fetched = self
            .platform
            .get_state(std::slice::from_ref(&address.to_string()))
            .await
            .ok()
            .and_then(|mut m| m.remove(address));
        self.cache
            .lock()
            .expect("cache mutex poisoned")
            .insert(address.to_string(), fetched.clone());
        fetched
    }
}

impl<'a> StateWriter for PlatformState<'a> {
    fn put(&mut self, address: String, value: Vec<u8>) {
        self.writes.insert(address, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_platform::PlatformError;
    use sc_schema::{AgentContainer, CreateAgentAction, Payload};
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct FakePlatform {
        store: StdMutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl StatePort for FakePlatform {
        async fn get_state(&self, addresses: &[String]) -> Result<HashMap<String, Vec<u8>>, PlatformError> {
            let store = self.store.lock().expect("poisoned");
            Ok(addresses
                .iter()
                .filter_map(|a| store.get(a).map(|v| (a.clone(), v.clone())))
                .collect())
        }

        async fn set_state(&self, writes: HashMap<String, Vec<u8>>) -> Result<(), PlatformError> {
            self.store.lock().expect("poisoned").extend(writes);
            Ok(())
        }
    }

    #[tokio::test]
    async fn applies_and_commits_through_platform() {
        use prost::Message as _;
        let platform = FakePlatform::default();
        let payload = Payload {
            action: sc_schema::Action::CreateAgent as i32,
            timestamp: 1,
            create_agent: Some(CreateAgentAction { name: "Alice".into() }),
            ..Default::default()
        };
        apply_transaction(&payload.encode_to_vec(), "pk1", &platform)
            .await
            .unwrap();

        let address = sc_address::derive_agent_address("pk1");
        let committed = platform.get_state(&[address.clone()]).await.unwrap();
        let container = AgentContainer::decode(committed[&address].as_slice()).unwrap();
        assert_eq!(container.find("pk1").unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn rejected_transaction_writes_nothing() {
        use prost::Message as _;
        let platform = FakePlatform::default();
        let payload = Payload {
            action: sc_schema::Action::CreateAgent as i32,
            timestamp: 0,
            create_agent: Some(CreateAgentAction { name: "Alice".into() }),
            ..Default::default()
        };
        let err = apply_transaction(&payload.encode_to_vec(), "pk1", &platform)
            .await
            .unwrap_err();
        assert_eq!(err, TpError::NonPositiveTimestamp);
        assert!(platform.store.lock().unwrap().is_empty());
    }
}
