//! CREATE_AGENT (spec §4.3): `name` nonempty, signer must not already have
//! an Agent.

use crate::domain::TpError;
use crate::ports::{StateReader, StateWriter};
use sc_schema::{Agent, AgentContainer, CreateAgentAction};

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    timestamp: i64,
    action: &CreateAgentAction,
    state: &mut S,
) -> Result<(), TpError> {
    if action.name.is_empty() {
        return Err(TpError::EmptyField { field: "name" });
    }

    let address = sc_address::derive_agent_address(signer);
    let mut container: AgentContainer = crate::domain::load(state, &address).await?;
    if container.find(signer).is_some() {
        return Err(TpError::AgentAlreadyExists {
            public_key: signer.to_string(),
        });
    }

    container.upsert(Agent {
        public_key: signer.to_string(),
        name: action.name.clone(),
        timestamp,
    });
    crate::domain::save(state, &address, &container);
    Ok(())
}
