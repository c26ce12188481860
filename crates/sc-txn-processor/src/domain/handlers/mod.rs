//! One module per §4.3 action contract.

mod answer_proposal;
mod create_agent;
mod create_proposal;
mod create_record;
mod create_record_type;
mod finalize_record;
mod revoke_reporter;
mod update_properties;

pub(super) use answer_proposal::handle as answer_proposal;
pub(super) use create_agent::handle as create_agent;
pub(super) use create_proposal::handle as create_proposal;
pub(super) use create_record::handle as create_record;
pub(super) use create_record_type::handle as create_record_type;
pub(super) use finalize_record::handle as finalize_record;
pub(super) use revoke_reporter::handle as revoke_reporter;
pub(super) use update_properties::handle as update_properties;

use crate::domain::TpError;
use crate::ports::{StateReader, StateWriter};
use sc_schema::{Agent, AgentContainer, Record, RecordContainer};

/// Load the signer's Agent record, failing if they have none.
pub(super) async fn require_agent(
    state: &(impl StateReader + Sync),
    public_key: &str,
) -> Result<Agent, TpError> {
    let address = sc_address::derive_agent_address(public_key);
    let container: AgentContainer = crate::domain::load(state, &address).await?;
    container
        .find(public_key)
        .cloned()
        .ok_or_else(|| TpError::UnknownAgent {
            public_key: public_key.to_string(),
        })
}

/// Load a Record, failing if it does not exist.
pub(super) async fn require_record(
    state: &(impl StateReader + Sync),
    record_id: &str,
) -> Result<Record, TpError> {
    let address = sc_address::derive_record_address(record_id);
    let container: RecordContainer = crate::domain::load(state, &address).await?;
    container
        .find(record_id)
        .cloned()
        .ok_or_else(|| TpError::UnknownRecord {
            record_id: record_id.to_string(),
        })
}

/// Rewrite a single Record via load → mutate → upsert → save, per the
/// write semantics in spec §4.3.
pub(super) async fn update_record<S: StateReader + StateWriter + Sync>(
    state: &mut S,
    record_id: &str,
    mutate: impl FnOnce(&mut Record),
) -> Result<(), TpError> {
    let address = sc_address::derive_record_address(record_id);
    let mut container: RecordContainer = crate::domain::load(state, &address).await?;
    let mut record = container
        .find(record_id)
        .cloned()
        .ok_or_else(|| TpError::UnknownRecord {
            record_id: record_id.to_string(),
        })?;
    mutate(&mut record);
    container.upsert(record);
    crate::domain::save(state, &address, &container);
    Ok(())
}
