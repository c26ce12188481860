//! Common preamble and action dispatch (spec §4.3): decode the payload,
//! validate `timestamp > 0`, reject unknown actions, then route to the
//! handler for `action`.

use super::{handlers, TpError};
use crate::ports::{StateReader, StateWriter};
use prost::Message;
use sc_schema::{Action, Payload};

/// Decode and apply one transaction's payload against `state`.
///
/// `signer` is the transaction header's signer public key. On success,
/// every write the handler made has been staged into `state`; on error,
/// nothing should be committed — the platform discards state changes for
/// a rejected transaction atomically (spec §4.3 "failure semantics").
pub async fn apply<S: StateReader + StateWriter + Sync>(
    payload_bytes: &[u8],
    signer: &str,
    state: &mut S,
) -> Result<(), TpError> {
    let payload = Payload::decode(payload_bytes).map_err(|e| TpError::MalformedPayload {
        reason: e.to_string(),
    })?;

    if payload.timestamp <= 0 {
        return Err(TpError::NonPositiveTimestamp);
    }

    let action = Action::try_from(payload.action).map_err(|_| TpError::UnknownAction)?;
    let timestamp = payload.timestamp;

    match action {
        Action::CreateAgent => {
            let action = payload.create_agent.as_ref().ok_or(TpError::UnknownAction)?;
            handlers::create_agent(signer, timestamp, action, state).await
        }
        Action::CreateRecordType => {
            let action = payload
                .create_record_type
                .as_ref()
                .ok_or(TpError::UnknownAction)?;
            handlers::create_record_type(signer, timestamp, action, state).await
        }
        Action::CreateRecord => {
            let action = payload.create_record.as_ref().ok_or(TpError::UnknownAction)?;
            handlers::create_record(signer, timestamp, action, state).await
        }
        Action::UpdateProperties => {
            let action = payload
                .update_properties
                .as_ref()
                .ok_or(TpError::UnknownAction)?;
            handlers::update_properties(signer, timestamp, action, state).await
        }
        Action::CreateProposal => {
            let action = payload
                .create_proposal
                .as_ref()
                .ok_or(TpError::UnknownAction)?;
            handlers::create_proposal(signer, timestamp, action, state).await
        }
        Action::AnswerProposal => {
            let action = payload
                .answer_proposal
                .as_ref()
                .ok_or(TpError::UnknownAction)?;
            handlers::answer_proposal(signer, timestamp, action, state).await
        }
        Action::RevokeReporter => {
            let action = payload
                .revoke_reporter
                .as_ref()
                .ok_or(TpError::UnknownAction)?;
            handlers::revoke_reporter(signer, timestamp, action, state).await
        }
        Action::FinalizeRecord => {
            let action = payload
                .finalize_record
                .as_ref()
                .ok_or(TpError::UnknownAction)?;
            handlers::finalize_record(signer, timestamp, action, state).await
        }
        Action::UnsetAction => Err(TpError::UnknownAction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MapState;
    use prost::Message as _;
    use sc_schema::CreateAgentAction;

    #[tokio::test]
    async fn rejects_non_positive_timestamp() {
        let payload = Payload {
            action: Action::CreateAgent as i32,
            timestamp: 0,
            create_agent: Some(CreateAgentAction { name: "Alice".into() }),
            ..Default::default()
        };
        let mut state = MapState::new();
        let err = apply(&payload.encode_to_vec(), "pk1", &mut state).await.unwrap_err();
        assert_eq!(err, TpError::NonPositiveTimestamp);
    }

    #[tokio::test]
    async fn rejects_unset_action() {
        let payload = Payload {
            action: Action::UnsetAction as i32,
            timestamp: 1,
            ..Default::default()
        };
        let mut state = MapState::new();
        let err = apply(&payload.encode_to_vec(), "pk1", &mut state).await.unwrap_err();
        assert_eq!(err, TpError::UnknownAction);
    }

    #[tokio::test]
    async fn dispatches_create_agent() {
        let payload = Payload {
            action: Action::CreateAgent as i32,
            timestamp: 1,
            create_agent: Some(CreateAgentAction { name: "Alice".into() }),
            ..Default::default()
        };
        let mut state = MapState::new();
        apply(&payload.encode_to_vec(), "pk1", &mut state).await.unwrap();
        let address = sc_address::derive_agent_address("pk1");
        let c: sc_schema::AgentContainer = super::load(&state, &address).await.unwrap();
        assert_eq!(c.find("pk1").unwrap().name, "Alice");
    }
}
