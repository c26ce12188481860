//! FINALIZE_RECORD (spec §4.3): signer is both the Record's owner and
//! custodian; the Record is not already final. Terminal — no subsequent
//! UPDATE_PROPERTIES on this record will succeed (spec §8 invariant 6).

use crate::domain::TpError;
use crate::ports::{StateReader, StateWriter};
use sc_schema::FinalizeRecordAction;

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    _timestamp: i64,
    action: &FinalizeRecordAction,
    state: &mut S,
) -> Result<(), TpError> {
    let record = super::require_record(state, &action.record_id).await?;
    if record.owner != signer || record.custodian != signer {
        return Err(TpError::UnauthorizedRole {
            public_key: signer.to_string(),
            record_id: action.record_id.clone(),
        });
    }
    if record.is_final {
        return Err(TpError::RecordFinal {
            record_id: action.record_id.clone(),
        });
    }

    super::update_record(state, &action.record_id, |r| r.is_final = true).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handlers::{create_agent, create_record, create_record_type};
    use crate::ports::MapState;
    use sc_schema::{CreateAgentAction, CreateRecordAction, CreateRecordTypeAction, DataType, PropertySchema, PropertyValue, RecordContainer};

    async fn with_record() -> MapState {
        let mut state = MapState::new();
        create_agent("pk1", 1, &CreateAgentAction { name: "Alice".into() }, &mut state).await.unwrap();
        create_record_type(
            "pk1",
            1,
            &CreateRecordTypeAction {
                name: "widget".into(),
                properties: vec![PropertySchema {
                    name: "weight".into(),
                    data_type: DataType::Number as i32,
                    required: true,
                    ..Default::default()
                }],
            },
            &mut state,
        )
        .await
        .unwrap();
        create_record(
            "pk1",
            2,
            &CreateRecordAction {
                record_id: "r1".into(),
                record_type: "widget".into(),
                properties: vec![PropertyValue {
                    name: "weight".into(),
                    data_type: DataType::Number as i32,
                    number_value: 1,
                    ..Default::default()
                }],
            },
            &mut state,
        )
        .await
        .unwrap();
        state
    }

    #[tokio::test]
    async fn owner_custodian_can_finalize() {
        let mut state = with_record().await;
        handle(
            "pk1",
            10,
            &FinalizeRecordAction { record_id: "r1".into() },
            &mut state,
        )
        .await
        .unwrap();
        let address = sc_address::derive_record_address("r1");
        let container: RecordContainer = crate::domain::load(&state, &address).await.unwrap();
        assert!(container.find("r1").unwrap().is_final);
    }

    #[tokio::test]
    async fn already_final_is_rejected() {
        let mut state = with_record().await;
        handle(
            "pk1",
            10,
            &FinalizeRecordAction { record_id: "r1".into() },
            &mut state,
        )
        .await
        .unwrap();
        assert!(matches!(
            handle(
                "pk1",
                11,
                &FinalizeRecordAction { record_id: "r1".into() },
                &mut state,
            )
            .await
            .unwrap_err(),
            TpError::RecordFinal { .. }
        ));
    }
}
