//! CREATE_RECORD_TYPE (spec §4.3): signer must be a known Agent; `name`
//! nonempty and unused; `properties` nonempty and each individually
//! well-formed.

use super::require_agent;
use crate::domain::{validate::validate_schema, TpError};
use crate::ports::{StateReader, StateWriter};
use sc_schema::{CreateRecordTypeAction, RecordType, RecordTypeContainer};

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    _timestamp: i64,
    action: &CreateRecordTypeAction,
    state: &mut S,
) -> Result<(), TpError> {
    require_agent(state, signer).await?;

    if action.name.is_empty() {
        return Err(TpError::EmptyField { field: "name" });
    }
    if action.properties.is_empty() {
        return Err(TpError::EmptyField { field: "properties" });
    }
    for schema in &action.properties {
        validate_schema(schema)?;
    }

    let address = sc_address::derive_record_type_address(&action.name);
    let mut container: RecordTypeContainer = crate::domain::load(state, &address).await?;
    if container.find(&action.name).is_some() {
        return Err(TpError::RecordTypeAlreadyExists {
            name: action.name.clone(),
        });
    }

    container.upsert(RecordType {
        name: action.name.clone(),
        properties: action.properties.clone(),
    });
    crate::domain::save(state, &address, &container);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handlers::create_agent;
    use crate::ports::MapState;
    use sc_schema::{CreateAgentAction, DataType, PropertySchema};

    async fn with_agent(pk: &str) -> MapState {
        let mut state = MapState::new();
        create_agent(pk, 1, &CreateAgentAction { name: "Alice".into() }, &mut state).await.unwrap();
        state
    }

    #[tokio::test]
    async fn rejects_unknown_signer() {
        let mut state = MapState::new();
        let action = CreateRecordTypeAction {
            name: "widget".into(),
            properties: vec![PropertySchema {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                ..Default::default()
            }],
        };
        assert!(matches!(
            handle("pk1", 1, &action, &mut state).await.unwrap_err(),
            TpError::UnknownAgent { .. }
        ));
    }

    #[tokio::test]
    async fn writes_new_record_type() {
        let mut state = with_agent("pk1").await;
        let action = CreateRecordTypeAction {
            name: "widget".into(),
            properties: vec![PropertySchema {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                ..Default::default()
            }],
        };
        handle("pk1", 1, &action, &mut state).await.unwrap();
        let address = sc_address::derive_record_type_address("widget");
        let c: RecordTypeContainer = crate::domain::load(&state, &address).await.unwrap();
        assert_eq!(c.find("widget").unwrap().properties.len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_name() {
        let mut state = with_agent("pk1").await;
        let action = CreateRecordTypeAction {
            name: "widget".into(),
            properties: vec![PropertySchema {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                ..Default::default()
            }],
        };
        handle("pk1", 1, &action, &mut state).await.unwrap();
        assert!(matches!(
            handle("pk1", 2, &action, &mut state).await.unwrap_err(),
            TpError::RecordTypeAlreadyExists { .. }
        ));
    }
}
