//! CREATE_RECORD (spec §4.3): signer is a known Agent; `recordId` unused;
//! `recordType` exists; incoming properties cover every required schema
//! entry. Writes the Record plus one Property + initial PropertyPage per
//! schema entry.

use super::require_agent;
use crate::domain::{validate::validate_value_against_schema, TpError};
use crate::ports::{StateReader, StateWriter};
use sc_schema::{
    CreateRecordAction, Property, PropertyContainer, PropertyPage, PropertyPageContainer,
    PropertyPageReport, PropertySchema, PropertyValue, Record, RecordContainer, RecordTypeContainer,
    Reporter,
};

fn report_from_value(value: &PropertyValue, reporter_index: u32, timestamp: i64) -> PropertyPageReport {
    PropertyPageReport {
        reporter_index,
        timestamp,
        data_type: value.data_type,
        bytes_value: value.bytes_value.clone(),
        boolean_value: value.boolean_value,
        number_value: value.number_value,
        string_value: value.string_value.clone(),
        enum_value: value.enum_value,
        struct_values: value.struct_values.clone(),
        location_value: value.location_value.clone(),
    }
}

fn validate_properties(
    schemas: &[PropertySchema],
    values: &[PropertyValue],
) -> Result<(), TpError> {
    for schema in schemas {
        if schema.required && !values.iter().any(|v| v.name == schema.name) {
            return Err(TpError::PropertiesDoNotMatchSchema {
                reason: format!("missing required property {}", schema.name),
            });
        }
    }
    for value in values {
        let schema = schemas
            .iter()
            .find(|s| s.name == value.name)
            .ok_or_else(|| TpError::PropertiesDoNotMatchSchema {
                reason: format!("{} is not declared on the record type", value.name),
            })?;
        validate_value_against_schema(value, schema)?;
    }
    Ok(())
}

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    timestamp: i64,
    action: &CreateRecordAction,
    state: &mut S,
) -> Result<(), TpError> {
    require_agent(state, signer).await?;

    let record_address = sc_address::derive_record_address(&action.record_id);
    let mut record_container: RecordContainer = crate::domain::load(state, &record_address).await?;
    if record_container.find(&action.record_id).is_some() {
        return Err(TpError::RecordAlreadyExists {
            record_id: action.record_id.clone(),
        });
    }

    let record_type_address = sc_address::derive_record_type_address(&action.record_type);
    let record_type_container: RecordTypeContainer = crate::domain::load(state, &record_type_address).await?;
    let record_type = record_type_container
        .find(&action.record_type)
        .cloned()
        .ok_or_else(|| TpError::UnknownRecordType {
            name: action.record_type.clone(),
        })?;

    validate_properties(&record_type.properties, &action.properties)?;

    record_container.upsert(Record {
        record_id: action.record_id.clone(),
        record_type: action.record_type.clone(),
        owner: signer.to_string(),
        custodian: signer.to_string(),
        is_final: false,
    });
    crate::domain::save(state, &record_address, &record_container);

    for schema in &record_type.properties {
        let property_address = sc_address::derive_property_address(&action.record_id, &schema.name);
        let mut property_container: PropertyContainer = crate::domain::load(state, &property_address).await?;
        property_container.upsert(Property {
            name: schema.name.clone(),
            record_id: action.record_id.clone(),
            data_type: schema.data_type,
            current_page: 1,
            wrapped: false,
            reporters: vec![Reporter {
                public_key: signer.to_string(),
                authorized: true,
                index: 0,
            }],
            fixed: schema.fixed,
            number_exponent: schema.number_exponent,
            enum_options: schema.enum_options.clone(),
            struct_properties: schema.struct_properties.clone(),
            unit: schema.unit.clone(),
        });
        crate::domain::save(state, &property_address, &property_container);

        let page_address = sc_address::derive_property_page_address(&action.record_id, &schema.name, 1);
        let mut page_container = PropertyPageContainer::default();
        if let Some(initial) = action.properties.iter().find(|v| v.name == schema.name) {
            page_container.replace(PropertyPage {
                reported_values: vec![report_from_value(initial, 0, timestamp)],
            });
        }
        crate::domain::save(state, &page_address, &page_container);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handlers::{create_agent, create_record_type};
    use crate::ports::MapState;
    use sc_schema::{CreateAgentAction, CreateRecordTypeAction, DataType};

    async fn with_widget_type(pk: &str) -> MapState {
        let mut state = MapState::new();
        create_agent(pk, 1, &CreateAgentAction { name: "Alice".into() }, &mut state).await.unwrap();
        create_record_type(
            pk,
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
        state
    }

    #[tokio::test]
    async fn rejects_missing_required_property() {
        let mut state = with_widget_type("pk1").await;
        let action = CreateRecordAction {
            record_id: "r1".into(),
            record_type: "widget".into(),
            properties: vec![],
        };
        assert!(matches!(
            handle("pk1", 10, &action, &mut state).await.unwrap_err(),
            TpError::PropertiesDoNotMatchSchema { .. }
        ));
    }

    #[tokio::test]
    async fn writes_record_property_and_initial_page() {
        let mut state = with_widget_type("pk1").await;
        let action = CreateRecordAction {
            record_id: "r1".into(),
            record_type: "widget".into(),
            properties: vec![PropertyValue {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                number_value: 42,
                ..Default::default()
            }],
        };
        handle("pk1", 10, &action, &mut state).await.unwrap();

        let record_addr = sc_address::derive_record_address("r1");
        let records: RecordContainer = crate::domain::load(&state, &record_addr).await.unwrap();
        let record = records.find("r1").unwrap();
        assert_eq!(record.owner, "pk1");
        assert_eq!(record.custodian, "pk1");
        assert!(!record.is_final);

        let prop_addr = sc_address::derive_property_address("r1", "weight");
        let props: PropertyContainer = crate::domain::load(&state, &prop_addr).await.unwrap();
        let property = props.find("weight").unwrap();
        assert_eq!(property.current_page, 1);
        assert_eq!(property.reporters.len(), 1);
        assert!(property.reporters[0].authorized);

        let page_addr = sc_address::derive_property_page_address("r1", "weight", 1);
        let pages: PropertyPageContainer = crate::domain::load(&state, &page_addr).await.unwrap();
        assert_eq!(pages.only().unwrap().reported_values.len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_record_id() {
        let mut state = with_widget_type("pk1").await;
        let action = CreateRecordAction {
            record_id: "r1".into(),
            record_type: "widget".into(),
            properties: vec![PropertyValue {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                number_value: 1,
                ..Default::default()
            }],
        };
        handle("pk1", 10, &action, &mut state).await.unwrap();
        assert!(matches!(
            handle("pk1", 11, &action, &mut state).await.unwrap_err(),
            TpError::RecordAlreadyExists { .. }
        ));
    }
}
