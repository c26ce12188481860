//! UPDATE_PROPERTIES (spec §4.3): signer is an Agent; the Record exists
//! and is not final; for each update, the signer is an authorized
//! reporter on a matching Property and the value is well-formed. Each
//! accepted update appends one report to the Property's current page; if
//! that append fills the page to `PAGE_SIZE`, `currentPage` advances (and
//! wraps past `MAX_PAGES` back to 1) and the newly targeted page is
//! cleared in the same step (spec §3 invariant 3/4, boundary behavior in
//! spec §8).

use super::{require_agent, require_record};
use crate::domain::validate::validate_value_against_property;
use crate::domain::{TpError, MAX_PAGES, PAGE_SIZE};
use crate::ports::{StateReader, StateWriter};
use sc_schema::{
    Property, PropertyContainer, PropertyPage, PropertyPageContainer, PropertyPageReport,
    PropertyValue, UpdatePropertiesAction,
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

async fn append_report<S: StateReader + StateWriter + Sync>(
    state: &mut S,
    record_id: &str,
    property: &mut Property,
    report: PropertyPageReport,
) {
    let page_num = property.current_page;
    let page_address = sc_address::derive_property_page_address(record_id, &property.name, page_num as u16);
    let mut page_container: PropertyPageContainer =
        crate::domain::load(state, &page_address).await.unwrap_or_default();

    let mut page = page_container.only().cloned().unwrap_or_default();
    page.reported_values.push(report);
    page.reported_values.sort_by_key(|r| (r.timestamp, r.reporter_index));
    page_container.replace(page);
    let page_len = page_container.only().map(|p| p.reported_values.len()).unwrap_or(0);
    crate::domain::save(state, &page_address, &page_container);

    if page_len >= PAGE_SIZE as usize {
        let next_page_num = if page_num >= MAX_PAGES {
            property.wrapped = true;
            1
        } else {
            page_num + 1
        };
        property.current_page = next_page_num;
        let next_page_address =
            sc_address::derive_property_page_address(record_id, &property.name, next_page_num as u16);
        crate::domain::save(state, &next_page_address, &PropertyPageContainer::default());
    }
}

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    timestamp: i64,
    action: &UpdatePropertiesAction,
    state: &mut S,
) -> Result<(), TpError> {
    require_agent(state, signer).await?;
    let record = require_record(state, &action.record_id).await?;
    if record.is_final {
        return Err(TpError::RecordFinal {
            record_id: action.record_id.clone(),
        });
    }

    for value in &action.properties {
        let property_address = sc_address::derive_property_address(&action.record_id, &value.name);
        let mut property_container: PropertyContainer = crate::domain::load(state, &property_address).await?;
        let mut property = property_container
            .find(&value.name)
            .cloned()
            .ok_or_else(|| TpError::UnknownProperty {
                record_id: action.record_id.clone(),
                name: value.name.clone(),
            })?;

        let reporter = property
            .reporters
            .iter()
            .find(|r| r.public_key == signer && r.authorized)
            .ok_or_else(|| TpError::UnauthorizedReporter {
                public_key: signer.to_string(),
                name: value.name.clone(),
            })?
            .clone();

        validate_value_against_property(value, &property)?;

        let report = report_from_value(value, reporter.index, timestamp);
        append_report(state, &action.record_id, &mut property, report).await;

        property_container.upsert(property);
        crate::domain::save(state, &property_address, &property_container);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handlers::{create_agent, create_record, create_record_type};
    use crate::ports::MapState;
    use sc_schema::{CreateAgentAction, CreateRecordAction, CreateRecordTypeAction, DataType, PropertySchema};

    async fn with_record(pk: &str, record_id: &str) -> MapState {
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
        create_record(
            pk,
            2,
            &CreateRecordAction {
                record_id: record_id.into(),
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
    async fn rejects_unauthorized_reporter() {
        let mut state = with_record("pk1", "r1").await;
        create_agent("pk2", 1, &CreateAgentAction { name: "Bob".into() }, &mut state).await.unwrap();
        let action = UpdatePropertiesAction {
            record_id: "r1".into(),
            properties: vec![PropertyValue {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                number_value: 2,
                ..Default::default()
            }],
        };
        assert!(matches!(
            handle("pk2", 20, &action, &mut state).await.unwrap_err(),
            TpError::UnauthorizedReporter { .. }
        ));
    }

    #[tokio::test]
    async fn appends_report_to_current_page() {
        let mut state = with_record("pk1", "r1").await;
        let action = UpdatePropertiesAction {
            record_id: "r1".into(),
            properties: vec![PropertyValue {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                number_value: 2,
                ..Default::default()
            }],
        };
        handle("pk1", 20, &action, &mut state).await.unwrap();

        let page_addr = sc_address::derive_property_page_address("r1", "weight", 1);
        let pages: PropertyPageContainer = crate::domain::load(&state, &page_addr).await.unwrap();
        assert_eq!(pages.only().unwrap().reported_values.len(), 2);
    }

    #[tokio::test]
    async fn page_advances_as_soon_as_it_fills() {
        let mut state = with_record("pk1", "r1").await;
        let prop_addr = sc_address::derive_property_address("r1", "weight");
        // `with_record` already wrote one initial report at CREATE_RECORD time.
        for i in 0..(PAGE_SIZE - 1) {
            let action = UpdatePropertiesAction {
                record_id: "r1".into(),
                properties: vec![PropertyValue {
                    name: "weight".into(),
                    data_type: DataType::Number as i32,
                    number_value: i as i64,
                    ..Default::default()
                }],
            };
            handle("pk1", 100 + i as i64, &action, &mut state).await.unwrap();
        }

        // The last of those writes filled page 1 to PAGE_SIZE, so
        // `currentPage` must already point at the fresh, empty page 2 —
        // it does not lag a write behind.
        let props: PropertyContainer = crate::domain::load(&state, &prop_addr).await.unwrap();
        assert_eq!(props.find("weight").unwrap().current_page, 2);

        let page1_addr = sc_address::derive_property_page_address("r1", "weight", 1);
        let page1: PropertyPageContainer = crate::domain::load(&state, &page1_addr).await.unwrap();
        assert_eq!(page1.only().unwrap().reported_values.len(), PAGE_SIZE as usize);

        let page2_addr = sc_address::derive_property_page_address("r1", "weight", 2);
        let page2: PropertyPageContainer = crate::domain::load(&state, &page2_addr).await.unwrap();
        assert_eq!(page2.only().map(|p| p.reported_values.len()).unwrap_or(0), 0);

        let action = UpdatePropertiesAction {
            record_id: "r1".into(),
            properties: vec![PropertyValue {
                name: "weight".into(),
                data_type: DataType::Number as i32,
                number_value: 999,
                ..Default::default()
            }],
        };
        handle("pk1", 1000, &action, &mut state).await.unwrap();

        let props: PropertyContainer = crate::domain::load(&state, &prop_addr).await.unwrap();
        assert_eq!(props.find("weight").unwrap().current_page, 2);
        let page2: PropertyPageContainer = crate::domain::load(&state, &page2_addr).await.unwrap();
        assert_eq!(page2.only().unwrap().reported_values.len(), 1);
    }

    /// spec §8 boundary behavior: `PAGE_SIZE * MAX_PAGES + 1` updates wraps
    /// `currentPage` back to 1. Exercised directly against `append_report`
    /// rather than by replaying `PAGE_SIZE * MAX_PAGES` updates. Page 1 is
    /// pre-seeded with a stale leftover report, simulating data left behind
    /// from the previous cycle through that page number, to confirm the
    /// wrap clears it rather than leaving it in place.
    #[tokio::test]
    async fn wraps_current_page_back_to_one_past_max_pages() {
        let mut state = with_record("pk1", "r1").await;
        let prop_addr = sc_address::derive_property_address("r1", "weight");
        let mut property_container: PropertyContainer = crate::domain::load(&state, &prop_addr).await.unwrap();
        let mut property = property_container.find("weight").cloned().unwrap();
        property.current_page = MAX_PAGES;

        // One short of full: the upcoming append is the one that fills it.
        let almost_full_page_addr = sc_address::derive_property_page_address("r1", "weight", MAX_PAGES as u16);
        let mut almost_full_page = PropertyPageContainer::default();
        almost_full_page.replace(PropertyPage {
            reported_values: (0..PAGE_SIZE - 1)
                .map(|i| report_from_value(
                    &PropertyValue { name: "weight".into(), data_type: DataType::Number as i32, number_value: i as i64, ..Default::default() },
                    0,
                    i as i64,
                ))
                .collect(),
        });
        crate::domain::save(&mut state, &almost_full_page_addr, &almost_full_page);

        let stale_page1_addr = sc_address::derive_property_page_address("r1", "weight", 1);
        let mut stale_page1 = PropertyPageContainer::default();
        stale_page1.replace(PropertyPage {
            reported_values: vec![report_from_value(
                &PropertyValue { name: "weight".into(), data_type: DataType::Number as i32, number_value: -1, ..Default::default() },
                0,
                0,
            )],
        });
        crate::domain::save(&mut state, &stale_page1_addr, &stale_page1);

        let report = report_from_value(
            &PropertyValue { name: "weight".into(), data_type: DataType::Number as i32, number_value: 999, ..Default::default() },
            0,
            PAGE_SIZE as i64,
        );
        append_report(&mut state, "r1", &mut property, report).await;

        assert_eq!(property.current_page, 1);
        assert!(property.wrapped);
        property_container.upsert(property);
        crate::domain::save(&mut state, &prop_addr, &property_container);

        let almost_full_page: PropertyPageContainer =
            crate::domain::load(&state, &almost_full_page_addr).await.unwrap();
        assert_eq!(almost_full_page.only().unwrap().reported_values.len(), PAGE_SIZE as usize);

        // Page 1 was cleared as part of the wrap, not appended to: the
        // triggering report landed on the page at MAX_PAGES above.
        let page1: PropertyPageContainer = crate::domain::load(&state, &stale_page1_addr).await.unwrap();
        assert_eq!(page1.only().map(|p| p.reported_values.len()).unwrap_or(0), 0);
    }
}
