//! End-to-end scenarios against the transaction-processor dispatch, per
//! spec §8. The read-store/as-of parts of each scenario belong to C5/C6;
//! here we only exercise what C3 itself decides — does the transaction
//! commit, and what does it leave in state.

use prost::Message as _;
use sc_schema::{
    AgentContainer, AnswerProposalAction, Action, CreateAgentAction, CreateProposalAction,
    CreateRecordAction, CreateRecordTypeAction, DataType, Payload, PropertyContainer,
    PropertyPageContainer, PropertySchema, PropertyValue, RecordContainer, Role,
    answer_proposal_action::Response,
};
use sc_txn_processor::domain::apply;
use sc_txn_processor::ports::{MapState, StateReader};

async fn load<T: prost::Message + Default>(state: &MapState, address: &str) -> T {
    let bytes = state.get(address).await.expect("address not written");
    T::decode(bytes.as_slice()).unwrap()
}

fn payload(action: Action, timestamp: i64) -> Payload {
    Payload {
        action: action as i32,
        timestamp,
        ..Default::default()
    }
}

async fn create_agent(state: &mut MapState, signer: &str, name: &str, timestamp: i64) {
    let mut p = payload(Action::CreateAgent, timestamp);
    p.create_agent = Some(CreateAgentAction { name: name.into() });
    apply(&p.encode_to_vec(), signer, state).await.unwrap();
}

async fn create_asset_type(state: &mut MapState, signer: &str, timestamp: i64) {
    let mut p = payload(Action::CreateRecordType, timestamp);
    p.create_record_type = Some(CreateRecordTypeAction {
        name: "asset".into(),
        properties: vec![PropertySchema {
            name: "temp".into(),
            data_type: DataType::Number as i32,
            number_exponent: -1,
            required: true,
            ..Default::default()
        }],
    });
    apply(&p.encode_to_vec(), signer, state).await.unwrap();
}

async fn create_r1(state: &mut MapState, signer: &str, temp: i64, timestamp: i64) {
    let mut p = payload(Action::CreateRecord, timestamp);
    p.create_record = Some(CreateRecordAction {
        record_id: "r1".into(),
        record_type: "asset".into(),
        properties: vec![PropertyValue {
            name: "temp".into(),
            data_type: DataType::Number as i32,
            number_value: temp,
            ..Default::default()
        }],
    });
    apply(&p.encode_to_vec(), signer, state).await.unwrap();
}

/// Scenario 1 (spec §8): type then record.
#[tokio::test]
async fn type_then_record() {
    let mut state = MapState::new();
    create_agent(&mut state, "S1", "Alice", 1).await;
    create_asset_type(&mut state, "S1", 2).await;
    create_r1(&mut state, "S1", 210, 3).await;

    let agents: AgentContainer = load(&state, &sc_address::derive_agent_address("S1")).await;
    assert_eq!(agents.find("S1").unwrap().name, "Alice");

    let records: RecordContainer = load(&state, &sc_address::derive_record_address("r1")).await;
    let record = records.find("r1").unwrap();
    assert_eq!(record.owner, "S1");
    assert_eq!(record.custodian, "S1");

    let props: PropertyContainer = load(&state, &sc_address::derive_property_address("r1", "temp")).await;
    let property = props.find("temp").unwrap();
    assert_eq!(property.reporters.len(), 1);
    assert_eq!(property.reporters[0].public_key, "S1");
    assert!(property.reporters[0].authorized);

    let pages: PropertyPageContainer =
        load(&state, &sc_address::derive_property_page_address("r1", "temp", 1)).await;
    let report = &pages.only().unwrap().reported_values[0];
    assert_eq!(report.number_value, 210);
}

/// Scenario 2 (spec §8): proposing and accepting a REPORTER role lets the
/// new reporter submit updates alongside the original.
#[tokio::test]
async fn authorized_reporter() {
    let mut state = MapState::new();
    create_agent(&mut state, "S1", "Alice", 1).await;
    create_asset_type(&mut state, "S1", 2).await;
    create_r1(&mut state, "S1", 210, 3).await;
    create_agent(&mut state, "S2", "Bob", 3).await;

    let mut propose = payload(Action::CreateProposal, 4);
    propose.create_proposal = Some(CreateProposalAction {
        record_id: "r1".into(),
        receiving_agent: "S2".into(),
        role: Role::Reporter as i32,
        properties: vec!["temp".into()],
        terms: String::new(),
    });
    apply(&propose.encode_to_vec(), "S1", &mut state).await.unwrap();

    let mut answer = payload(Action::AnswerProposal, 5);
    answer.answer_proposal = Some(AnswerProposalAction {
        record_id: "r1".into(),
        receiving_agent: "S2".into(),
        role: Role::Reporter as i32,
        response: Response::Accept as i32,
    });
    apply(&answer.encode_to_vec(), "S2", &mut state).await.unwrap();

    let mut update = payload(Action::UpdateProperties, 6);
    update.update_properties = Some(sc_schema::UpdatePropertiesAction {
        record_id: "r1".into(),
        properties: vec![PropertyValue {
            name: "temp".into(),
            data_type: DataType::Number as i32,
            number_value: 230,
            ..Default::default()
        }],
    });
    apply(&update.encode_to_vec(), "S2", &mut state).await.unwrap();

    let props: PropertyContainer = load(&state, &sc_address::derive_property_address("r1", "temp")).await;
    let property = props.find("temp").unwrap();
    assert!(property.reporters.iter().any(|r| r.public_key == "S1" && r.authorized));
    assert!(property.reporters.iter().any(|r| r.public_key == "S2" && r.authorized));

    let pages: PropertyPageContainer =
        load(&state, &sc_address::derive_property_page_address("r1", "temp", 1)).await;
    assert_eq!(pages.only().unwrap().reported_values.len(), 2);
}

/// Scenario 3 (spec §8): an unauthorized signer's update is rejected and
/// leaves no trace.
#[tokio::test]
async fn unauthorized_update_is_rejected() {
    let mut state = MapState::new();
    create_agent(&mut state, "S1", "Alice", 1).await;
    create_asset_type(&mut state, "S1", 2).await;
    create_r1(&mut state, "S1", 210, 3).await;
    create_agent(&mut state, "S3", "Mallory", 3).await;

    let mut update = payload(Action::UpdateProperties, 4);
    update.update_properties = Some(sc_schema::UpdatePropertiesAction {
        record_id: "r1".into(),
        properties: vec![PropertyValue {
            name: "temp".into(),
            data_type: DataType::Number as i32,
            number_value: 400,
            ..Default::default()
        }],
    });
    let err = apply(&update.encode_to_vec(), "S3", &mut state).await.unwrap_err();
    assert!(matches!(err, sc_txn_processor::TpError::UnauthorizedReporter { .. }));

    let pages: PropertyPageContainer =
        load(&state, &sc_address::derive_property_page_address("r1", "temp", 1)).await;
    assert_eq!(pages.only().unwrap().reported_values.len(), 1);
}

/// Scenario 4 (spec §8): ownership transfer by proposal/accept.
#[tokio::test]
async fn ownership_transfer() {
    let mut state = MapState::new();
    create_agent(&mut state, "S1", "Alice", 1).await;
    create_asset_type(&mut state, "S1", 2).await;
    create_r1(&mut state, "S1", 210, 3).await;
    create_agent(&mut state, "S2", "Bob", 3).await;

    let mut propose = payload(Action::CreateProposal, 4);
    propose.create_proposal = Some(CreateProposalAction {
        record_id: "r1".into(),
        receiving_agent: "S2".into(),
        role: Role::Owner as i32,
        properties: vec![],
        terms: String::new(),
    });
    apply(&propose.encode_to_vec(), "S1", &mut state).await.unwrap();

    let records_before: RecordContainer = load(&state, &sc_address::derive_record_address("r1")).await;
    assert_eq!(records_before.find("r1").unwrap().owner, "S1");

    let mut answer = payload(Action::AnswerProposal, 5);
    answer.answer_proposal = Some(AnswerProposalAction {
        record_id: "r1".into(),
        receiving_agent: "S2".into(),
        role: Role::Owner as i32,
        response: Response::Accept as i32,
    });
    apply(&answer.encode_to_vec(), "S2", &mut state).await.unwrap();

    let records_after: RecordContainer = load(&state, &sc_address::derive_record_address("r1")).await;
    assert_eq!(records_after.find("r1").unwrap().owner, "S2");
}

/// Scenario 6 (spec §8): finalize is terminal.
#[tokio::test]
async fn finalize_is_terminal() {
    let mut state = MapState::new();
    create_agent(&mut state, "S1", "Alice", 1).await;
    create_asset_type(&mut state, "S1", 2).await;
    create_r1(&mut state, "S1", 210, 3).await;

    let mut finalize = payload(Action::FinalizeRecord, 7);
    finalize.finalize_record = Some(sc_schema::FinalizeRecordAction { record_id: "r1".into() });
    apply(&finalize.encode_to_vec(), "S1", &mut state).await.unwrap();

    let mut update = payload(Action::UpdateProperties, 8);
    update.update_properties = Some(sc_schema::UpdatePropertiesAction {
        record_id: "r1".into(),
        properties: vec![PropertyValue {
            name: "temp".into(),
            data_type: DataType::Number as i32,
            number_value: 1,
            ..Default::default()
        }],
    });
    let err = apply(&update.encode_to_vec(), "S1", &mut state).await.unwrap_err();
    assert!(matches!(err, sc_txn_processor::TpError::RecordFinal { .. }));
}
