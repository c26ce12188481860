//! CREATE_PROPOSAL (spec §4.3): signer is an Agent holding the role
//! required to offer `role`'s transfer (an OWNER proposal requires the
//! signer be the current owner; a CUSTODIAN proposal requires the signer
//! be the current custodian; a REPORTER proposal is owner-only); no
//! existing OPEN proposal for the same `(recordId, role, receivingAgent)`;
//! REPORTER proposals name a non-empty subset of the record type's
//! properties.

use super::{require_agent, require_record};
use crate::domain::TpError;
use crate::ports::{StateReader, StateWriter};
use sc_schema::{CreateProposalAction, Proposal, ProposalContainer, ProposalStatus, Role, RecordTypeContainer};

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    timestamp: i64,
    action: &CreateProposalAction,
    state: &mut S,
) -> Result<(), TpError> {
    require_agent(state, signer).await?;
    let record = require_record(state, &action.record_id).await?;

    let role = Role::try_from(action.role).map_err(|_| TpError::UnauthorizedRole {
        public_key: signer.to_string(),
        record_id: action.record_id.clone(),
    })?;
    let unauthorized = || TpError::UnauthorizedRole {
        public_key: signer.to_string(),
        record_id: action.record_id.clone(),
    };
    let address_role = match role {
        Role::Owner if signer == record.owner => sc_address::Role::Owner,
        Role::Custodian if signer == record.custodian => sc_address::Role::Custodian,
        Role::Reporter if signer == record.owner => sc_address::Role::Reporter,
        _ => return Err(unauthorized()),
    };

    let proposal_address =
        sc_address::derive_proposal_address(&action.record_id, &action.receiving_agent, address_role);
    let mut container: ProposalContainer = crate::domain::load(state, &proposal_address).await?;
    if container.find_open(&action.receiving_agent, action.role).is_some() {
        return Err(TpError::ProposalAlreadyOpen {
            record_id: action.record_id.clone(),
            receiving_agent: action.receiving_agent.clone(),
        });
    }

    if role == Role::Reporter {
        if action.properties.is_empty() {
            return Err(TpError::InvalidProposalProperties {
                reason: "REPORTER proposal must name at least one property".to_string(),
            });
        }
        let record_type_address = sc_address::derive_record_type_address(&record.record_type);
        let record_type_container: RecordTypeContainer = crate::domain::load(state, &record_type_address).await?;
        let record_type = record_type_container.find(&record.record_type).ok_or_else(|| {
            TpError::UnknownRecordType {
                name: record.record_type.clone(),
            }
        })?;
        for name in &action.properties {
            if !record_type.properties.iter().any(|p| &p.name == name) {
                return Err(TpError::InvalidProposalProperties {
                    reason: format!("{name} is not a property of record {}", action.record_id),
                });
            }
        }
    }

    container.upsert(Proposal {
        record_id: action.record_id.clone(),
        receiving_agent: action.receiving_agent.clone(),
        issuing_agent: signer.to_string(),
        role: action.role,
        properties: action.properties.clone(),
        status: ProposalStatus::Open as i32,
        terms: action.terms.clone(),
        timestamp,
    });
    crate::domain::save(state, &proposal_address, &container);
    Ok(())
}
