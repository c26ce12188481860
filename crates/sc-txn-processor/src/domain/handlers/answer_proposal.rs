//! ANSWER_PROPOSAL (spec §4.3): the targeted proposal exists and is OPEN;
//! the signer matches the responder rule for the requested response
//! (`receivingAgent` for ACCEPT/REJECT, the issuing agent for CANCEL). On
//! ACCEPT, the transfer the proposal describes is applied; REJECT/CANCEL
//! only change the proposal's status.

use super::require_record;
use crate::domain::TpError;
use crate::ports::{StateReader, StateWriter};
use sc_schema::{
    answer_proposal_action::Response, AnswerProposalAction, PropertyContainer, ProposalContainer,
    ProposalStatus, Reporter, Role,
};

async fn accept<S: StateReader + StateWriter + Sync>(
    state: &mut S,
    record_id: &str,
    receiving_agent: &str,
    role: Role,
    proposal_properties: &[String],
) -> Result<(), TpError> {
    match role {
        Role::Owner => {
            super::update_record(state, record_id, |r| r.owner = receiving_agent.to_string()).await
        }
        Role::Custodian => {
            super::update_record(state, record_id, |r| r.custodian = receiving_agent.to_string()).await
        }
        Role::Reporter => {
            for name in proposal_properties {
                let property_address = sc_address::derive_property_address(record_id, name);
                let mut container: PropertyContainer = crate::domain::load(state, &property_address).await?;
                let mut property = container.find(name).cloned().ok_or_else(|| TpError::UnknownProperty {
                    record_id: record_id.to_string(),
                    name: name.clone(),
                })?;
                match property.reporters.iter_mut().find(|r| r.public_key == receiving_agent) {
                    Some(reporter) => reporter.authorized = true,
                    None => {
                        let index = property.reporters.len() as u32;
                        property.reporters.push(Reporter {
                            public_key: receiving_agent.to_string(),
                            authorized: true,
                            index,
                        });
                    }
                }
                container.upsert(property);
                crate::domain::save(state, &property_address, &container);
            }
            Ok(())
        }
        Role::UnsetRole => Ok(()),
    }
}

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    _timestamp: i64,
    action: &AnswerProposalAction,
    state: &mut S,
) -> Result<(), TpError> {
    require_record(state, &action.record_id).await?;

    let role = Role::try_from(action.role).map_err(|_| TpError::UnknownProposal)?;
    let address_role = match role {
        Role::Owner => sc_address::Role::Owner,
        Role::Custodian => sc_address::Role::Custodian,
        Role::Reporter => sc_address::Role::Reporter,
        Role::UnsetRole => return Err(TpError::UnknownProposal),
    };
    let proposal_address =
        sc_address::derive_proposal_address(&action.record_id, &action.receiving_agent, address_role);
    let mut container: ProposalContainer = crate::domain::load(state, &proposal_address).await?;

    let has_history = container
        .entries
        .iter()
        .any(|p| p.receiving_agent == action.receiving_agent && p.role == action.role);
    let proposal = container
        .find_open(&action.receiving_agent, action.role)
        .cloned()
        .ok_or(if has_history {
            TpError::ProposalNotOpen
        } else {
            TpError::UnknownProposal
        })?;

    let response = Response::try_from(action.response).unwrap_or(Response::UnsetResponse);
    let responder_ok = match response {
        Response::Accept | Response::Reject => signer == proposal.receiving_agent,
        Response::Cancel => signer == proposal.issuing_agent,
        Response::UnsetResponse => false,
    };
    if !responder_ok {
        return Err(TpError::UnauthorizedResponder {
            public_key: signer.to_string(),
        });
    }

    match response {
        Response::Accept => {
            accept(
                state,
                &action.record_id,
                &action.receiving_agent,
                role,
                &proposal.properties,
            )
            .await?;
        }
        Response::Reject | Response::Cancel | Response::UnsetResponse => {}
    }

    let new_status = match response {
        Response::Accept => ProposalStatus::Accepted,
        Response::Reject => ProposalStatus::Rejected,
        Response::Cancel => ProposalStatus::Canceled,
        Response::UnsetResponse => ProposalStatus::UnsetStatus,
    };
    let mut updated = proposal;
    updated.status = new_status as i32;
    container.upsert(updated);
    crate::domain::save(state, &proposal_address, &container);
    Ok(())
}
