//! REVOKE_REPORTER (spec §4.3): signer is the Record's owner; the
//! targeted Property exists and has an authorized reporter entry for
//! `reporterId`. Clears that entry's `authorized` flag.

use super::require_record;
use crate::domain::TpError;
use crate::ports::{StateReader, StateWriter};
use sc_schema::{PropertyContainer, RevokeReporterAction};

pub(in crate::domain) async fn handle<S: StateReader + StateWriter + Sync>(
    signer: &str,
    _timestamp: i64,
    action: &RevokeReporterAction,
    state: &mut S,
) -> Result<(), TpError> {
    let record = require_record(state, &action.record_id).await?;
    if record.owner != signer {
        return Err(TpError::UnauthorizedRole {
            public_key: signer.to_string(),
            record_id: action.record_id.clone(),
        });
    }

    let property_address = sc_address::derive_property_address(&action.record_id, &action.property_name);
    let mut container: PropertyContainer = crate::domain::load(state, &property_address).await?;
    let mut property = container
        .find(&action.property_name)
        .cloned()
        .ok_or_else(|| TpError::UnknownProperty {
            record_id: action.record_id.clone(),
            name: action.property_name.clone(),
        })?;

    let reporter = property
        .reporters
        .iter_mut()
        .find(|r| r.public_key == action.reporter_id && r.authorized)
        .ok_or_else(|| TpError::UnauthorizedReporter {
            public_key: action.reporter_id.clone(),
            name: action.property_name.clone(),
        })?;
    reporter.authorized = false;

    container.upsert(property);
    crate::domain::save(state, &property_address, &container);
    Ok(())
}
