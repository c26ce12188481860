//! Per-action violation taxonomy. Every variant names exactly one clause
//! from a §4.3 contract; `Display` renders the submitter-facing rejection
//! message, and `From<TpError> for ValidationError` is the seam `handler.rs`
//! uses to hand a rejection back across the platform boundary.

use sc_types::ValidationError;

/// Why a transaction was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TpError {
    /// The payload bytes did not decode as a `Payload` message.
    MalformedPayload { reason: String },
    /// `timestamp` was not strictly positive.
    NonPositiveTimestamp,
    /// `action` did not match any known `Action` variant.
    UnknownAction,
    /// A required string field was empty.
    EmptyField { field: &'static str },
    /// The signer already has an Agent.
    AgentAlreadyExists { public_key: String },
    /// The signer has no Agent.
    UnknownAgent { public_key: String },
    /// A RecordType name is already taken.
    RecordTypeAlreadyExists { name: String },
    /// A PropertySchema entry was malformed.
    InvalidPropertySchema { name: String, reason: String },
    /// A `recordId` is already in use.
    RecordAlreadyExists { record_id: String },
    /// A referenced RecordType does not exist.
    UnknownRecordType { name: String },
    /// Incoming properties did not satisfy the RecordType's schema.
    PropertiesDoNotMatchSchema { reason: String },
    /// The Record does not exist.
    UnknownRecord { record_id: String },
    /// The Record is already `final` and may not be mutated.
    RecordFinal { record_id: String },
    /// No Property by this name exists on the Record.
    UnknownProperty { record_id: String, name: String },
    /// The signer is not an authorized reporter for this Property.
    UnauthorizedReporter { public_key: String, name: String },
    /// A reported value's type or shape did not match the Property's schema.
    InvalidReportedValue { name: String, reason: String },
    /// The signer holds neither the `owner` nor `custodian` role required.
    UnauthorizedRole { public_key: String, record_id: String },
    /// An OPEN proposal already exists for this `(recordId, role, receivingAgent)`.
    ProposalAlreadyOpen {
        record_id: String,
        receiving_agent: String,
    },
    /// REPORTER proposal's `properties` was empty or named an unknown Property.
    InvalidProposalProperties { reason: String },
    /// The targeted Proposal does not exist.
    UnknownProposal,
    /// The Proposal is not OPEN.
    ProposalNotOpen,
    /// The signer does not match the responder rule for this action.
    UnauthorizedResponder { public_key: String },
    /// The platform's state port failed a `get_state`/`set_state` round trip.
    PlatformUnavailable { reason: String },
}

impl std::fmt::Display for TpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedPayload { reason } => write!(f, "malformed payload: {reason}"),
            Self::NonPositiveTimestamp => write!(f, "timestamp must be greater than zero"),
            Self::UnknownAction => write!(f, "unknown action"),
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::AgentAlreadyExists { public_key } => {
                write!(f, "agent {public_key} already exists")
            }
            Self::UnknownAgent { public_key } => write!(f, "no agent with public key {public_key}"),
            Self::RecordTypeAlreadyExists { name } => {
                write!(f, "record type {name} already exists")
            }
            Self::InvalidPropertySchema { name, reason } => {
                write!(f, "invalid schema for property {name}: {reason}")
            }
            Self::RecordAlreadyExists { record_id } => {
                write!(f, "record {record_id} already exists")
            }
            Self::UnknownRecordType { name } => write!(f, "no record type named {name}"),
            Self::PropertiesDoNotMatchSchema { reason } => {
                write!(f, "properties do not match record type schema: {reason}")
            }
            Self::UnknownRecord { record_id } => write!(f, "no record with id {record_id}"),
            Self::RecordFinal { record_id } => write!(f, "record {record_id} is already final"),
            Self::UnknownProperty { record_id, name } => {
                write!(f, "record {record_id} has no property named {name}")
            }
            Self::UnauthorizedReporter { public_key, name } => write!(
                f,
                "{public_key} is not an authorized reporter for property {name}"
            ),
            Self::InvalidReportedValue { name, reason } => {
                write!(f, "invalid value for property {name}: {reason}")
            }
            Self::UnauthorizedRole {
                public_key,
                record_id,
            } => write!(f, "{public_key} holds no authorizing role on record {record_id}"),
            Self::ProposalAlreadyOpen {
                record_id,
                receiving_agent,
            } => write!(
                f,
                "an open proposal already exists for record {record_id} to {receiving_agent}"
            ),
            Self::InvalidProposalProperties { reason } => {
                write!(f, "invalid proposal properties: {reason}")
            }
            Self::UnknownProposal => write!(f, "no matching proposal"),
            Self::ProposalNotOpen => write!(f, "proposal is not open"),
            Self::UnauthorizedResponder { public_key } => {
                write!(f, "{public_key} may not respond to this proposal")
            }
            Self::PlatformUnavailable { reason } => write!(f, "state port unavailable: {reason}"),
        }
    }
}

impl From<TpError> for ValidationError {
    fn from(e: TpError) -> Self {
        ValidationError::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_identifying_detail() {
        let e = TpError::UnknownRecord {
            record_id: "r1".into(),
        };
        assert!(e.to_string().contains("r1"));
    }

    #[test]
    fn converts_into_validation_error() {
        let e: ValidationError = TpError::NonPositiveTimestamp.into();
        assert!(e.to_string().contains("timestamp"));
    }
}
