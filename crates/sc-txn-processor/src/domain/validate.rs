//! Shape validation shared by CREATE_RECORD_TYPE, CREATE_RECORD, and
//! UPDATE_PROPERTIES (spec §4.3): a schema must be well-formed, and a
//! reported value must match the schema (or the live Property) it targets.

use crate::domain::TpError;
use sc_schema::{DataType, Property, PropertySchema, PropertyValue};

/// Validate a `PropertySchema` entry recursively: nonempty name, a known
/// `dataType`, ≥1 option for ENUM, a nested schema for STRUCT.
pub(super) fn validate_schema(schema: &PropertySchema) -> Result<(), TpError> {
    if schema.name.is_empty() {
        return Err(TpError::InvalidPropertySchema {
            name: schema.name.clone(),
            reason: "name must not be empty".to_string(),
        });
    }
    let data_type = DataType::try_from(schema.data_type).map_err(|_| TpError::InvalidPropertySchema {
        name: schema.name.clone(),
        reason: "unknown dataType".to_string(),
    })?;
    match data_type {
        DataType::Enum if schema.enum_options.is_empty() => {
            return Err(TpError::InvalidPropertySchema {
                name: schema.name.clone(),
                reason: "ENUM schema must declare at least one option".to_string(),
            })
        }
        DataType::Struct if schema.struct_properties.is_empty() => {
            return Err(TpError::InvalidPropertySchema {
                name: schema.name.clone(),
                reason: "STRUCT schema must declare nested properties".to_string(),
            })
        }
        DataType::UnsetDataType => {
            return Err(TpError::InvalidPropertySchema {
                name: schema.name.clone(),
                reason: "dataType must be set".to_string(),
            })
        }
        DataType::Struct => {
            for nested in &schema.struct_properties {
                validate_schema(nested)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Check that `value` matches the shape `schema` describes: matching
/// `dataType`, an in-range ENUM index, and recursively valid STRUCT
/// members.
pub(super) fn validate_value_against_schema(
    value: &PropertyValue,
    schema: &PropertySchema,
) -> Result<(), TpError> {
    if value.data_type != schema.data_type {
        return Err(TpError::InvalidReportedValue {
            name: value.name.clone(),
            reason: "dataType does not match schema".to_string(),
        });
    }
    match DataType::try_from(value.data_type) {
        Ok(DataType::Enum) if value.enum_value as usize >= schema.enum_options.len() => {
            Err(TpError::InvalidReportedValue {
                name: value.name.clone(),
                reason: "enum index out of range".to_string(),
            })
        }
        Ok(DataType::Struct) => {
            for nested in &value.struct_values {
                let nested_schema = schema
                    .struct_properties
                    .iter()
                    .find(|s| s.name == nested.name)
                    .ok_or_else(|| TpError::InvalidReportedValue {
                        name: nested.name.clone(),
                        reason: "not declared on the struct schema".to_string(),
                    })?;
                validate_value_against_schema(nested, nested_schema)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Check that `value` matches the shape a live `Property` row (and the
/// exponent/fixed schema frozen on it at CREATE_RECORD time) describes.
/// The number exponent itself is fixed at schema time (spec §4.3) — there
/// is nothing further to bound per update.
pub(super) fn validate_value_against_property(
    value: &PropertyValue,
    property: &Property,
) -> Result<(), TpError> {
    if value.data_type != property.data_type {
        return Err(TpError::InvalidReportedValue {
            name: value.name.clone(),
            reason: "dataType does not match property".to_string(),
        });
    }
    match DataType::try_from(value.data_type) {
        Ok(DataType::Enum) if value.enum_value as usize >= property.enum_options.len() => {
            Err(TpError::InvalidReportedValue {
                name: value.name.clone(),
                reason: "enum index out of range".to_string(),
            })
        }
        Ok(DataType::Struct) => {
            for nested in &value.struct_values {
                let nested_schema = property
                    .struct_properties
                    .iter()
                    .find(|s| s.name == nested.name)
                    .ok_or_else(|| TpError::InvalidReportedValue {
                        name: nested.name.clone(),
                        reason: "not declared on the struct property".to_string(),
                    })?;
                validate_value_against_schema(nested, nested_schema)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
