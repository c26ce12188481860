//! PropertyPage enrichment (spec §4.5: "when projecting a PropertyPage
//! entry, C5 looks up the current Property row").
//!
//! A PropertyPage's on-chain address is `sha512(recordId, name, pageNum)`
//! (spec §4.1) — one-way, so C5 cannot recover `(recordId, name)` from the
//! address alone. Instead [`PageIndex`] records the mapping the moment a
//! Property entry names its `currentPage`: within one block, non-
//! PropertyPage entries (including the Property whose `currentPage` was
//! just advanced) are always applied before the PropertyPage entry that
//! page address belongs to (spec §4.5 steps 3/5), so the mapping is
//! always present by the time enrichment needs it. Because C5 replays
//! from genesis on every start (spec §4.5: no persisted cursor), the
//! index is always rebuilt in full and never needs to survive a restart.

use sc_schema::{DataType, Property, PropertySchema};
use std::collections::HashMap;

/// PropertyPage address → the `(name, recordId)` it belongs to.
#[derive(Default)]
pub struct PageIndex {
    pages: HashMap<String, (String, String)>,
}

impl PageIndex {
    /// An empty index, rebuilt from genesis as C5 replays the chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `property`'s current page address, so a later PropertyPage
    /// change at that address can be traced back to this Property.
    pub fn record(&mut self, property: &Property) {
        let address = sc_address::derive_property_page_address(
            &property.record_id,
            &property.name,
            property.current_page as u16,
        );
        self.pages.insert(address, (property.name.clone(), property.record_id.clone()));
    }

    /// The `(name, recordId)` a PropertyPage address belongs to, if this
    /// index has seen the Property entry that named it.
    pub fn lookup(&self, page_address: &str) -> Option<&(String, String)> {
        self.pages.get(page_address)
    }
}

/// Rewrite a decoded PropertyPageContainer's JSON projection per spec
/// §4.5's enrichment rule: ENUM reports get their `enumValue` index
/// rewritten to the matching string from `enumOptions`; STRUCT reports get
/// their `structValues` list folded into a keyed `structValue` map;
/// everything else has `enumValue` zeroed.
pub fn enrich_page_doc(mut doc: serde_json::Value, property: &Property) -> serde_json::Value {
    let data_type = DataType::try_from(property.data_type).unwrap_or(DataType::UnsetDataType);
    if let Some(entries) = doc.get_mut("entries").and_then(|v| v.as_array_mut()) {
        for entry in entries {
            if let Some(reports) = entry.get_mut("reported_values").and_then(|v| v.as_array_mut()) {
                for report in reports {
                    enrich_report(report, data_type, property);
                }
            }
        }
    }
    doc
}

fn enrich_report(report: &mut serde_json::Value, data_type: DataType, property: &Property) {
    match data_type {
        DataType::Enum => {
            let idx = report.get("enum_value").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
            let label = property.enum_options.get(idx).cloned();
            set_field(report, "enum_value", label.map(serde_json::Value::String).unwrap_or(serde_json::Value::Null));
        }
        _ => set_field(report, "enum_value", serde_json::Value::Null),
    }

    if data_type == DataType::Struct {
        let nested = report
            .get("struct_values")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let folded = fold_struct_values(&nested, &property.struct_properties);
        if let Some(obj) = report.as_object_mut() {
            obj.remove("struct_values");
            obj.insert("struct_value".to_string(), serde_json::Value::Object(folded));
        }
    }
}

fn fold_struct_values(
    values: &[serde_json::Value],
    schemas: &[PropertySchema],
) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    for value in values {
        let name = value.get("name").and_then(|n| n.as_str()).unwrap_or_default().to_string();
        let schema = schemas.iter().find(|s| s.name == name);
        let folded = fold_value(value, schema);
        map.insert(name, folded);
    }
    map
}

fn fold_value(value: &serde_json::Value, schema: Option<&PropertySchema>) -> serde_json::Value {
    let raw_data_type = value.get("data_type").and_then(|d| d.as_i64()).unwrap_or(0) as i32;
    let data_type = schema
        .map(|s| DataType::try_from(s.data_type).unwrap_or(DataType::UnsetDataType))
        .unwrap_or_else(|| DataType::try_from(raw_data_type).unwrap_or(DataType::UnsetDataType));

    match data_type {
        DataType::Enum => {
            let idx = value.get("enum_value").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
            schema
                .and_then(|s| s.enum_options.get(idx).cloned())
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null)
        }
        DataType::Struct => {
            let nested = value.get("struct_values").and_then(|v| v.as_array()).cloned().unwrap_or_default();
            let nested_schemas = schema.map(|s| s.struct_properties.as_slice()).unwrap_or(&[]);
            serde_json::Value::Object(fold_struct_values(&nested, nested_schemas))
        }
        DataType::Bytes => value.get("bytes_value").cloned().unwrap_or(serde_json::Value::Null),
        DataType::Boolean => value.get("boolean_value").cloned().unwrap_or(serde_json::Value::Null),
        DataType::Number => value.get("number_value").cloned().unwrap_or(serde_json::Value::Null),
        DataType::String => value.get("string_value").cloned().unwrap_or(serde_json::Value::Null),
        DataType::Location => value.get("location_value").cloned().unwrap_or(serde_json::Value::Null),
        DataType::UnsetDataType => serde_json::Value::Null,
    }
}

fn set_field(value: &mut serde_json::Value, key: &str, new_value: serde_json::Value) {
    if let Some(obj) = value.as_object_mut() {
        obj.insert(key.to_string(), new_value);
    }
}
