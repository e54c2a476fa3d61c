//! Text and JSON rendering of resolved field values.

use crate::error::Result;
use crate::fields::FieldRequest;
use crate::types::{Record, Resolution};

/// Render resolutions as lines of text.
///
/// One identifier and one named field prints the bare value. Several fields,
/// or all fields, print `field: value`. Several identifiers prefix each line
/// with the item key. Absent values render as empty strings.
pub fn render_text(fields: &FieldRequest, resolutions: &[Resolution]) -> String {
    let multi_item = resolutions.len() > 1;
    let mut lines = Vec::new();

    for resolution in resolutions {
        let multi_field = fields.is_all() || resolution.fields.len() > 1;
        for (name, value) in &resolution.fields {
            let value = value.as_deref().unwrap_or("");
            let line = match (multi_item, multi_field) {
                (false, false) => value.to_string(),
                (false, true) => format!("{}: {}", name, value),
                (true, false) => format!("{}: {}", resolution.key, value),
                (true, true) => format!("{}: {}: {}", resolution.key, name, value),
            };
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Render resolutions as a pretty JSON array of `{key, fields}` objects,
/// keeping field order and using `null` for absent values.
pub fn render_json(resolutions: &[Resolution]) -> Result<String> {
    let items: Vec<serde_json::Value> = resolutions
        .iter()
        .map(|r| {
            let fields: serde_json::Map<String, serde_json::Value> = r
                .fields
                .iter()
                .map(|(name, value)| {
                    let value = value
                        .as_ref()
                        .map(|v| serde_json::Value::String(v.clone()))
                        .unwrap_or(serde_json::Value::Null);
                    (name.clone(), value)
                })
                .collect();
            serde_json::json!({ "key": r.key, "fields": fields })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&items)?)
}

/// Column names for tabular output: the requested names, or for
/// [`FieldRequest::all`] every name seen across the resolutions, first-seen
/// order.
pub fn column_names(fields: &FieldRequest, resolutions: &[Resolution]) -> Vec<String> {
    if !fields.is_all() {
        return fields.names().to_vec();
    }
    let mut names: Vec<String> = Vec::new();
    for (name, _) in resolutions.iter().flat_map(|r| &r.fields) {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

/// Render the names of the fields present on each record.
pub fn render_field_names(records: &[Record]) -> String {
    if let [record] = records {
        return record.field_names().join(", ");
    }
    records
        .iter()
        .map(|r| format!("{}: {}", r.key, r.field_names().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the field names of each record as a JSON array of
/// `{key, fields: [name, ...]}` objects.
pub fn render_field_names_json(records: &[Record]) -> Result<String> {
    let items: Vec<serde_json::Value> = records
        .iter()
        .map(|r| serde_json::json!({ "key": r.key, "fields": r.field_names() }))
        .collect();
    Ok(serde_json::to_string_pretty(&items)?)
}
