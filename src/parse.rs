//! Zotero API response parsing.

use crate::error::ZoinksError;
use crate::types::Record;
use serde::Deserialize;

/// Single-item response from `GET /{library}/items/{key}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiItemResponse {
    pub key: String,
    #[serde(default)]
    pub version: u64,
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Parse a single-item JSON response into a [`Record`].
pub fn parse_item_response(json: &str) -> crate::error::Result<Record> {
    let response: ApiItemResponse = serde_json::from_str(json)
        .map_err(|e| ZoinksError::Parse(format!("Invalid item JSON: {}", e)))?;

    let item_type = response
        .data
        .get("itemType")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ZoinksError::Parse(format!("Item {} has no itemType", response.key)))?
        .to_string();

    let parent_key = response
        .data
        .get("parentItem")
        .and_then(|v| v.as_str())
        .filter(|k| !k.is_empty())
        .map(String::from);

    Ok(Record {
        key: response.key,
        version: response.version,
        item_type,
        parent_key,
        data: response.data,
    })
}
