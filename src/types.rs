//! Public types for zoinks.
//!
//! Records keep the item's `data` object as returned by the Zotero API, so any
//! field the service knows about can be looked up by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The library an item lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryId {
    /// The personal library of whoever owns the configured API key
    /// (`library` in a selection link).
    Personal,
    /// A user library with an explicit numeric ID.
    User(String),
    /// A group library with a numeric ID.
    Group(String),
}

impl LibraryId {
    /// API path prefix for this library, e.g. `/groups/12345`.
    ///
    /// `user_id` fills in [`LibraryId::Personal`]; it is ignored otherwise.
    pub fn api_prefix(&self, user_id: Option<&str>) -> Option<String> {
        match self {
            Self::Personal => user_id.map(|id| format!("/users/{}", id)),
            Self::User(id) => Some(format!("/users/{}", id)),
            Self::Group(id) => Some(format!("/groups/{}", id)),
        }
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => write!(f, "library"),
            Self::User(id) => write!(f, "users/{}", id),
            Self::Group(id) => write!(f, "groups/{}", id),
        }
    }
}

/// A (library, item key) pair naming one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub library: LibraryId,
    pub key: String,
}

impl ItemRef {
    pub fn new(library: LibraryId, key: impl Into<String>) -> Self {
        Self {
            library,
            key: key.into(),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/items/{}", self.library, self.key)
    }
}

/// An item record from the Zotero API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Item key.
    pub key: String,
    /// Library version of the item.
    pub version: u64,
    /// `itemType` from the data object (`journalArticle`, `attachment`, ...).
    pub item_type: String,
    /// Key of the parent item, for attachments and notes.
    pub parent_key: Option<String>,
    /// The raw `data` object.
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    pub fn is_attachment(&self) -> bool {
        self.item_type == "attachment"
    }

    /// Names of all fields present on the record, in the order the service
    /// returned them.
    pub fn field_names(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    /// Creators in record order.
    pub fn creators(&self) -> Vec<Creator> {
        self.data
            .get("creators")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

/// A creator (author, editor, ...) on a record.
///
/// Zotero stores either a two-field name (`lastName`/`firstName`) or a
/// single-field `name` for institutional creators.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    #[serde(default)]
    pub creator_type: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Creator {
    /// Format as "Last, First" (or the single-field name).
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match (self.last_name.as_deref(), self.first_name.as_deref()) {
            (Some(last), Some(first)) if !first.is_empty() => format!("{}, {}", last, first),
            (Some(last), _) => last.to_string(),
            (None, Some(first)) => first.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Field values resolved for one identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Key of the record the values were taken from.
    pub key: String,
    /// Requested field names paired with their values, in request order.
    pub fields: Vec<(String, Option<String>)>,
}

impl Resolution {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }
}
