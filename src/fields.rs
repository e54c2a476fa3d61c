//! Field requests and field extraction from records.

use crate::error::{Result, ZoinksError};
use crate::types::Record;
use serde_json::Value;

/// Prefix of the line Better BibTeX writes into `extra` for pinned keys.
const CITATION_KEY_PREFIX: &str = "citation key:";

/// An ordered set of field names to look up, or every field on the record.
///
/// Duplicates (compared case-insensitively) are dropped, keeping the first
/// occurrence and its spelling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldRequest {
    names: Vec<String>,
    all: bool,
}

impl FieldRequest {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::default();
        for name in names {
            request.push(name.as_ref());
        }
        if request.names.is_empty() {
            return Err(ZoinksError::BadArgument("no field names given".to_string()));
        }
        Ok(request)
    }

    /// Parse one or more comma-separated lists (`-f title,date -f doi`).
    pub fn parse_lists<I, S>(lists: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = lists
            .into_iter()
            .flat_map(|list| {
                list.as_ref()
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .collect();
        Self::new(names)
    }

    /// Request every field present on the record, in response order.
    pub fn all() -> Self {
        Self {
            names: Vec::new(),
            all: true,
        }
    }

    pub fn is_all(&self) -> bool {
        self.all
    }

    fn push(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            return;
        }
        self.names.push(name.to_string());
    }

    /// Explicitly requested names; empty for [`FieldRequest::all`].
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Look up every requested field, in request order.
    pub fn extract(&self, record: &Record) -> Vec<(String, Option<String>)> {
        if self.all {
            return record
                .field_names()
                .into_iter()
                .map(|name| (name.to_string(), field_value(record, name)))
                .collect();
        }
        self.names
            .iter()
            .map(|name| (name.clone(), field_value(record, name)))
            .collect()
    }
}

/// Value of a named field on a record, or `None` if the record lacks it.
pub fn field_value(record: &Record, name: &str) -> Option<String> {
    let lower = name.to_ascii_lowercase();
    let value = match lower.as_str() {
        "citekey" | "citationkey" => citation_key(record),
        "key" => Some(record.key.clone()),
        "itemtype" | "type" => Some(record.item_type.clone()),
        "authors" | "creators" => {
            let names: Vec<String> = record
                .creators()
                .iter()
                .map(|c| c.display_name())
                .filter(|n| !n.is_empty())
                .collect();
            (!names.is_empty()).then(|| names.join("; "))
        }
        "year" => lookup(record, "date")
            .and_then(render)
            .and_then(|date| extract_year(&date)),
        "tags" => lookup(record, "tags").and_then(render_tags),
        _ => lookup(record, name).and_then(render),
    };
    value.filter(|v| !v.is_empty())
}

/// Case-insensitive lookup in the record's data object.
fn lookup<'a>(record: &'a Record, name: &str) -> Option<&'a Value> {
    record.data.get(name).or_else(|| {
        record
            .data
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    })
}

/// Render a JSON value as a single display string.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) if items.iter().all(Value::is_string) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => serde_json::to_string(other).ok(),
    }
}

fn render_tags(value: &Value) -> Option<String> {
    let tags: Vec<&str> = value
        .as_array()?
        .iter()
        .filter_map(|t| t.get("tag").and_then(Value::as_str))
        .collect();
    (!tags.is_empty()).then(|| tags.join(", "))
}

/// Citation key from `citationKey`, falling back to a `Citation Key:` line in
/// `extra`.
fn citation_key(record: &Record) -> Option<String> {
    if let Some(key) = record
        .data
        .get("citationKey")
        .and_then(Value::as_str)
        .filter(|k| !k.trim().is_empty())
    {
        return Some(key.trim().to_string());
    }

    let extra = record.data.get("extra").and_then(Value::as_str)?;
    extra.lines().find_map(|line| {
        let line = line.trim();
        let head = line.get(..CITATION_KEY_PREFIX.len())?;
        if head.eq_ignore_ascii_case(CITATION_KEY_PREFIX) {
            let key = line[CITATION_KEY_PREFIX.len()..].trim();
            (!key.is_empty()).then(|| key.to_string())
        } else {
            None
        }
    })
}

/// First run of four digits in a Zotero date string ("March 2, 1998",
/// "1998-03-02", "2021/4").
fn extract_year(date: &str) -> Option<String> {
    let bytes = date.as_bytes();
    bytes
        .windows(4)
        .enumerate()
        .find(|(i, w)| {
            w.iter().all(u8::is_ascii_digit)
                && bytes.get(i + 4).map_or(true, |b| !b.is_ascii_digit())
                && (*i == 0 || !bytes[i - 1].is_ascii_digit())
        })
        .map(|(i, _)| date[i..i + 4].to_string())
}
