//! Identifier parsing.
//!
//! Accepts Zotero selection links (`zotero://select/library/items/32TR4H94`),
//! bare item keys (`32TR4H94`), and paths to attachment files kept in a Zotero
//! storage directory (`~/Zotero/storage/32TR4H94/paper.pdf`).

use crate::error::{Result, ZoinksError};
use crate::types::{ItemRef, LibraryId};
use std::path::Path;
use url::Url;

/// Characters Zotero uses in item keys.
const KEY_ALPHABET: &str = "23456789ABCDEFGHIJKLMNPQRSTUVWXYZ";

/// Length of a Zotero item key.
const KEY_LEN: usize = 8;

/// Scheme prefix of selection links.
const ZOTERO_SCHEME: &str = "zotero:";

/// Name of the directory that holds stored attachment files.
const STORAGE_DIR: &str = "storage";

/// Which input form an identifier was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    SelectLink,
    ItemKey,
    FilePath,
}

/// A parsed identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub item: ItemRef,
    pub kind: IdentifierKind,
}

impl Identifier {
    /// Parse a selection link, item key, or storage file path.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ZoinksError::InvalidIdentifier("empty identifier".to_string()));
        }

        if has_zotero_scheme(input) {
            return parse_select_link(input).map(|item| Self {
                item,
                kind: IdentifierKind::SelectLink,
            });
        }

        if is_item_key(input) {
            return Ok(Self {
                item: ItemRef::new(LibraryId::Personal, input),
                kind: IdentifierKind::ItemKey,
            });
        }

        let path = Path::new(input);
        if path.exists() {
            return parse_storage_path(path).map(|item| Self {
                item,
                kind: IdentifierKind::FilePath,
            });
        }

        Err(ZoinksError::InvalidIdentifier(format!(
            "\"{}\" is not a Zotero link, item key, or existing file",
            input
        )))
    }
}

/// Check if a string has the shape of a Zotero item key.
pub fn is_item_key(s: &str) -> bool {
    s.len() == KEY_LEN && s.chars().all(|c| KEY_ALPHABET.contains(c))
}

/// Parse a `zotero://select/...` URI into an item reference.
pub fn parse_select_link(input: &str) -> Result<ItemRef> {
    let invalid = || ZoinksError::InvalidIdentifier(format!("unrecognized Zotero link: {}", input));

    let url = Url::parse(input).map_err(|_| invalid())?;
    if url.scheme() != "zotero" || url.host_str() != Some("select") {
        return Err(invalid());
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let (library, key) = match segments.as_slice() {
        ["library", "items", key] => (LibraryId::Personal, *key),
        ["users", id, "items", key] if is_numeric(id) => (LibraryId::User(id.to_string()), *key),
        ["groups", id, "items", key] if is_numeric(id) => (LibraryId::Group(id.to_string()), *key),
        // Legacy form written by older Zotero versions: local library 1 is
        // always the personal library.
        ["items", key] => match key.split_once('_') {
            Some(("1", key)) => (LibraryId::Personal, key),
            Some(_) => return Err(invalid()),
            None => (LibraryId::Personal, *key),
        },
        _ => return Err(invalid()),
    };

    if !is_item_key(key) {
        return Err(ZoinksError::InvalidIdentifier(format!(
            "\"{}\" in {} is not a Zotero item key",
            key, input
        )));
    }

    Ok(ItemRef::new(library, key))
}

/// Find the attachment key for a file inside `<data dir>/storage/<KEY>/`.
pub fn parse_storage_path(path: &Path) -> Result<ItemRef> {
    let key = path
        .ancestors()
        .filter_map(|dir| {
            let name = dir.file_name()?.to_str()?;
            let parent = dir.parent()?.file_name()?.to_str()?;
            (parent == STORAGE_DIR && is_item_key(name)).then_some(name)
        })
        .next()
        .ok_or_else(|| {
            ZoinksError::InvalidIdentifier(format!(
                "{} is not inside a Zotero storage directory",
                path.display()
            ))
        })?;

    Ok(ItemRef::new(LibraryId::Personal, key))
}

/// URI schemes compare case-insensitively.
fn has_zotero_scheme(s: &str) -> bool {
    s.get(..ZOTERO_SCHEME.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(ZOTERO_SCHEME))
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
