//! Item retrieval endpoint.

use crate::client::ZoteroClient;
use crate::error::{Result, ZoinksError};
use crate::parse::parse_item_response;
use crate::types::{ItemRef, Record};

impl ZoteroClient {
    /// API path of an item, e.g. `/users/475425/items/32TR4H94`.
    pub fn item_path(&self, item: &ItemRef) -> Result<String> {
        let prefix = item.library.api_prefix(self.user_id()).ok_or_else(|| {
            ZoinksError::BadArgument(
                "a Zotero user ID is needed to look up items in your personal library: \
                 set ZOTERO_USER_ID or pass --user-id"
                    .to_string(),
            )
        })?;
        Ok(format!("{}/items/{}", prefix, item.key))
    }

    /// Fetch a single item record.
    pub async fn get_item(&self, item: &ItemRef) -> Result<Record> {
        let path = self.item_path(item)?;
        let body = self.get(&path).await.map_err(|e| match e {
            ZoinksError::RecordNotFound(_) => ZoinksError::RecordNotFound(item.to_string()),
            other => other,
        })?;
        parse_item_response(&body)
    }
}
