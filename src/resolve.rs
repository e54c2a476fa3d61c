//! Resolution of identifiers into field values.

use crate::client::ZoteroClient;
use crate::error::Result;
use crate::fields::FieldRequest;
use crate::identifier::{Identifier, IdentifierKind};
use crate::types::{ItemRef, Record, Resolution};

impl ZoteroClient {
    /// Fetch the record an identifier refers to.
    ///
    /// A file path names an attachment; the record returned is the item the
    /// attachment belongs to, or the attachment itself when it is standalone.
    pub async fn fetch_record(&self, id: &Identifier) -> Result<Record> {
        let record = self.get_item(&id.item).await?;

        if id.kind != IdentifierKind::FilePath || !record.is_attachment() {
            return Ok(record);
        }

        match &record.parent_key {
            Some(parent) => {
                tracing::debug!(attachment = %record.key, %parent, "following attachment to parent");
                self.get_item(&ItemRef::new(id.item.library.clone(), parent.clone()))
                    .await
            }
            None => Ok(record),
        }
    }

    /// Look up the requested fields on the record an identifier refers to.
    ///
    /// Fields the record lacks come back as `None`.
    pub async fn resolve(&self, id: &Identifier, fields: &FieldRequest) -> Result<Resolution> {
        let record = self.fetch_record(id).await?;
        let values = fields.extract(&record);
        tracing::info!(
            item = %id.item,
            found = values.iter().filter(|(_, v)| v.is_some()).count(),
            requested = values.len(),
            "resolved"
        );
        Ok(Resolution {
            key: record.key,
            fields: values,
        })
    }
}
