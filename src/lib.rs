//! # zoinks
//!
//! Print field values of Zotero records.
//!
//! Provides:
//! - **Library**: identifier parsing and an async Zotero Web API client that
//!   resolves an identifier into the values of requested fields
//! - **CLI**: `zoinks` binary for terminal use
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> zoinks::error::Result<()> {
//! use zoinks::{FieldRequest, Identifier, ZoteroClient};
//!
//! // Reads ZOTERO_API_KEY and ZOTERO_USER_ID from the environment.
//! let client = ZoteroClient::from_env()?;
//!
//! let id = Identifier::parse("zotero://select/library/items/32TR4H94")?;
//! let fields = FieldRequest::parse_lists(["title,date,citekey"])?;
//! let resolution = client.resolve(&id, &fields).await?;
//! for (name, value) in &resolution.fields {
//!     println!("{}: {}", name, value.as_deref().unwrap_or(""));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Identifiers
//!
//! ```
//! use zoinks::{Identifier, LibraryId};
//!
//! let id = Identifier::parse("zotero://select/groups/2829/items/ABCD2345").unwrap();
//! assert_eq!(id.item.library, LibraryId::Group("2829".to_string()));
//! assert_eq!(id.item.key, "ABCD2345");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod fields;
pub mod identifier;
pub mod items;
pub mod output;
pub mod parse;
pub mod resolve;
pub mod types;

#[cfg(feature = "cli")]
pub mod logging;

// Re-export key types at the crate root.
pub use client::ZoteroClient;
pub use config::Config;
pub use error::{ErrorKind, ZoinksError};
pub use fields::FieldRequest;
pub use identifier::{Identifier, IdentifierKind};
pub use types::*;
