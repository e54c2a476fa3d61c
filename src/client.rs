//! The Zotero Web API client.

use crate::config::Config;
use crate::error::{Result, ZoinksError};
use reqwest::Client;
use std::time::Duration;

/// Zotero Web API version this client speaks.
pub const API_VERSION: &str = "3";

/// Async client for the Zotero Web API.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> zoinks::error::Result<()> {
/// use zoinks::{FieldRequest, Identifier, ZoteroClient};
///
/// let client = ZoteroClient::from_env()?;
/// let id = Identifier::parse("zotero://select/library/items/32TR4H94")?;
/// let fields = FieldRequest::new(["citekey"])?;
/// let resolution = client.resolve(&id, &fields).await?;
/// println!("{}", resolution.get("citekey").unwrap_or(""));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ZoteroClient {
    pub(crate) http: Client,
    pub(crate) api_key: Option<String>,
    pub(crate) user_id: Option<String>,
    pub(crate) base_url: String,
}

impl ZoteroClient {
    /// Create a client from explicit settings.
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("zoinks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            user_id: config.user_id,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from `ZOTERO_API_KEY`, `ZOTERO_USER_ID` and
    /// `ZOTERO_API_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env())
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Make a GET request to the Zotero API, authenticated when a key is set.
    pub(crate) async fn get(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let mut request = self
            .http
            .get(&url)
            .header("Zotero-API-Version", API_VERSION)
            .query(&[("format", "json")]);
        if let Some(key) = &self.api_key {
            request = request.header("Zotero-API-Key", key);
        }

        let response = request.send().await?;
        tracing::debug!(status = response.status().as_u16(), "response");
        handle_response(response).await
    }
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();

    match status {
        200..=299 => Ok(response.text().await?),
        401 | 403 => Err(ZoinksError::AccessDenied),
        404 => Err(ZoinksError::RecordNotFound(response.url().path().to_string())),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(ZoinksError::RateLimited { retry_after })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(ZoinksError::Api {
                status,
                message: body.trim().to_string(),
            })
        }
    }
}
