//! Environment-provided settings for talking to the Zotero API.

/// Default Zotero Web API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.zotero.org";

/// Connection settings.
///
/// Read from `ZOTERO_API_KEY`, `ZOTERO_USER_ID` and `ZOTERO_API_URL`; command
/// line flags override individual values with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API key. Optional: public libraries can be read without one.
    pub api_key: Option<String>,
    /// Numeric user ID of the personal library.
    pub user_id: Option<String>,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            user_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            api_key: get("ZOTERO_API_KEY"),
            user_id: get("ZOTERO_USER_ID"),
            base_url: get("ZOTERO_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if key.is_some() {
            self.api_key = key;
        }
        self
    }

    pub fn with_user_id(mut self, id: Option<String>) -> Self {
        if id.is_some() {
            self.user_id = id;
        }
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}
