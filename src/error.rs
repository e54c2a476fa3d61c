//! Error types for zoinks.

use std::time::Duration;

/// Errors that can occur while resolving Zotero identifiers into field values.
#[derive(Debug, thiserror::Error)]
pub enum ZoinksError {
    /// The input is not a selection link, an item key, or a path inside a
    /// Zotero storage directory.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The service reported that no such item exists.
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// HTTP request failed (network, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Zotero API returned an error status code.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The API key was rejected or lacks access to the library (HTTP 401/403).
    #[error("Access denied by the Zotero API: check ZOTERO_API_KEY and library permissions")]
    AccessDenied,

    /// Rate limited by the Zotero API (HTTP 429).
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Failed to parse API response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Bad or missing command argument or configuration value.
    #[error("{0}")]
    BadArgument(String),

    /// Reading identifiers from a file failed.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`ZoinksError`], used by the CLI to pick an
/// exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidIdentifier,
    RecordNotFound,
    ServiceError,
    BadArgument,
    File,
    Other,
}

impl ZoinksError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            Self::RecordNotFound(_) => ErrorKind::RecordNotFound,
            Self::Http(_)
            | Self::Api { .. }
            | Self::AccessDenied
            | Self::RateLimited { .. }
            | Self::Parse(_) => ErrorKind::ServiceError,
            Self::BadArgument(_) => ErrorKind::BadArgument,
            Self::Io(_) => ErrorKind::File,
            Self::Json(_) => ErrorKind::Other,
        }
    }
}

/// Convenience alias for Results using [`ZoinksError`].
pub type Result<T> = std::result::Result<T, ZoinksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_failures_share_a_kind() {
        let errors = [
            ZoinksError::AccessDenied,
            ZoinksError::Api {
                status: 500,
                message: "boom".to_string(),
            },
            ZoinksError::RateLimited { retry_after: None },
            ZoinksError::Parse("bad json".to_string()),
        ];
        for e in &errors {
            assert_eq!(e.kind(), ErrorKind::ServiceError, "{e}");
        }
    }

    #[test]
    fn test_not_found_is_distinct_from_service_error() {
        let e = ZoinksError::RecordNotFound("32TR4H94".to_string());
        assert_eq!(e.kind(), ErrorKind::RecordNotFound);
        assert_eq!(e.to_string(), "Record not found: 32TR4H94");
    }
}
