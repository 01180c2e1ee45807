//! Error types for the catalog client.

use thiserror::Error;

/// Error payload returned by the accounts service when obtaining or
/// refreshing a token fails.
///
/// `error` is the short machine-readable code from the wire
/// (e.g. `invalid_client`, `invalid_grant`); `description` is the optional
/// human-readable text that accompanies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub error: String,
    pub description: Option<String>,
}

impl AuthError {
    pub fn new(error: impl Into<String>, description: Option<String>) -> Self {
        Self {
            error: error.into(),
            description,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Errors that can occur when interacting with the catalog service.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service is offline or unreachable
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    /// Token acquisition or refresh failed
    #[error("Authentication failed: {0}")]
    Auth(AuthError),

    /// Catalog service rejected an authenticated request
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Caller-side precondition violated; no request was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid base URL in the client configuration
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;
