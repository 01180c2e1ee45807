//! Client configuration: service endpoints.

use crate::error::{CatalogClientError, Result};

const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Endpoints the client talks to.
///
/// The defaults point at the public Spotify Web API; tests override them
/// with a mock server URI.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for catalog resources (e.g. "https://api.spotify.com/v1")
    pub api_base_url: String,
    /// Token endpoint for all grant types
    pub token_url: String,
    /// Authorization endpoint for the interactive code flow
    pub authorize_url: String,
}

impl ClientConfig {
    /// Config pointing at the public service endpoints.
    pub fn new() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
        }
    }

    /// Replace the catalog base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Replace the token endpoint URL.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Replace the authorization endpoint URL.
    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    /// Validate and normalize all endpoint URLs.
    pub(crate) fn normalized(self) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_url(&self.api_base_url)?,
            token_url: normalize_url(&self.token_url)?,
            authorize_url: normalize_url(&self.authorize_url)?,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CatalogClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_service() {
        let config = ClientConfig::new();
        assert!(config.api_base_url.starts_with("https://"));
        assert!(config.token_url.contains("/api/token"));
    }

    #[test]
    fn normalization_trims_trailing_slashes() {
        let config = ClientConfig::new()
            .with_api_base_url("http://localhost:8080/v1///")
            .normalized()
            .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn empty_url_rejected() {
        let result = ClientConfig::new().with_token_url("").normalized();
        assert!(matches!(result, Err(CatalogClientError::InvalidUrl(_))));
    }

    #[test]
    fn scheme_required() {
        let result = ClientConfig::new()
            .with_api_base_url("example.com/v1")
            .normalized();
        assert!(matches!(result, Err(CatalogClientError::InvalidUrl(_))));
    }
}
