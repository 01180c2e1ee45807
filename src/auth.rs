//! Token acquisition and refresh flows.
//!
//! Three grant strategies are supported, modeled as a closed enum so decode
//! and dispatch sites match exhaustively:
//!
//! - [`AuthFlow::ClientCredentials`]: app-only access, no user context,
//!   tokens cannot be refreshed.
//! - [`AuthFlow::AuthorizationCode`]: interactive user consent through an
//!   [`AuthorizationPrompt`] collaborator, refreshable tokens.
//! - [`AuthFlow::AuthorizationCodeWithPkce`]: refresh path for installed
//!   apps that must not ship a client secret. The interactive exchange is
//!   an extension point and currently returns a fixed error; resume from a
//!   stored token with [`crate::CatalogClient::with_token`] instead.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{AuthError, CatalogClientError, Result};

/// Application credentials issued by the service dashboard.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// The secret must not leak through logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A bearer token as held by the client.
///
/// Replaced wholesale on refresh; individual fields are never mutated.
/// `expires_in`/`obtained_at` are advisory: nothing in the client refreshes
/// on a timer, callers decide when to call refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Validity window in seconds, counted from `obtained_at`.
    pub expires_in: u64,
    pub refresh_token: Option<String>,
    /// Granted scopes, parsed from the wire's space-delimited string.
    pub scopes: Vec<String>,
    pub obtained_at: DateTime<Utc>,
}

impl Token {
    fn from_wire(wire: WireTokenResponse) -> Self {
        let scopes = wire
            .scope
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Self {
            access_token: wire.access_token,
            token_type: wire.token_type,
            expires_in: wire.expires_in,
            refresh_token: wire.refresh_token,
            scopes,
            obtained_at: Utc::now(),
        }
    }

    /// Instant after which the service will reject the access token.
    ///
    /// `expires_in` comes off the wire; a window too large for the
    /// calendar saturates at the far future instead of panicking.
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.expires_in)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .and_then(|window| self.obtained_at.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the advisory validity window has elapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }
}

/// Token endpoint success body.
#[derive(Debug, Deserialize)]
struct WireTokenResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
    refresh_token: Option<String>,
    scope: Option<String>,
}

/// Token endpoint failure body.
#[derive(Debug, Deserialize)]
struct WireAuthError {
    error: String,
    error_description: Option<String>,
}

/// External collaborator for the interactive authorization-code flow.
///
/// Given the authorization URL, it must get the resource owner through the
/// consent page (local HTTP listener, manual paste, whatever fits the host
/// application) and return the raw redirect callback URL.
#[async_trait]
pub trait AuthorizationPrompt: Send + Sync {
    async fn authorize(&self, authorize_url: &str) -> Result<String>;
}

/// Strategy for obtaining and refreshing bearer tokens.
#[derive(Clone)]
pub enum AuthFlow {
    /// App-only access. Cannot refresh.
    ClientCredentials { credentials: Credentials },
    /// Interactive user consent; produces a refreshable token.
    AuthorizationCode {
        credentials: Credentials,
        redirect_uri: String,
        scopes: Vec<String>,
        prompt: Arc<dyn AuthorizationPrompt>,
    },
    /// Proof-key variant for installed apps; refresh sends `client_id` in
    /// the body instead of a Basic header.
    AuthorizationCodeWithPkce {
        credentials: Credentials,
        redirect_uri: String,
        scopes: Vec<String>,
    },
}

impl std::fmt::Debug for AuthFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthFlow::ClientCredentials { credentials } => f
                .debug_struct("ClientCredentials")
                .field("client_id", &credentials.client_id)
                .finish(),
            AuthFlow::AuthorizationCode {
                credentials,
                redirect_uri,
                scopes,
                ..
            } => f
                .debug_struct("AuthorizationCode")
                .field("client_id", &credentials.client_id)
                .field("redirect_uri", redirect_uri)
                .field("scopes", scopes)
                .finish(),
            AuthFlow::AuthorizationCodeWithPkce {
                credentials,
                redirect_uri,
                scopes,
            } => f
                .debug_struct("AuthorizationCodeWithPkce")
                .field("client_id", &credentials.client_id)
                .field("redirect_uri", redirect_uri)
                .field("scopes", scopes)
                .finish(),
        }
    }
}

impl AuthFlow {
    /// App-only flow from a credential pair.
    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        AuthFlow::ClientCredentials {
            credentials: Credentials::new(client_id, client_secret),
        }
    }

    /// Interactive flow; `prompt` captures the redirect callback.
    pub fn authorization_code(
        credentials: Credentials,
        redirect_uri: impl Into<String>,
        scopes: Vec<String>,
        prompt: Arc<dyn AuthorizationPrompt>,
    ) -> Self {
        AuthFlow::AuthorizationCode {
            credentials,
            redirect_uri: redirect_uri.into(),
            scopes,
            prompt,
        }
    }

    /// Proof-key flow for installed apps.
    pub fn authorization_code_with_pkce(
        credentials: Credentials,
        redirect_uri: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        AuthFlow::AuthorizationCodeWithPkce {
            credentials,
            redirect_uri: redirect_uri.into(),
            scopes,
        }
    }

    /// Obtain a fresh token from scratch.
    pub async fn authenticate(&self, http: &Client, config: &ClientConfig) -> Result<Token> {
        match self {
            AuthFlow::ClientCredentials { credentials } => {
                token_request(
                    http,
                    &config.token_url,
                    Some(credentials),
                    &[("grant_type", "client_credentials")],
                )
                .await
            }
            AuthFlow::AuthorizationCode {
                credentials,
                redirect_uri,
                scopes,
                prompt,
            } => {
                // Fresh anti-CSRF nonce per attempt.
                let state = Uuid::new_v4().simple().to_string();
                let authorize_url = build_authorize_url(
                    &config.authorize_url,
                    &credentials.client_id,
                    redirect_uri,
                    scopes,
                    &state,
                )?;

                debug!(url = %authorize_url, "Directing resource owner to consent page");
                let callback_url = prompt.authorize(authorize_url.as_str()).await?;
                let code = parse_callback(&callback_url, &state)?;

                token_request(
                    http,
                    &config.token_url,
                    Some(credentials),
                    &[
                        ("grant_type", "authorization_code"),
                        ("code", &code),
                        ("redirect_uri", redirect_uri),
                    ],
                )
                .await
            }
            AuthFlow::AuthorizationCodeWithPkce { .. } => Err(CatalogClientError::Auth(
                AuthError::new(
                    "unsupported_flow",
                    Some(
                        "interactive proof-key authorization is not implemented; \
                         resume from a stored token instead"
                            .to_string(),
                    ),
                ),
            )),
        }
    }

    /// Exchange a refresh token for a fresh token.
    pub async fn request_refreshed_token(
        &self,
        http: &Client,
        config: &ClientConfig,
        refresh_token: &str,
    ) -> Result<Token> {
        match self {
            // Structural invariant of the flow, not a transient failure:
            // the grant carries no refresh token, so there is nothing to
            // exchange and no request is made.
            AuthFlow::ClientCredentials { .. } => Err(CatalogClientError::Auth(AuthError::new(
                "unsupported_grant_type",
                Some("client-credentials tokens cannot be refreshed".to_string()),
            ))),
            AuthFlow::AuthorizationCode { credentials, .. } => {
                token_request(
                    http,
                    &config.token_url,
                    Some(credentials),
                    &[
                        ("grant_type", "refresh_token"),
                        ("refresh_token", refresh_token),
                    ],
                )
                .await
            }
            // No Basic header: installed apps identify with the bare
            // client_id in the body.
            AuthFlow::AuthorizationCodeWithPkce { credentials, .. } => {
                token_request(
                    http,
                    &config.token_url,
                    None,
                    &[
                        ("grant_type", "refresh_token"),
                        ("refresh_token", refresh_token),
                        ("client_id", &credentials.client_id),
                    ],
                )
                .await
            }
        }
    }
}

fn build_authorize_url(
    authorize_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[String],
    state: &str,
) -> Result<Url> {
    let mut params = vec![
        ("response_type", "code".to_string()),
        ("client_id", client_id.to_string()),
        ("redirect_uri", redirect_uri.to_string()),
        ("state", state.to_string()),
    ];
    if !scopes.is_empty() {
        params.push(("scope", scopes.join(" ")));
    }

    Url::parse_with_params(authorize_url, &params)
        .map_err(|e| CatalogClientError::InvalidUrl(format!("authorize URL: {e}")))
}

/// Extract the authorization code from the redirect callback URL.
///
/// Validation order matters: the state nonce is checked before anything
/// else, and a mismatch aborts without ever contacting the token endpoint.
fn parse_callback(callback_url: &str, expected_state: &str) -> Result<String> {
    let url = Url::parse(callback_url).map_err(|e| {
        CatalogClientError::Auth(AuthError::new(
            "invalid_callback",
            Some(format!("malformed redirect callback URL: {e}")),
        ))
    })?;

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    let received_state = state.unwrap_or_default();
    if received_state != expected_state {
        warn!(
            expected = %expected_state,
            received = %received_state,
            "Authorization callback carried the wrong state"
        );
        return Err(CatalogClientError::Auth(AuthError::new(
            "wrong_state",
            Some(format!(
                "expected state '{expected_state}', received '{received_state}'"
            )),
        )));
    }

    if let Some(error) = error {
        return Err(CatalogClientError::Auth(AuthError::new(error, None)));
    }

    code.ok_or_else(|| {
        CatalogClientError::Auth(AuthError::new(
            "missing_code",
            Some("redirect callback carried no authorization code".to_string()),
        ))
    })
}

/// POST to the token endpoint and interpret the response.
///
/// Network failures and non-200 responses are both normalized into the
/// `Auth` error channel; the caller never sees a raw transport error here.
async fn token_request(
    http: &Client,
    token_url: &str,
    basic: Option<&Credentials>,
    form: &[(&str, &str)],
) -> Result<Token> {
    debug!(url = %token_url, grant_type = form[0].1, "Requesting token");

    let mut request = http.post(token_url).form(form);
    if let Some(credentials) = basic {
        request = request.header(header::AUTHORIZATION, basic_auth_header(credentials));
    }

    let response = request.send().await.map_err(|e| {
        CatalogClientError::Auth(AuthError::new("transport_error", Some(e.to_string())))
    })?;

    let status = response.status();
    if status == StatusCode::OK {
        let body = response.text().await.map_err(|e| {
            CatalogClientError::Auth(AuthError::new("transport_error", Some(e.to_string())))
        })?;
        let wire: WireTokenResponse = serde_json::from_str(&body).map_err(|e| {
            CatalogClientError::Parse(format!("failed to parse token response: {e}"))
        })?;

        info!(grant_type = form[0].1, "Token obtained");
        Ok(Token::from_wire(wire))
    } else {
        let body = response.text().await.unwrap_or_default();
        let auth_error = serde_json::from_str::<WireAuthError>(&body)
            .map(|wire| AuthError::new(wire.error, wire.error_description))
            .unwrap_or_else(|_| AuthError::new(format!("http_{}", status.as_u16()), Some(body)));

        warn!(status = %status, error = %auth_error, "Token request failed");
        Err(CatalogClientError::Auth(auth_error))
    }
}

fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", BASE64.encode(pair))
}
