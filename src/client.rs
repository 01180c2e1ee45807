//! Main catalog client.

use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::albums::AlbumsClient;
use crate::artists::ArtistsClient;
use crate::auth::{AuthFlow, Token};
use crate::config::ClientConfig;
use crate::error::{CatalogClientError, Result};
use crate::playlists::PlaylistsClient;
use crate::search::SearchClient;
use crate::shows::ShowsClient;
use crate::tracks::TracksClient;
use crate::users::UsersClient;

/// Client for the music catalog Web API.
///
/// Construction runs the configured auth flow and fails fast if it does
/// not produce a token; a client value always holds a valid (possibly
/// since-expired) token. The token is the only mutable state and is only
/// ever replaced wholesale by [`CatalogClient::refresh`].
///
/// # Example
///
/// ```ignore
/// use sonata_client::{AuthFlow, CatalogClient, ClientConfig};
///
/// let flow = AuthFlow::client_credentials("client-id", "client-secret");
/// let client = CatalogClient::connect(ClientConfig::new(), flow).await?;
///
/// let album = client.albums().get("0sNOF9WDwhWunNAHPD3Baj", Some("US")).await?;
/// println!("{} ({:?})", album.name, album.kind);
/// ```
pub struct CatalogClient {
    http: Client,
    config: ClientConfig,
    flow: AuthFlow,
    token: RwLock<Token>,
}

impl CatalogClient {
    /// Authenticate with the given flow and build a client.
    ///
    /// Fails fast with the underlying `Auth` error if authentication does
    /// not succeed; no client is produced without a token.
    pub async fn connect(config: ClientConfig, flow: AuthFlow) -> Result<Self> {
        let config = config.normalized()?;
        let http = build_http_client()?;

        let token = flow.authenticate(&http, &config).await?;
        info!(scopes = ?token.scopes, "Authenticated with catalog service");

        Ok(Self {
            http,
            config,
            flow,
            token: RwLock::new(token),
        })
    }

    /// Build a client around an existing token (e.g. restored by the host
    /// application). No network call is made; this is also how a proof-key
    /// client becomes usable, since its interactive exchange is not
    /// implemented.
    pub fn with_token(config: ClientConfig, flow: AuthFlow, token: Token) -> Result<Self> {
        let config = config.normalized()?;
        let http = build_http_client()?;

        Ok(Self {
            http,
            config,
            flow,
            token: RwLock::new(token),
        })
    }

    /// Snapshot of the currently held token.
    pub async fn token(&self) -> Token {
        self.token.read().await.clone()
    }

    /// Exchange the held refresh token for a fresh token and replace the
    /// held token wholesale.
    ///
    /// A refresh response that omits a new refresh token keeps the previous
    /// one, so a refreshable client stays refreshable. Nothing calls this
    /// automatically; expiry is advisory and the caller decides when to
    /// refresh.
    pub async fn refresh(&self) -> Result<Token> {
        let refresh_token = self.token.read().await.refresh_token.clone().ok_or_else(|| {
            CatalogClientError::Auth(crate::error::AuthError::new(
                "invalid_request",
                Some("no refresh token held by this client".to_string()),
            ))
        })?;

        let mut token = self
            .flow
            .request_refreshed_token(&self.http, &self.config, &refresh_token)
            .await?;
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token);
        }

        let mut guard = self.token.write().await;
        *guard = token.clone();
        info!("Token refreshed");

        Ok(token)
    }

    /// Album operations.
    pub fn albums(&self) -> AlbumsClient<'_> {
        AlbumsClient::new(self)
    }

    /// Artist operations.
    pub fn artists(&self) -> ArtistsClient<'_> {
        ArtistsClient::new(self)
    }

    /// Track operations.
    pub fn tracks(&self) -> TracksClient<'_> {
        TracksClient::new(self)
    }

    /// Playlist operations.
    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(self)
    }

    /// Show and episode operations.
    pub fn shows(&self) -> ShowsClient<'_> {
        ShowsClient::new(self)
    }

    /// User profile and follow operations.
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(self)
    }

    /// Catalog search.
    pub fn search(&self) -> SearchClient<'_> {
        SearchClient::new(self)
    }

    // ------------------------------------------------------------------
    // Request plumbing shared by all endpoint bindings
    // ------------------------------------------------------------------

    /// GET a resource, expecting 200 with a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        self.request_json(Method::GET, path, query, None, StatusCode::OK)
            .await
    }

    /// Dispatch a request and parse the body of the designated success
    /// status; every other status goes through the error envelope.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<serde_json::Value>,
        expected: StatusCode,
    ) -> Result<T> {
        let response = self.dispatch(method, path, query, body).await?;

        let status = response.status();
        if status == expected {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(|e| {
                CatalogClientError::Parse(format!("failed to parse response for {path}: {e}"))
            })
        } else {
            Err(error_from_response(status, response.text().await.unwrap_or_default()))
        }
    }

    /// Dispatch a request whose success body carries nothing of interest.
    pub(crate) async fn request_empty(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<serde_json::Value>,
        expected: StatusCode,
    ) -> Result<()> {
        let response = self.dispatch(method, path, query, body).await?;

        let status = response.status();
        if status == expected {
            Ok(())
        } else {
            Err(error_from_response(status, response.text().await.unwrap_or_default()))
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!(method = %method, url = %url, "Dispatching catalog request");

        let access_token = self.token.read().await.access_token.clone();
        let mut request = self.http.request(method, &url).bearer_auth(access_token);
        if !query.is_empty() {
            request = request.query(query.as_slice());
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogClientError::Unreachable(e.to_string())
            } else {
                CatalogClientError::Request(e)
            }
        })
    }
}

fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!(
            "sonata-client/{}",
            env!("CARGO_PKG_VERSION")
        ))
        .default_headers({
            let mut headers = header::HeaderMap::new();
            headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
            headers
        })
        .build()
        .map_err(CatalogClientError::Request)
}

/// Parse the service's error envelope, which is either nested under an
/// `error` key (catalog endpoints) or flat (some endpoint families). The
/// envelope is parsed even on failure; the raw body is the last resort.
fn error_from_response(status: StatusCode, body: String) -> CatalogClientError {
    #[derive(Deserialize)]
    struct WireApiError {
        status: Option<u16>,
        message: Option<String>,
    }

    #[derive(Deserialize)]
    struct Nested {
        error: WireApiError,
    }

    let parsed = serde_json::from_str::<Nested>(&body)
        .map(|nested| nested.error)
        .or_else(|_| serde_json::from_str::<WireApiError>(&body))
        // A body that deserialized without filling either field (e.g. an
        // accounts-style `{"error": "..."}` string) carries no envelope.
        .ok()
        .filter(|wire| wire.status.is_some() || wire.message.is_some());

    match parsed {
        Some(wire) => CatalogClientError::Api {
            status: wire.status.unwrap_or(status.as_u16()),
            message: wire.message.unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            }),
        },
        None => CatalogClientError::Api {
            status: status.as_u16(),
            message: if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body
            },
        },
    }
}

// ----------------------------------------------------------------------
// Query construction and local preconditions
// ----------------------------------------------------------------------

/// Query-string builder. Optional parameters contribute a pair only when
/// the caller supplied a non-empty value; nothing is ever sent as an empty
/// string.
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, value.to_string()));
    }

    pub fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.0.push((key, value));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Page size bounds shared by every paged listing.
pub(crate) fn check_limit(limit: Option<u32>) -> Result<()> {
    if let Some(limit) = limit {
        if !(1..=50).contains(&limit) {
            return Err(CatalogClientError::InvalidRequest(format!(
                "limit must be between 1 and 50, got {limit}"
            )));
        }
    }
    Ok(())
}

/// Batch id-list bounds: non-empty and capped per resource.
pub(crate) fn check_ids(ids: &[&str], max: usize, resource: &str) -> Result<()> {
    if ids.is_empty() {
        return Err(CatalogClientError::InvalidRequest(format!(
            "at least one {resource} id is required"
        )));
    }
    if ids.len() > max {
        return Err(CatalogClientError::InvalidRequest(format!(
            "at most {max} {resource} ids per request, got {}",
            ids.len()
        )));
    }
    Ok(())
}
