//! Playlist endpoint bindings, including the write operations.

use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::client::{check_limit, CatalogClient, Query};
use crate::error::{CatalogClientError, Result};
use crate::model::{Page, Playlist, PlaylistItem, WirePage, WirePlaylist, WirePlaylistItem};

/// The service accepts at most 100 item URIs per add request.
pub const MAX_PLAYLIST_ITEM_URIS: usize = 100;

/// Optional fields for [`PlaylistsClient::create`]. Unset fields are left
/// out of the request body entirely.
#[derive(Debug, Clone, Default)]
pub struct CreatePlaylistOptions {
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
}

/// Fields to change via [`PlaylistsClient::change_details`]. At least one
/// must be set.
#[derive(Debug, Clone, Default)]
pub struct PlaylistDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
}

/// Playlist operations, obtained from [`CatalogClient::playlists`].
pub struct PlaylistsClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Fetch a playlist by id.
    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Playlist> {
        let mut query = Query::new();
        query.push_opt("market", market);

        let wire: WirePlaylist = self
            .client
            .get_json(&format!("/playlists/{id}"), &query)
            .await?;
        Ok(Playlist::from(wire))
    }

    /// One page of a playlist's items.
    pub async fn items(
        &self,
        id: &str,
        market: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Page<PlaylistItem>> {
        check_limit(limit)?;

        let mut query = Query::new();
        query.push_opt("market", market);
        query.push_opt("limit", limit);
        query.push_opt("offset", offset);

        let wire: WirePage<WirePlaylistItem> = self
            .client
            .get_json(&format!("/playlists/{id}/tracks"), &query)
            .await?;
        Ok(wire.map_into())
    }

    /// Create a playlist for a user. The service answers 201 with the new
    /// playlist.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        options: &CreatePlaylistOptions,
    ) -> Result<Playlist> {
        if name.is_empty() {
            return Err(CatalogClientError::InvalidRequest(
                "playlist name must not be empty".to_string(),
            ));
        }

        let mut body = serde_json::json!({ "name": name });
        if let Some(description) = &options.description {
            body["description"] = description.clone().into();
        }
        if let Some(public) = options.public {
            body["public"] = public.into();
        }
        if let Some(collaborative) = options.collaborative {
            body["collaborative"] = collaborative.into();
        }

        let wire: WirePlaylist = self
            .client
            .request_json(
                Method::POST,
                &format!("/users/{user_id}/playlists"),
                &Query::new(),
                Some(body),
                StatusCode::CREATED,
            )
            .await?;
        Ok(Playlist::from(wire))
    }

    /// Append up to [`MAX_PLAYLIST_ITEM_URIS`] items. Answers 201 with the
    /// new snapshot id.
    pub async fn add_items(
        &self,
        id: &str,
        uris: &[&str],
        position: Option<u32>,
    ) -> Result<String> {
        if uris.is_empty() {
            return Err(CatalogClientError::InvalidRequest(
                "at least one item uri is required".to_string(),
            ));
        }
        if uris.len() > MAX_PLAYLIST_ITEM_URIS {
            return Err(CatalogClientError::InvalidRequest(format!(
                "at most {MAX_PLAYLIST_ITEM_URIS} item uris per request, got {}",
                uris.len()
            )));
        }

        let mut body = serde_json::json!({ "uris": uris });
        if let Some(position) = position {
            body["position"] = position.into();
        }

        #[derive(Deserialize)]
        struct Wrapper {
            snapshot_id: String,
        }

        let wire: Wrapper = self
            .client
            .request_json(
                Method::POST,
                &format!("/playlists/{id}/tracks"),
                &Query::new(),
                Some(body),
                StatusCode::CREATED,
            )
            .await?;
        Ok(wire.snapshot_id)
    }

    /// Change a playlist's details. The service answers 200 with an empty
    /// body.
    pub async fn change_details(&self, id: &str, details: &PlaylistDetails) -> Result<()> {
        let mut body = serde_json::Map::new();
        if let Some(name) = &details.name {
            body.insert("name".to_string(), name.clone().into());
        }
        if let Some(description) = &details.description {
            body.insert("description".to_string(), description.clone().into());
        }
        if let Some(public) = details.public {
            body.insert("public".to_string(), public.into());
        }
        if let Some(collaborative) = details.collaborative {
            body.insert("collaborative".to_string(), collaborative.into());
        }

        if body.is_empty() {
            return Err(CatalogClientError::InvalidRequest(
                "at least one playlist detail must be set".to_string(),
            ));
        }

        self.client
            .request_empty(
                Method::PUT,
                &format!("/playlists/{id}"),
                &Query::new(),
                Some(serde_json::Value::Object(body)),
                StatusCode::OK,
            )
            .await
    }
}
