//! Artist endpoint bindings.

use serde::Deserialize;

use crate::client::{check_ids, check_limit, CatalogClient, Query};
use crate::error::{CatalogClientError, Result};
use crate::model::{Album, Artist, Page, Track, WireAlbum, WireArtist, WirePage, WireTrack};

/// Batch lookups are capped by the service at 50 artist ids per request.
pub const MAX_ARTIST_IDS: usize = 50;

/// Artist operations, obtained from [`CatalogClient::artists`].
pub struct ArtistsClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> ArtistsClient<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Fetch a single artist by id.
    pub async fn get(&self, id: &str) -> Result<Artist> {
        let wire: WireArtist = self
            .client
            .get_json(&format!("/artists/{id}"), &Query::new())
            .await?;
        Ok(Artist::from(wire))
    }

    /// Fetch up to [`MAX_ARTIST_IDS`] artists in one request, preserving
    /// request order with `None` for unknown ids.
    pub async fn get_many(&self, ids: &[&str]) -> Result<Vec<Option<Artist>>> {
        check_ids(ids, MAX_ARTIST_IDS, "artist")?;

        let mut query = Query::new();
        query.push("ids", ids.join(","));

        #[derive(Deserialize)]
        struct Wrapper {
            artists: Vec<Option<WireArtist>>,
        }

        let wire: Wrapper = self.client.get_json("/artists", &query).await?;
        Ok(wire
            .artists
            .into_iter()
            .map(|artist| artist.map(Artist::from))
            .collect())
    }

    /// One page of an artist's albums.
    pub async fn albums(
        &self,
        id: &str,
        market: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Page<Album>> {
        check_limit(limit)?;

        let mut query = Query::new();
        query.push_opt("market", market);
        query.push_opt("limit", limit);
        query.push_opt("offset", offset);

        let wire: WirePage<WireAlbum> = self
            .client
            .get_json(&format!("/artists/{id}/albums"), &query)
            .await?;
        Ok(wire.map_into())
    }

    /// An artist's top tracks. `market` is required by the service.
    pub async fn top_tracks(&self, id: &str, market: &str) -> Result<Vec<Track>> {
        if market.is_empty() {
            return Err(CatalogClientError::InvalidRequest(
                "market is required for top tracks".to_string(),
            ));
        }

        let mut query = Query::new();
        query.push("market", market);

        // Bare-array envelope under a `tracks` key.
        #[derive(Deserialize)]
        struct Wrapper {
            tracks: Vec<WireTrack>,
        }

        let wire: Wrapper = self
            .client
            .get_json(&format!("/artists/{id}/top-tracks"), &query)
            .await?;
        Ok(wire.tracks.into_iter().map(Track::from).collect())
    }
}
