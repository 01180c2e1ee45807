//! Album endpoint bindings.

use serde::Deserialize;

use crate::client::{check_ids, check_limit, CatalogClient, Query};
use crate::error::Result;
use crate::model::{
    Album, Page, SavedAlbum, Track, WireAlbum, WirePage, WireSavedAlbum, WireTrack,
};

/// Batch lookups are capped by the service at 20 album ids per request.
pub const MAX_ALBUM_IDS: usize = 20;

/// Album operations, obtained from [`CatalogClient::albums`].
pub struct AlbumsClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> AlbumsClient<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Fetch a single album by id.
    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Album> {
        let mut query = Query::new();
        query.push_opt("market", market);

        let wire: WireAlbum = self.client.get_json(&format!("/albums/{id}"), &query).await?;
        Ok(Album::from(wire))
    }

    /// Fetch up to [`MAX_ALBUM_IDS`] albums in one request.
    ///
    /// The result preserves request order; an id the catalog does not
    /// recognize yields `None` at its position rather than being dropped.
    pub async fn get_many(&self, ids: &[&str], market: Option<&str>) -> Result<Vec<Option<Album>>> {
        check_ids(ids, MAX_ALBUM_IDS, "album")?;

        let mut query = Query::new();
        query.push("ids", ids.join(","));
        query.push_opt("market", market);

        // Batch responses wrap the list under an `albums` key, with null
        // placeholders for unknown ids.
        #[derive(Deserialize)]
        struct Wrapper {
            albums: Vec<Option<WireAlbum>>,
        }

        let wire: Wrapper = self.client.get_json("/albums", &query).await?;
        Ok(wire
            .albums
            .into_iter()
            .map(|album| album.map(Album::from))
            .collect())
    }

    /// One page of an album's tracks; the caller drives pagination.
    pub async fn tracks(
        &self,
        id: &str,
        market: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Page<Track>> {
        check_limit(limit)?;

        let mut query = Query::new();
        query.push_opt("market", market);
        query.push_opt("limit", limit);
        query.push_opt("offset", offset);

        let wire: WirePage<WireTrack> = self
            .client
            .get_json(&format!("/albums/{id}/tracks"), &query)
            .await?;
        Ok(wire.map_into())
    }

    /// One page of the current user's saved albums.
    pub async fn saved(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Page<SavedAlbum>> {
        check_limit(limit)?;

        let mut query = Query::new();
        query.push_opt("limit", limit);
        query.push_opt("offset", offset);

        let wire: WirePage<WireSavedAlbum> = self.client.get_json("/me/albums", &query).await?;
        Ok(wire.map_into())
    }
}
