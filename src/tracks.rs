//! Track endpoint bindings.

use serde::Deserialize;

use crate::client::{check_ids, CatalogClient, Query};
use crate::error::Result;
use crate::model::{Track, WireTrack};

/// Batch lookups are capped by the service at 50 track ids per request.
pub const MAX_TRACK_IDS: usize = 50;

/// Track operations, obtained from [`CatalogClient::tracks`].
pub struct TracksClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> TracksClient<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Fetch a single track by id.
    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Track> {
        let mut query = Query::new();
        query.push_opt("market", market);

        let wire: WireTrack = self.client.get_json(&format!("/tracks/{id}"), &query).await?;
        Ok(Track::from(wire))
    }

    /// Fetch up to [`MAX_TRACK_IDS`] tracks in one request, preserving
    /// request order with `None` for unknown ids.
    pub async fn get_many(&self, ids: &[&str], market: Option<&str>) -> Result<Vec<Option<Track>>> {
        check_ids(ids, MAX_TRACK_IDS, "track")?;

        let mut query = Query::new();
        query.push("ids", ids.join(","));
        query.push_opt("market", market);

        #[derive(Deserialize)]
        struct Wrapper {
            tracks: Vec<Option<WireTrack>>,
        }

        let wire: Wrapper = self.client.get_json("/tracks", &query).await?;
        Ok(wire
            .tracks
            .into_iter()
            .map(|track| track.map(Track::from))
            .collect())
    }
}
