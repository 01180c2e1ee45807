//! Show and episode endpoint bindings.

use crate::client::{check_limit, CatalogClient, Query};
use crate::error::Result;
use crate::model::{Episode, Page, Show, WireEpisode, WirePage, WireShow};

/// Show operations, obtained from [`CatalogClient::shows`].
pub struct ShowsClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> ShowsClient<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Fetch a show by id.
    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Show> {
        let mut query = Query::new();
        query.push_opt("market", market);

        let wire: WireShow = self.client.get_json(&format!("/shows/{id}"), &query).await?;
        Ok(Show::from(wire))
    }

    /// One page of a show's episodes.
    pub async fn episodes(
        &self,
        id: &str,
        market: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Page<Episode>> {
        check_limit(limit)?;

        let mut query = Query::new();
        query.push_opt("market", market);
        query.push_opt("limit", limit);
        query.push_opt("offset", offset);

        let wire: WirePage<WireEpisode> = self
            .client
            .get_json(&format!("/shows/{id}/episodes"), &query)
            .await?;
        Ok(wire.map_into())
    }

    /// Fetch a single episode by id.
    pub async fn episode(&self, id: &str, market: Option<&str>) -> Result<Episode> {
        let mut query = Query::new();
        query.push_opt("market", market);

        let wire: WireEpisode = self
            .client
            .get_json(&format!("/episodes/{id}"), &query)
            .await?;
        Ok(Episode::from(wire))
    }
}
