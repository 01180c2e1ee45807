//! Catalog search with concurrent multi-kind fan-out.
//!
//! The service only answers one object category per request, so a search
//! across several kinds is issued as one sub-request per kind. The
//! sub-requests run concurrently and are joined before returning; the
//! first failing sub-request fails the whole composite call.

use futures_util::future::try_join_all;
use serde::Deserialize;

use crate::client::{check_limit, CatalogClient, Query};
use crate::error::{CatalogClientError, Result};
use crate::model::{
    Album, Artist, Episode, Page, Playlist, SearchKind, Show, Track, WireAlbum, WireArtist,
    WireEpisode, WirePage, WirePlaylist, WireShow, WireTrack,
};

/// Optional search parameters. Unset fields are not sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions<'a> {
    pub market: Option<&'a str>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Results of a multi-kind search, one optional page per requested kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub albums: Option<Page<Album>>,
    pub artists: Option<Page<Artist>>,
    pub tracks: Option<Page<Track>>,
    pub playlists: Option<Page<Playlist>>,
    pub shows: Option<Page<Show>>,
    pub episodes: Option<Page<Episode>>,
}

/// One sub-request's page, tagged by kind.
enum KindPage {
    Albums(Page<Album>),
    Artists(Page<Artist>),
    Tracks(Page<Track>),
    Playlists(Page<Playlist>),
    Shows(Page<Show>),
    Episodes(Page<Episode>),
}

/// Search operations, obtained from [`CatalogClient::search`].
pub struct SearchClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> SearchClient<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Search the catalog across the given kinds.
    ///
    /// One request per kind, dispatched concurrently and joined before
    /// returning. Sub-requests share nothing but read-only access to the
    /// held token; there is no cancellation once dispatched.
    pub async fn query(
        &self,
        query: &str,
        kinds: &[SearchKind],
        options: &SearchOptions<'_>,
    ) -> Result<SearchResults> {
        if query.is_empty() {
            return Err(CatalogClientError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }
        if kinds.is_empty() {
            return Err(CatalogClientError::InvalidRequest(
                "at least one search kind is required".to_string(),
            ));
        }
        check_limit(options.limit)?;

        let pages = try_join_all(
            kinds
                .iter()
                .map(|&kind| self.query_kind(query, kind, options)),
        )
        .await?;

        let mut results = SearchResults::default();
        for page in pages {
            match page {
                KindPage::Albums(page) => results.albums = Some(page),
                KindPage::Artists(page) => results.artists = Some(page),
                KindPage::Tracks(page) => results.tracks = Some(page),
                KindPage::Playlists(page) => results.playlists = Some(page),
                KindPage::Shows(page) => results.shows = Some(page),
                KindPage::Episodes(page) => results.episodes = Some(page),
            }
        }
        Ok(results)
    }

    async fn query_kind(
        &self,
        query: &str,
        kind: SearchKind,
        options: &SearchOptions<'_>,
    ) -> Result<KindPage> {
        let mut params = Query::new();
        params.push("q", query);
        params.push("type", kind.as_str());
        params.push_opt("market", options.market);
        params.push_opt("limit", options.limit);
        params.push_opt("offset", options.offset);

        // Each kind's payload is wrapped under its own plural key.
        macro_rules! fetch {
            ($field:ident, $wire:ty, $variant:ident) => {{
                #[derive(Deserialize)]
                struct Wrapper {
                    $field: WirePage<$wire>,
                }
                let wire: Wrapper = self.client.get_json("/search", &params).await?;
                KindPage::$variant(wire.$field.map_into())
            }};
        }

        Ok(match kind {
            SearchKind::Album => fetch!(albums, WireAlbum, Albums),
            SearchKind::Artist => fetch!(artists, WireArtist, Artists),
            SearchKind::Track => fetch!(tracks, WireTrack, Tracks),
            SearchKind::Playlist => fetch!(playlists, WirePlaylist, Playlists),
            SearchKind::Show => fetch!(shows, WireShow, Shows),
            SearchKind::Episode => fetch!(episodes, WireEpisode, Episodes),
        })
    }
}
