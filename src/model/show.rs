//! Show and episode entities.

use std::time::Duration;

use serde::Deserialize;

use super::{Image, Page, ReleaseDate, ReleaseDatePrecision, WirePage};

/// Show as sent on the wire. The embedded `episodes` page only appears in
/// the full representation.
#[derive(Debug, Clone, Deserialize)]
pub struct WireShow {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub publisher: String,
    pub description: Option<String>,
    pub images: Vec<Image>,
    pub total_episodes: Option<u32>,
    pub explicit: bool,
    pub episodes: Option<WirePage<WireEpisode>>,
}

/// Episode as sent on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireEpisode {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub explicit: bool,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub release_date_precision: Option<ReleaseDatePrecision>,
    pub images: Option<Vec<Image>>,
}

/// Mapped show.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub publisher: String,
    pub description: Option<String>,
    pub images: Vec<Image>,
    pub total_episodes: Option<u32>,
    pub explicit: bool,
    pub episodes: Option<Page<Episode>>,
}

/// Mapped episode.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration: Duration,
    pub explicit: bool,
    pub description: Option<String>,
    pub release_date: Option<ReleaseDate>,
    pub images: Option<Vec<Image>>,
}

impl From<WireShow> for Show {
    fn from(wire: WireShow) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            uri: wire.uri,
            publisher: wire.publisher,
            description: wire.description,
            images: wire.images,
            total_episodes: wire.total_episodes,
            explicit: wire.explicit,
            episodes: wire.episodes.map(WirePage::map_into),
        }
    }
}

impl From<WireEpisode> for Episode {
    fn from(wire: WireEpisode) -> Self {
        let release_date = match (wire.release_date, wire.release_date_precision) {
            (Some(date), Some(precision)) => Some(ReleaseDate { date, precision }),
            _ => None,
        };

        Self {
            id: wire.id,
            name: wire.name,
            uri: wire.uri,
            duration: Duration::from_millis(wire.duration_ms),
            explicit: wire.explicit,
            description: wire.description,
            release_date,
            images: wire.images,
        }
    }
}
