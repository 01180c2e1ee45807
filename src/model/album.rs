//! Album entity.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Artist, Image, Page, Track, WireArtist, WirePage, WireTrack};

/// Album category marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumKind {
    Album,
    Single,
    Compilation,
}

/// Precision of a release date. An unrecognized wire value fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDatePrecision {
    Year,
    Month,
    Day,
}

/// Release date together with how precise it is: "1981" carries year
/// precision, "1981-12" month, "1981-12-15" day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDate {
    pub date: String,
    pub precision: ReleaseDatePrecision,
}

/// Album as sent on the wire. `genres`, `label`, `popularity` and the
/// embedded `tracks` page only appear in the full representation.
#[derive(Debug, Clone, Deserialize)]
pub struct WireAlbum {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub album_type: AlbumKind,
    pub artists: Vec<WireArtist>,
    pub images: Vec<Image>,
    pub release_date: Option<String>,
    pub release_date_precision: Option<ReleaseDatePrecision>,
    pub total_tracks: Option<u32>,
    pub genres: Option<Vec<String>>,
    pub label: Option<String>,
    pub popularity: Option<u32>,
    pub tracks: Option<WirePage<WireTrack>>,
}

/// Mapped album.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub kind: AlbumKind,
    pub artists: Vec<Artist>,
    pub images: Vec<Image>,
    pub release_date: Option<ReleaseDate>,
    pub total_tracks: Option<u32>,
    pub genres: Option<Vec<String>>,
    pub label: Option<String>,
    pub popularity: Option<u32>,
    pub tracks: Option<Page<Track>>,
}

impl From<WireAlbum> for Album {
    fn from(wire: WireAlbum) -> Self {
        // A release date without a precision marker (or vice versa) is
        // treated as absent rather than guessed at.
        let release_date = match (wire.release_date, wire.release_date_precision) {
            (Some(date), Some(precision)) => Some(ReleaseDate { date, precision }),
            _ => None,
        };

        Self {
            id: wire.id,
            name: wire.name,
            uri: wire.uri,
            kind: wire.album_type,
            artists: wire.artists.into_iter().map(Artist::from).collect(),
            images: wire.images,
            release_date,
            total_tracks: wire.total_tracks,
            genres: wire.genres,
            label: wire.label,
            popularity: wire.popularity,
            tracks: wire.tracks.map(WirePage::map_into),
        }
    }
}

/// Entry in the user's saved-albums listing as sent on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSavedAlbum {
    pub added_at: Option<DateTime<Utc>>,
    pub album: WireAlbum,
}

/// Mapped saved-albums entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedAlbum {
    pub added_at: Option<DateTime<Utc>>,
    pub album: Album,
}

impl From<WireSavedAlbum> for SavedAlbum {
    fn from(wire: WireSavedAlbum) -> Self {
        Self {
            added_at: wire.added_at,
            album: Album::from(wire.album),
        }
    }
}
