//! Catalog entity types.
//!
//! Every entity has two representations: a wire shape (`Wire*`, field names
//! exactly as the API sends them, optional fields reflecting the simplified
//! vs. full variants) and a mapped domain shape with idiomatic names and
//! richer types. Each wire shape converts into its domain shape through a
//! `From` impl; conversion is pure and never fails. Enumerated wire strings
//! decode through closed serde enums, so an unrecognized value is a
//! deserialization error rather than a silent default.

mod album;
mod artist;
mod page;
mod playlist;
mod show;
mod track;
mod user;

pub use album::{
    Album, AlbumKind, ReleaseDate, ReleaseDatePrecision, SavedAlbum, WireAlbum, WireSavedAlbum,
};
pub use artist::{Artist, WireArtist};
pub use page::{CursorPage, Page, WireCursorPage, WirePage};
pub use playlist::{Playlist, PlaylistItem, WirePlaylist, WirePlaylistItem};
pub use show::{Episode, Show, WireEpisode, WireShow};
pub use track::{Track, WireTrack};
pub use user::{User, WireUser};

use serde::Deserialize;

/// Catalog object category, used to address search sub-requests and tag
/// their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Album,
    Artist,
    Track,
    Playlist,
    Show,
    Episode,
}

impl SearchKind {
    /// Wire name of the category, as used in the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Album => "album",
            SearchKind::Artist => "artist",
            SearchKind::Track => "track",
            SearchKind::Playlist => "playlist",
            SearchKind::Show => "show",
            SearchKind::Episode => "episode",
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image attached to an entity. Identical on the wire and in the domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Follower count envelope as sent on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireFollowers {
    pub total: u64,
}
