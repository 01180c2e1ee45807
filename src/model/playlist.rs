//! Playlist entity.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Image, Page, Track, User, WirePage, WireTrack, WireUser};

/// Playlist as sent on the wire. The embedded `tracks` page only appears in
/// the full representation.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePlaylist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
    pub snapshot_id: String,
    pub owner: WireUser,
    pub images: Option<Vec<Image>>,
    pub tracks: Option<WirePage<WirePlaylistItem>>,
}

/// One entry in a playlist. `track` is null on the wire when the underlying
/// track has been removed from the catalog; that stays an explicit absence.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePlaylistItem {
    pub added_at: Option<DateTime<Utc>>,
    pub track: Option<WireTrack>,
}

/// Mapped playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
    pub snapshot_id: String,
    pub owner: User,
    pub images: Option<Vec<Image>>,
    pub items: Option<Page<PlaylistItem>>,
}

/// Mapped playlist entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistItem {
    pub added_at: Option<DateTime<Utc>>,
    pub track: Option<Track>,
}

impl From<WirePlaylist> for Playlist {
    fn from(wire: WirePlaylist) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            uri: wire.uri,
            description: wire.description,
            public: wire.public,
            collaborative: wire.collaborative,
            snapshot_id: wire.snapshot_id,
            owner: User::from(wire.owner),
            images: wire.images,
            items: wire.tracks.map(WirePage::map_into),
        }
    }
}

impl From<WirePlaylistItem> for PlaylistItem {
    fn from(wire: WirePlaylistItem) -> Self {
        Self {
            added_at: wire.added_at,
            track: wire.track.map(Track::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_track_slot_stays_absent() {
        let wire: WirePlaylistItem = serde_json::from_value(serde_json::json!({
            "added_at": "2020-01-01T00:00:00Z",
            "track": null
        }))
        .unwrap();

        let item = PlaylistItem::from(wire);
        assert!(item.added_at.is_some());
        assert!(item.track.is_none());
    }
}
