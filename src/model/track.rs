//! Track entity.

use std::time::Duration;

use serde::Deserialize;

use super::{Album, Artist, WireAlbum, WireArtist};

/// Track as sent on the wire. The containing `album` and `popularity` only
/// appear in the full representation; a track embedded in an album's own
/// track page arrives without them.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub explicit: bool,
    pub track_number: u32,
    pub disc_number: Option<u32>,
    pub artists: Vec<WireArtist>,
    pub album: Option<Box<WireAlbum>>,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
}

/// Mapped track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration: Duration,
    pub explicit: bool,
    pub track_number: u32,
    pub disc_number: Option<u32>,
    pub artists: Vec<Artist>,
    pub album: Option<Box<Album>>,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
}

impl From<WireTrack> for Track {
    fn from(wire: WireTrack) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            uri: wire.uri,
            duration: Duration::from_millis(wire.duration_ms),
            explicit: wire.explicit,
            track_number: wire.track_number,
            disc_number: wire.disc_number,
            artists: wire.artists.into_iter().map(Artist::from).collect(),
            album: wire.album.map(|album| Box::new(Album::from(*album))),
            popularity: wire.popularity,
            preview_url: wire.preview_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplified_track_maps_without_album() {
        let wire: WireTrack = serde_json::from_value(serde_json::json!({
            "id": "11dFghVXANMlKmJXsNCbNl",
            "name": "Cut To The Feeling",
            "uri": "spotify:track:11dFghVXANMlKmJXsNCbNl",
            "duration_ms": 207959,
            "explicit": false,
            "track_number": 1,
            "artists": [{
                "id": "6sFIWsNpZYqfjUpaCgueju",
                "name": "Carly Rae Jepsen",
                "uri": "spotify:artist:6sFIWsNpZYqfjUpaCgueju"
            }]
        }))
        .unwrap();

        let track = Track::from(wire);
        assert_eq!(track.duration, Duration::from_millis(207_959));
        assert!(track.album.is_none());
        assert!(track.popularity.is_none());
        assert_eq!(track.artists.len(), 1);
    }
}
