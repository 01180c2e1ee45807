//! Artist entity.

use serde::Deserialize;

use super::{Image, WireFollowers};

/// Artist as sent on the wire. `genres`, `images`, `popularity` and
/// `followers` only appear in the full representation.
#[derive(Debug, Clone, Deserialize)]
pub struct WireArtist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub genres: Option<Vec<String>>,
    pub images: Option<Vec<Image>>,
    pub popularity: Option<u32>,
    pub followers: Option<WireFollowers>,
}

/// Mapped artist.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub genres: Option<Vec<String>>,
    pub images: Option<Vec<Image>>,
    pub popularity: Option<u32>,
    pub followers: Option<u64>,
}

impl From<WireArtist> for Artist {
    fn from(wire: WireArtist) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            uri: wire.uri,
            genres: wire.genres,
            images: wire.images,
            popularity: wire.popularity,
            followers: wire.followers.map(|f| f.total),
        }
    }
}
