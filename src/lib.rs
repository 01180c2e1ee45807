//! Sonata Client
//!
//! Typed async client library for the Spotify Web API music catalog.
//!
//! # Features
//!
//! - **Authentication**: client-credentials, authorization-code and
//!   proof-key (PKCE) token flows, with explicit refresh
//! - **Typed catalog access**: albums, artists, tracks, playlists, shows,
//!   episodes and user profiles, mapped from the wire format into domain
//!   types
//! - **Paging**: offset and cursor paging envelopes, caller-driven
//! - **Search**: concurrent fan-out across object categories
//!
//! Every public operation returns `Result`; remote rejections arrive as
//! [`CatalogClientError::Api`] values, never as panics, and local
//! precondition violations are reported as
//! [`CatalogClientError::InvalidRequest`] before any request is sent.
//!
//! # Example
//!
//! ```ignore
//! use sonata_client::{AuthFlow, CatalogClient, ClientConfig, SearchKind, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let flow = AuthFlow::client_credentials("client-id", "client-secret");
//!     let client = CatalogClient::connect(ClientConfig::new(), flow).await?;
//!
//!     let album = client.albums().get("0sNOF9WDwhWunNAHPD3Baj", Some("US")).await?;
//!     println!("{}", album.name);
//!
//!     let results = client
//!         .search()
//!         .query("unusual", &[SearchKind::Album, SearchKind::Artist], &SearchOptions::default())
//!         .await?;
//!     println!("{} albums", results.albums.map_or(0, |page| page.total));
//!
//!     Ok(())
//! }
//! ```

mod albums;
mod artists;
mod auth;
mod client;
mod config;
mod error;
mod playlists;
mod search;
mod shows;
mod tracks;
mod users;

pub mod model;

// Re-export main types
pub use auth::{AuthFlow, AuthorizationPrompt, Credentials, Token};
pub use client::CatalogClient;
pub use config::ClientConfig;
pub use error::{AuthError, CatalogClientError, Result};

// Re-export endpoint bindings and their option types
pub use albums::{AlbumsClient, MAX_ALBUM_IDS};
pub use artists::{ArtistsClient, MAX_ARTIST_IDS};
pub use playlists::{
    CreatePlaylistOptions, PlaylistDetails, PlaylistsClient, MAX_PLAYLIST_ITEM_URIS,
};
pub use search::{SearchClient, SearchOptions, SearchResults};
pub use shows::ShowsClient;
pub use tracks::{TracksClient, MAX_TRACK_IDS};
pub use users::UsersClient;

// Commonly used model types at the crate root
pub use model::{
    Album, AlbumKind, Artist, CursorPage, Episode, Page, Playlist, PlaylistItem, ReleaseDate,
    ReleaseDatePrecision, SavedAlbum, SearchKind, Show, Track, User,
};
