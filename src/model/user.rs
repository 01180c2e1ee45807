//! User profile entity.

use serde::Deserialize;

use super::{Image, WireFollowers};

/// User profile as sent on the wire. `country`, `email` and `product` are
/// only present on the current user's own profile (and only with the
/// matching scopes granted).
#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: String,
    pub uri: String,
    pub display_name: Option<String>,
    pub followers: Option<WireFollowers>,
    pub images: Option<Vec<Image>>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
}

/// Mapped user profile.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub uri: String,
    pub display_name: Option<String>,
    pub followers: Option<u64>,
    pub images: Option<Vec<Image>>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        Self {
            id: wire.id,
            uri: wire.uri,
            display_name: wire.display_name,
            followers: wire.followers.map(|f| f.total),
            images: wire.images,
            country: wire.country,
            email: wire.email,
            product: wire.product,
        }
    }
}
