//! User profile and follow endpoint bindings.

use serde::Deserialize;

use crate::client::{check_limit, CatalogClient, Query};
use crate::error::Result;
use crate::model::{Artist, CursorPage, User, WireArtist, WireCursorPage, WireUser};

/// User operations, obtained from [`CatalogClient::users`].
pub struct UsersClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Profile of the user the held token belongs to.
    pub async fn me(&self) -> Result<User> {
        let wire: WireUser = self.client.get_json("/me", &Query::new()).await?;
        Ok(User::from(wire))
    }

    /// Public profile of a user by id.
    pub async fn get(&self, user_id: &str) -> Result<User> {
        let wire: WireUser = self
            .client
            .get_json(&format!("/users/{user_id}"), &Query::new())
            .await?;
        Ok(User::from(wire))
    }

    /// One cursor page of the artists the current user follows. Iteration
    /// is forward-only: pass the returned `after` cursor to get the next
    /// page, there is no way back.
    pub async fn followed_artists(
        &self,
        limit: Option<u32>,
        after: Option<&str>,
    ) -> Result<CursorPage<Artist>> {
        check_limit(limit)?;

        let mut query = Query::new();
        query.push("type", "artist");
        query.push_opt("limit", limit);
        query.push_opt("after", after);

        #[derive(Deserialize)]
        struct Wrapper {
            artists: WireCursorPage<WireArtist>,
        }

        let wire: Wrapper = self.client.get_json("/me/following", &query).await?;
        Ok(wire.artists.map_into())
    }
}
