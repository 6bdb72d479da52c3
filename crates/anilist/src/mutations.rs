//! Operations that change the authenticated user's data.
//!
//! All of these require an attached token and fail with
//! [`Error::AuthenticationRequired`](anilist_net::Error::AuthenticationRequired)
//! before sending anything otherwise.

use anilist_core::logging::targets;
use anilist_core::{Operation, Selection, mapper};
use anilist_net::Result;

use crate::client::AniClient;
use crate::input::{FavoriteKind, MediaEntryMutation};
use crate::objects::{Deleted, MediaEntry, MediaType};

impl AniClient {
    /// Create or update the list entry for `media_id`.
    ///
    /// Only the fields set on `mutation` are sent.
    pub async fn save_media_entry(
        &self,
        media_id: i32,
        mutation: &MediaEntryMutation,
    ) -> Result<MediaEntry> {
        let operation = Operation::mutation(
            Selection::entity::<MediaEntry>("SaveMediaListEntry").arguments(mutation.arguments(media_id)),
        );
        let data = self.execute(&operation, true).await?;
        Ok(mapper::require_field(&data, "SaveMediaListEntry")?)
    }

    /// Delete a list entry by its own id (not the media id).
    pub async fn delete_media_entry(&self, entry_id: i32) -> Result<bool> {
        let operation = Operation::mutation(
            Selection::entity::<Deleted>("DeleteMediaListEntry").argument("id", entry_id),
        );
        let data = self.execute(&operation, true).await?;
        let result: Deleted = mapper::require_field(&data, "DeleteMediaListEntry")?;
        Ok(result.deleted)
    }

    /// Toggle a favourite and report whether the target is now a favourite.
    ///
    /// The state is always read back with a second request; the toggle
    /// response itself is not trusted.
    pub async fn toggle_favorite(&self, id: i32, kind: FavoriteKind) -> Result<bool> {
        let toggle = Operation::mutation(
            Selection::new("ToggleFavourite")
                .argument(kind.argument_name(), id)
                .child(
                    Selection::new("anime")
                        .child(Selection::new("pageInfo").child(Selection::new("total"))),
                ),
        );
        self.execute(&toggle, true).await?;

        let is_favourite = match kind {
            FavoriteKind::Anime | FavoriteKind::Manga => self.get_media(id).await?.is_favourite,
            FavoriteKind::Character => self.get_character(id).await?.is_favourite,
            FavoriteKind::Staff => self.get_staff(id).await?.is_favourite,
            FavoriteKind::Studio => self.get_studio(id).await?.is_favourite,
        };

        tracing::debug!(
            target: targets::CLIENT,
            id,
            kind = ?kind,
            is_favourite,
            "toggled favourite"
        );
        Ok(is_favourite)
    }

    pub async fn toggle_media_favorite(&self, id: i32, media_type: MediaType) -> Result<bool> {
        self.toggle_favorite(id, media_type.into()).await
    }

    pub async fn toggle_character_favorite(&self, id: i32) -> Result<bool> {
        self.toggle_favorite(id, FavoriteKind::Character).await
    }

    pub async fn toggle_staff_favorite(&self, id: i32) -> Result<bool> {
        self.toggle_favorite(id, FavoriteKind::Staff).await
    }

    pub async fn toggle_studio_favorite(&self, id: i32) -> Result<bool> {
        self.toggle_favorite(id, FavoriteKind::Studio).await
    }
}
