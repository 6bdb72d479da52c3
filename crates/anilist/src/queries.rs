//! Read-only operations: single-entity lookups and paginated searches.

use std::fmt;

use anilist_core::logging::targets;
use anilist_core::{
    ArgValue, Argument, Entity, FieldType, Operation, Page, Pagination, Selection,
    mapper,
};
use anilist_net::{Error, Result};
use serde_json::Value;

use crate::client::AniClient;
use crate::input::MediaFilter;
use crate::objects::{
    Character, Media, MediaEntryStatus, MediaListEntry, MediaType, Staff, Studio, User,
};

impl AniClient {
    /// Fetch an anime or manga by id.
    pub async fn get_media(&self, id: i32) -> Result<Media> {
        self.fetch_single("Media", "id", id).await
    }

    pub async fn get_character(&self, id: i32) -> Result<Character> {
        self.fetch_single("Character", "id", id).await
    }

    pub async fn get_staff(&self, id: i32) -> Result<Staff> {
        self.fetch_single("Staff", "id", id).await
    }

    pub async fn get_studio(&self, id: i32) -> Result<Studio> {
        self.fetch_single("Studio", "id", id).await
    }

    pub async fn get_user(&self, id: i32) -> Result<User> {
        self.fetch_single("User", "id", id).await
    }

    /// Fetch a user by their exact user name.
    pub async fn get_user_by_name(&self, name: &str) -> Result<User> {
        self.fetch_single("User", "name", name).await
    }

    /// Search anime and manga.
    ///
    /// Only the criteria set on `filter` are sent. Without `pagination` the
    /// first page of the client's default size is requested.
    pub async fn search_media(
        &self,
        filter: &MediaFilter,
        pagination: Option<Pagination>,
    ) -> Result<Page<Media>> {
        self.fetch_page("media", filter.arguments(), pagination).await
    }

    pub async fn search_character(
        &self,
        query: &str,
        pagination: Option<Pagination>,
    ) -> Result<Page<Character>> {
        self.fetch_page("characters", search(query), pagination).await
    }

    pub async fn search_staff(&self, query: &str, pagination: Option<Pagination>) -> Result<Page<Staff>> {
        self.fetch_page("staff", search(query), pagination).await
    }

    pub async fn search_studio(
        &self,
        query: &str,
        pagination: Option<Pagination>,
    ) -> Result<Page<Studio>> {
        self.fetch_page("studios", search(query), pagination).await
    }

    pub async fn search_user(&self, query: &str, pagination: Option<Pagination>) -> Result<Page<User>> {
        self.fetch_page("users", search(query), pagination).await
    }

    /// A page of one user's list entries for anime or manga, optionally
    /// restricted to one status.
    pub async fn get_user_entries(
        &self,
        user_id: i32,
        media_type: MediaType,
        status: Option<MediaEntryStatus>,
        pagination: Option<Pagination>,
    ) -> Result<Page<MediaListEntry>> {
        let mut arguments = vec![
            Argument::new("userId", user_id),
            Argument::new("type", media_type),
        ];
        if let Some(status) = status {
            arguments.push(Argument::new("status", status));
        }
        self.fetch_page("mediaList", arguments, pagination).await
    }

    /// Fetch `root(key_name: key)` with the default selection of `T`.
    ///
    /// A `null` result, or a remote 404, becomes [`Error::NotFound`].
    async fn fetch_single<T, K>(&self, root: &str, key_name: &str, key: K) -> Result<T>
    where
        T: Entity + FieldType,
        K: Into<ArgValue> + fmt::Display,
    {
        let entity = T::descriptor().type_name;
        let key_label = key.to_string();
        let operation = Operation::query(Selection::entity::<T>(root).argument(key_name, key));

        let data = match self.execute(&operation, false).await {
            Ok(data) => data,
            Err(err) if err.is_not_found() => return Err(Error::not_found(entity, key_label)),
            Err(err) => return Err(err),
        };

        match mapper::map_field::<T>(&data, root)? {
            Some(value) => Ok(value),
            None => {
                tracing::debug!(target: targets::CLIENT, entity, key = %key_label, "entity not found");
                Err(Error::not_found(entity, key_label))
            }
        }
    }

    /// Fetch one page of `field(arguments)` wrapped in `Page`.
    async fn fetch_page<T>(
        &self,
        field: &str,
        arguments: Vec<Argument>,
        pagination: Option<Pagination>,
    ) -> Result<Page<T>>
    where
        T: Entity + FieldType,
    {
        let pagination = pagination.unwrap_or_else(|| self.default_pagination());
        let data_selection = Selection::entity::<T>(field).arguments(arguments);
        let operation = Operation::query(pagination.wrap(data_selection));

        let data = self.execute(&operation, false).await?;
        let page = mapper::require_field::<Value>(&data, "Page")?;
        let page = Page::<T>::from_value(&page, field).map_err(|err| err.within("data", "Page"))?;

        tracing::debug!(
            target: targets::CLIENT,
            field,
            page = pagination.page(),
            items = page.len(),
            has_next_page = page.has_next_page(),
            "fetched page"
        );
        Ok(page)
    }
}

fn search(query: &str) -> Vec<Argument> {
    vec![Argument::new("search", query)]
}
