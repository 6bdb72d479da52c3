use anilist_macros::Entity;
use chrono::{DateTime, Utc};

use super::common::Image;

/// An AniList user, as returned by `User` and `Viewer`.
#[derive(Debug, Clone, PartialEq, Entity)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub about: Option<String>,
    pub avatar: Option<Image>,
    pub banner_image: Option<String>,
    pub site_url: Option<String>,
    pub donator_tier: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
