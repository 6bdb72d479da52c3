use anilist_macros::Entity;

use super::common::{FuzzyDate, Image, Name};

/// A character appearing in anime or manga.
#[derive(Debug, Clone, PartialEq, Entity)]
pub struct Character {
    pub id: i32,
    pub name: Option<Name>,
    pub image: Option<Image>,
    pub description: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<FuzzyDate>,
    /// Free text, e.g. `"15-16"`.
    pub age: Option<String>,
    pub blood_type: Option<String>,
    pub is_favourite: bool,
    pub favourites: Option<i32>,
    pub site_url: Option<String>,
}
