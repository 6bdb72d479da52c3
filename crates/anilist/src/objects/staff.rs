use anilist_macros::Entity;

use super::common::{FuzzyDate, Image, Name};

/// Voice actors, authors and other production staff.
#[derive(Debug, Clone, PartialEq, Entity)]
pub struct Staff {
    pub id: i32,
    pub name: Option<Name>,
    /// Primary language, e.g. `"Japanese"`.
    #[field(rename = "languageV2")]
    pub language: Option<String>,
    pub image: Option<Image>,
    pub description: Option<String>,
    pub primary_occupations: Option<Vec<String>>,
    pub gender: Option<String>,
    pub date_of_birth: Option<FuzzyDate>,
    pub date_of_death: Option<FuzzyDate>,
    pub age: Option<i32>,
    pub years_active: Option<Vec<i32>>,
    pub home_town: Option<String>,
    pub blood_type: Option<String>,
    pub is_favourite: bool,
    pub favourites: Option<i32>,
    pub site_url: Option<String>,
}
