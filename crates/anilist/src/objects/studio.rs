use anilist_macros::Entity;

/// An animation studio or producer.
#[derive(Debug, Clone, PartialEq, Entity)]
pub struct Studio {
    pub id: i32,
    pub name: String,
    pub is_animation_studio: bool,
    pub is_favourite: bool,
    pub favourites: Option<i32>,
    pub site_url: Option<String>,
}
