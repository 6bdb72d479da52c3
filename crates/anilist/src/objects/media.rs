//! Anime and manga.

use anilist_macros::Entity;

use super::common::FuzzyDate;
use super::enums::{MediaFormat, MediaSeason, MediaSource, MediaStatus, MediaType};

/// Titles of a media in its different languages.
#[derive(Debug, Clone, Default, PartialEq, Entity)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
    pub user_preferred: Option<String>,
}

impl MediaTitle {
    /// The user-preferred title, then English, then romaji.
    pub fn preferred(&self) -> Option<&str> {
        self.user_preferred
            .as_deref()
            .or(self.english.as_deref())
            .or(self.romaji.as_deref())
    }
}

/// Cover art of a media.
#[derive(Debug, Clone, Default, PartialEq, Entity)]
pub struct MediaCoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    /// Average `#RRGGBB` color of the cover.
    pub color: Option<String>,
}

/// An anime or manga.
#[derive(Debug, Clone, PartialEq, Entity)]
pub struct Media {
    pub id: i32,
    pub id_mal: Option<i32>,
    pub title: Option<MediaTitle>,
    #[field(rename = "type")]
    pub media_type: Option<MediaType>,
    pub format: Option<MediaFormat>,
    pub status: Option<MediaStatus>,
    pub description: Option<String>,
    pub start_date: Option<FuzzyDate>,
    pub end_date: Option<FuzzyDate>,
    pub season: Option<MediaSeason>,
    pub season_year: Option<i32>,
    pub episodes: Option<i32>,
    /// Minutes per episode.
    pub duration: Option<i32>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub country_of_origin: Option<String>,
    pub source: Option<MediaSource>,
    pub cover_image: Option<MediaCoverImage>,
    pub banner_image: Option<String>,
    pub genres: Option<Vec<String>>,
    pub synonyms: Option<Vec<String>>,
    pub average_score: Option<i32>,
    pub mean_score: Option<i32>,
    pub popularity: Option<i32>,
    pub favourites: Option<i32>,
    /// Whether the authenticated user has favourited this media; always
    /// `false` for anonymous clients.
    pub is_favourite: bool,
    pub is_adult: Option<bool>,
    pub site_url: Option<String>,
}

impl Media {
    /// Episodes for anime, chapters for manga.
    pub fn length(&self) -> Option<i32> {
        match self.media_type {
            Some(MediaType::Manga) => self.chapters,
            _ => self.episodes.or(self.chapters),
        }
    }
}
