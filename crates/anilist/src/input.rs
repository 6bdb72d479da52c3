//! Caller-filled inputs: search filters, list entry mutations and favourite
//! targets.
//!
//! Inputs only send what was set; an empty filter or mutation produces no
//! arguments beyond the ones an operation always needs.

use anilist_core::{ArgValue, Argument};
use chrono::NaiveDate;

use crate::objects::{MediaEntryStatus, MediaFormat, MediaSeason, MediaSort, MediaStatus, MediaType};

/// Criteria for [`AniClient::search_media`](crate::AniClient::search_media).
///
/// # Example
///
/// ```ignore
/// let filter = MediaFilter::new()
///     .query("demon slayer")
///     .media_type(MediaType::Anime)
///     .sort(MediaSort::PopularityDesc);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaFilter {
    pub query: Option<String>,
    pub media_type: Option<MediaType>,
    pub season: Option<MediaSeason>,
    pub season_year: Option<i32>,
    pub format: Option<MediaFormat>,
    pub status: Option<MediaStatus>,
    pub genre: Option<String>,
    pub is_adult: Option<bool>,
    /// Sort keys, most significant first.
    pub sort: Vec<MediaSort>,
}

impl MediaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn season(mut self, season: MediaSeason) -> Self {
        self.season = Some(season);
        self
    }

    pub fn season_year(mut self, year: i32) -> Self {
        self.season_year = Some(year);
        self
    }

    pub fn format(mut self, format: MediaFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn status(mut self, status: MediaStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn is_adult(mut self, is_adult: bool) -> Self {
        self.is_adult = Some(is_adult);
        self
    }

    /// Append a sort key.
    pub fn sort(mut self, sort: MediaSort) -> Self {
        self.sort.push(sort);
        self
    }

    /// The arguments for the `media` page field.
    pub fn arguments(&self) -> Vec<Argument> {
        let mut arguments = Vec::new();
        push(&mut arguments, "search", self.query.as_deref());
        push(&mut arguments, "type", self.media_type);
        push(&mut arguments, "season", self.season);
        push(&mut arguments, "seasonYear", self.season_year);
        push(&mut arguments, "format", self.format);
        push(&mut arguments, "status", self.status);
        push(&mut arguments, "genre", self.genre.as_deref());
        push(&mut arguments, "isAdult", self.is_adult);
        if !self.sort.is_empty() {
            arguments.push(Argument::new("sort", self.sort.clone()));
        }
        arguments
    }
}

/// Requested changes to a list entry.
///
/// Unset fields are left untouched on the remote entry. Saving a mutation
/// for a media that is not on the list yet creates the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaEntryMutation {
    pub status: Option<MediaEntryStatus>,
    pub score: Option<f64>,
    pub progress: Option<i32>,
    pub volume_progress: Option<i32>,
    pub repeat: Option<i32>,
    pub is_private: Option<bool>,
    pub notes: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub complete_date: Option<NaiveDate>,
}

impl MediaEntryMutation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: MediaEntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn progress(mut self, progress: i32) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn volume_progress(mut self, volumes: i32) -> Self {
        self.volume_progress = Some(volumes);
        self
    }

    pub fn repeat(mut self, repeat: i32) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn is_private(mut self, is_private: bool) -> Self {
        self.is_private = Some(is_private);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn complete_date(mut self, date: NaiveDate) -> Self {
        self.complete_date = Some(date);
        self
    }

    /// Whether no change was requested.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The arguments for `SaveMediaListEntry`, starting with `mediaId`.
    pub fn arguments(&self, media_id: i32) -> Vec<Argument> {
        let mut arguments = vec![Argument::new("mediaId", media_id)];
        push(&mut arguments, "status", self.status);
        push(&mut arguments, "score", self.score);
        push(&mut arguments, "progress", self.progress);
        push(&mut arguments, "progressVolumes", self.volume_progress);
        push(&mut arguments, "repeat", self.repeat);
        push(&mut arguments, "private", self.is_private);
        push(&mut arguments, "notes", self.notes.as_deref());
        push(&mut arguments, "startedAt", self.start_date);
        push(&mut arguments, "completedAt", self.complete_date);
        arguments
    }
}

/// What a favourite toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteKind {
    Anime,
    Manga,
    Character,
    Staff,
    Studio,
}

impl FavoriteKind {
    /// The `ToggleFavourite` argument naming the target id.
    pub fn argument_name(self) -> &'static str {
        match self {
            Self::Anime => "animeId",
            Self::Manga => "mangaId",
            Self::Character => "characterId",
            Self::Staff => "staffId",
            Self::Studio => "studioId",
        }
    }
}

impl From<MediaType> for FavoriteKind {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Anime => Self::Anime,
            MediaType::Manga => Self::Manga,
        }
    }
}

fn push<V: Into<ArgValue>>(arguments: &mut Vec<Argument>, name: &str, value: Option<V>) {
    if let Some(value) = value {
        arguments.push(Argument::new(name, value));
    }
}
