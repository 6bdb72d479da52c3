//! Entries on a user's anime or manga list.
//!
//! These are read-only projections of the remote `MediaList` type. Changes
//! go through [`MediaEntryMutation`](crate::MediaEntryMutation).

use anilist_macros::Entity;
use chrono::{DateTime, Utc};

use super::common::FuzzyDate;
use super::enums::MediaEntryStatus;
use super::media::MediaTitle;

/// A list entry as returned by `SaveMediaListEntry`.
#[derive(Debug, Clone, PartialEq, Entity)]
#[entity(name = "MediaList")]
pub struct MediaEntry {
    pub id: i32,
    pub media_id: Option<i32>,
    pub status: Option<MediaEntryStatus>,
    /// Score in the user's preferred scoring format.
    pub score: Option<f64>,
    pub progress: Option<i32>,
    #[field(rename = "progressVolumes")]
    pub volume_progress: Option<i32>,
    pub notes: Option<String>,
    #[field(rename = "startedAt")]
    pub start_date: Option<FuzzyDate>,
    #[field(rename = "completedAt")]
    pub complete_date: Option<FuzzyDate>,
}

/// A list entry together with the counts of the media it tracks.
#[derive(Debug, Clone, PartialEq, Entity)]
#[entity(name = "MediaList")]
pub struct MediaListEntry {
    pub id: i32,
    pub user_id: Option<i32>,
    pub media_id: Option<i32>,
    pub status: Option<MediaEntryStatus>,
    pub score: Option<f64>,
    pub progress: Option<i32>,
    #[field(rename = "progressVolumes")]
    pub volume_progress: Option<i32>,
    pub repeat: Option<i32>,
    pub priority: Option<i32>,
    #[field(rename = "private")]
    pub is_private: Option<bool>,
    pub notes: Option<String>,
    #[field(rename = "startedAt")]
    pub start_date: Option<FuzzyDate>,
    #[field(rename = "completedAt")]
    pub complete_date: Option<FuzzyDate>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub media: Option<EntryMedia>,
}

impl MediaListEntry {
    /// Episodes of an anime or chapters of a manga, when known.
    pub fn max_progress(&self) -> Option<i32> {
        let media = self.media.as_ref()?;
        media.episodes.or(media.chapters)
    }

    /// Volumes of a manga, when known.
    pub fn max_volume_progress(&self) -> Option<i32> {
        self.media.as_ref()?.volumes
    }

    /// Whether progress has reached the known length of the media.
    pub fn is_caught_up(&self) -> bool {
        matches!(
            (self.progress, self.max_progress()),
            (Some(progress), Some(max)) if progress >= max
        )
    }
}

/// The media counts needed to interpret list progress.
#[derive(Debug, Clone, PartialEq, Entity)]
#[entity(name = "Media")]
pub struct EntryMedia {
    pub id: i32,
    pub title: Option<MediaTitle>,
    pub episodes: Option<i32>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
}

/// Result of `DeleteMediaListEntry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Entity)]
pub struct Deleted {
    pub deleted: bool,
}
