//! Closed AniList enumerations.
//!
//! Each variant renders as the remote identifier token (`TvShort` becomes
//! `TV_SHORT`) both in composed arguments and when mapped from responses.

use anilist_macros::GqlEnum;

/// Anime or manga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GqlEnum)]
pub enum MediaType {
    Anime,
    Manga,
}

/// The release format of a media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GqlEnum)]
pub enum MediaFormat {
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
    Manga,
    Novel,
    OneShot,
}

/// Publication or airing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GqlEnum)]
pub enum MediaStatus {
    Finished,
    Releasing,
    NotYetReleased,
    Cancelled,
    Hiatus,
}

/// The season a media was initially released in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GqlEnum)]
pub enum MediaSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

/// Source material of a media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GqlEnum)]
pub enum MediaSource {
    Original,
    Manga,
    LightNovel,
    VisualNovel,
    VideoGame,
    Other,
    Novel,
    Doujinshi,
    Anime,
    WebNovel,
    LiveAction,
    Game,
    Comic,
    MultimediaProject,
    PictureBook,
}

/// Sort orders accepted by media searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GqlEnum)]
pub enum MediaSort {
    Id,
    IdDesc,
    TitleRomaji,
    TitleRomajiDesc,
    TitleEnglish,
    TitleEnglishDesc,
    StartDate,
    StartDateDesc,
    Episodes,
    EpisodesDesc,
    Score,
    ScoreDesc,
    Popularity,
    PopularityDesc,
    Trending,
    TrendingDesc,
    Favourites,
    FavouritesDesc,
    UpdatedAt,
    UpdatedAtDesc,
    SearchMatch,
}

/// Status of a media on a user's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GqlEnum)]
#[gql(name = "MediaListStatus")]
pub enum MediaEntryStatus {
    Current,
    Planning,
    Completed,
    Dropped,
    Paused,
    Repeating,
}
