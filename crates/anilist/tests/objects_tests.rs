//! Descriptors and response mapping for the AniList objects.

use anilist::mapper;
use anilist::{
    Entity, FuzzyDate, MappingError, Media, MediaEntry, MediaListEntry, MediaSeason, MediaSource,
    MediaStatus, MediaType, Operation, Selection, Staff, User,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

fn child_names(selection: &Selection) -> Vec<&str> {
    selection.children().iter().map(Selection::name).collect()
}

#[test]
fn test_media_selection_uses_remote_names() {
    let selection = Selection::entity::<Media>("Media");
    let names = child_names(&selection);

    assert!(names.contains(&"type"));
    assert!(names.contains(&"idMal"));
    assert!(names.contains(&"isFavourite"));
    assert!(!names.contains(&"media_type"));

    let title = selection.find_child("title").unwrap();
    assert_eq!(child_names(title), ["romaji", "english", "native", "userPreferred"]);
    let start = selection.find_child("startDate").unwrap();
    assert_eq!(child_names(start), ["year", "month", "day"]);
    assert!(selection.find_child("genres").unwrap().is_leaf());
}

#[test]
fn test_renamed_fields() {
    assert!(Staff::descriptor().remote_field("languageV2").is_some());
    assert!(Staff::descriptor().remote_field("language").is_none());

    let entry = MediaListEntry::descriptor();
    assert_eq!(entry.type_name, "MediaList");
    assert_eq!(entry.field("volume_progress").unwrap().remote_name, "progressVolumes");
    assert_eq!(entry.field("start_date").unwrap().remote_name, "startedAt");
    assert_eq!(entry.field("complete_date").unwrap().remote_name, "completedAt");
    assert_eq!(entry.field("is_private").unwrap().remote_name, "private");
    assert!(entry.validate().is_ok());
}

#[test]
fn test_list_entry_selection_includes_media_counts() {
    let selection = Selection::entity::<MediaListEntry>("mediaList");
    let media = selection.find_child("media").unwrap();
    assert_eq!(
        child_names(media),
        ["id", "title", "episodes", "chapters", "volumes"]
    );
}

#[test]
fn test_composed_media_query() {
    let operation = Operation::query(Selection::entity::<MediaEntry>("MediaList").argument("id", 3));
    assert_eq!(
        operation.render(),
        "query { MediaList(id: 3) { id mediaId status score progress progressVolumes notes \
         startedAt { year month day } completedAt { year month day } } }"
    );
}

#[test]
fn test_map_media() {
    let value = json!({
        "id": 101922,
        "idMal": 38000,
        "title": {
            "romaji": "Kimetsu no Yaiba",
            "english": "Demon Slayer: Kimetsu no Yaiba",
            "native": null,
            "userPreferred": "Kimetsu no Yaiba"
        },
        "type": "ANIME",
        "status": "FINISHED",
        "startDate": { "year": 2019, "month": 4, "day": 6 },
        "endDate": { "year": 2019, "month": 9, "day": null },
        "season": "SPRING",
        "seasonYear": 2019,
        "episodes": 26,
        "source": "MANGA",
        "genres": ["Action", "Supernatural"],
        "averageScore": 0,
        "isFavourite": false
    });

    let media: Media = mapper::map(&value).unwrap();
    assert_eq!(media.id, 101922);
    assert_eq!(media.media_type, Some(MediaType::Anime));
    assert_eq!(media.status, Some(MediaStatus::Finished));
    assert_eq!(media.season, Some(MediaSeason::Spring));
    assert_eq!(media.source, Some(MediaSource::Manga));
    assert_eq!(media.length(), Some(26));
    assert_eq!(
        media.title.as_ref().and_then(|t| t.preferred()),
        Some("Kimetsu no Yaiba")
    );
    assert_eq!(
        media.start_date.and_then(|d| d.to_naive_date()),
        NaiveDate::from_ymd_opt(2019, 4, 6)
    );
    assert_eq!(
        media.end_date,
        Some(FuzzyDate {
            year: Some(2019),
            month: Some(9),
            day: None
        })
    );
    assert_eq!(
        media.genres.as_deref(),
        Some(&["Action".to_string(), "Supernatural".to_string()][..])
    );

    // Present zero and absent values stay distinct.
    assert_eq!(media.average_score, Some(0));
    assert_eq!(media.mean_score, None);
    assert_eq!(media.cover_image, None);
}

#[test]
fn test_map_media_requires_id_and_favourite_flag() {
    let err = mapper::map::<Media>(&json!({ "id": 1 })).unwrap_err();
    assert_eq!(err, MappingError::missing("Media", "isFavourite"));

    let err = mapper::map::<Media>(&json!({ "isFavourite": true, "id": null })).unwrap_err();
    assert_eq!(err, MappingError::missing("Media", "id"));
}

#[test]
fn test_one_bad_genre_fails_the_media() {
    let value = json!({ "id": 1, "isFavourite": false, "genres": ["Action", 3] });
    let err = mapper::map::<Media>(&value).unwrap_err();
    assert!(matches!(
        err,
        MappingError::InvalidField { ref type_name, ref field, .. }
            if type_name == "Media" && field == "genres"
    ));
}

#[test]
fn test_map_user_timestamps() {
    let value = json!({
        "id": 5,
        "name": "someone",
        "avatar": { "large": "l.png", "medium": "m.png" },
        "createdAt": 1_500_000_000
    });
    let user: User = mapper::map(&value).unwrap();
    assert_eq!(user.avatar.unwrap().best(), Some("l.png"));
    assert_eq!(user.created_at, Utc.timestamp_opt(1_500_000_000, 0).single());
    assert_eq!(user.updated_at, None);
}

#[test]
fn test_map_list_entry_progress() {
    let value = json!({
        "data": {
            "MediaList": {
                "id": 1,
                "score": 8.5,
                "progress": 26,
                "private": false,
                "media": { "id": 101922, "episodes": 26, "chapters": null, "volumes": null }
            }
        }
    });
    let entry: MediaListEntry = mapper::require_field(&value["data"], "MediaList").unwrap();
    assert_eq!(entry.score, Some(8.5));
    assert_eq!(entry.is_private, Some(false));
    assert_eq!(entry.max_progress(), Some(26));
    assert_eq!(entry.max_volume_progress(), None);
    assert!(entry.is_caught_up());
}
