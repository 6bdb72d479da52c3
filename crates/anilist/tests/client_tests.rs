//! AniClient operations against a mock AniList server.

use anilist::{
    AniClient, ClientConfig, Error, FavoriteKind, MappingError, MediaEntryMutation,
    MediaEntryStatus, MediaFilter, MediaSeason, MediaType, Pagination,
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use wiremock::matchers::{header, method};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests whose GraphQL document contains a fragment.
struct QueryContains(&'static str);

impl Match for QueryContains {
    fn matches(&self, request: &Request) -> bool {
        document(request).is_some_and(|query| query.contains(self.0))
    }
}

fn document(request: &Request) -> Option<String> {
    let body: Value = serde_json::from_slice(&request.body).ok()?;
    body.get("query")?.as_str().map(str::to_owned)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn client_for(server: &MockServer) -> AniClient {
    init_tracing();
    AniClient::builder()
        .endpoint(server.uri())
        .build()
        .expect("Failed to build client")
}

/// A client signed in with `token` through `try_authenticate`.
///
/// The `Viewer` check is the first request the server receives.
async fn authenticated_client_for(server: &MockServer) -> AniClient {
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer token"))
        .and(QueryContains("Viewer"))
        .respond_with(data(json!({ "Viewer": { "id": 5, "name": "someone" } })))
        .with_priority(1)
        .expect(1)
        .mount(server)
        .await;

    let client = client_for(server);
    assert!(client.try_authenticate("token").await);
    assert!(client.is_authenticated());
    client
}

fn media_json(id: i32, media_type: &str, is_favourite: bool) -> Value {
    json!({
        "id": id,
        "type": media_type,
        "title": { "romaji": format!("Title {id}"), "english": null },
        "episodes": 26,
        "isFavourite": is_favourite
    })
}

fn data(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": value }))
}

#[tokio::test]
async fn test_search_media_sends_only_given_criteria() {
    let server = MockServer::start().await;

    let items: Vec<Value> = (1..=5).map(|id| media_json(id, "ANIME", false)).collect();
    Mock::given(method("POST"))
        .and(QueryContains(r#"search: "demon slayer""#))
        .and(QueryContains("type: ANIME"))
        .and(QueryContains("Page(page: 1, perPage: 5)"))
        .respond_with(data(json!({
            "Page": {
                "pageInfo": {
                    "total": 12,
                    "perPage": 5,
                    "currentPage": 1,
                    "lastPage": 3,
                    "hasNextPage": true
                },
                "media": items
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = MediaFilter::new()
        .query("demon slayer")
        .media_type(MediaType::Anime);
    let page = client
        .search_media(&filter, Some(Pagination::new(1, 5)))
        .await
        .unwrap();

    assert_eq!(page.len(), 5);
    assert!(page.iter().all(|m| m.media_type == Some(MediaType::Anime)));
    assert_eq!(page.next_pagination(), Some(Pagination::new(2, 5)));

    let requests = server.received_requests().await.unwrap();
    let query = document(&requests[0]).unwrap();
    assert!(!query.contains("season:"));
    assert!(!query.contains("sort:"));
}

#[tokio::test]
async fn test_search_uses_default_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains("Page(page: 1, perPage: 10)"))
        .and(QueryContains("season: WINTER"))
        .respond_with(data(json!({
            "Page": { "pageInfo": { "hasNextPage": false }, "media": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .search_media(&MediaFilter::new().season(MediaSeason::Winter), None)
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.next_pagination(), None);
}

#[tokio::test]
async fn test_search_character() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains(r#"characters(search: "tanjiro")"#))
        .and(QueryContains("Page(page: 2, perPage: 10)"))
        .respond_with(data(json!({
            "Page": {
                "pageInfo": { "currentPage": 2, "hasNextPage": false },
                "characters": [{
                    "id": 126071,
                    "name": { "full": "Tanjirou Kamado", "userPreferred": "Tanjirou Kamado" },
                    "isFavourite": false
                }]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .search_character("tanjiro", Some(Pagination::new(2, 10)))
        .await
        .unwrap();
    assert_eq!(page.page_info.current_page, Some(2));
    let name = page.data[0].name.as_ref().unwrap();
    assert_eq!(name.preferred(), Some("Tanjirou Kamado"));
}

#[tokio::test]
async fn test_get_media_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(data(json!({ "Media": null })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_media(999_999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "Media", ref key } if key == "999999"));
}

#[tokio::test]
async fn test_remote_404_becomes_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "message": "Not Found.", "status": 404 }],
            "data": { "User": null }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_user_by_name("nobody").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "User", ref key } if key == "nobody"));
}

#[tokio::test]
async fn test_delete_media_entry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer token"))
        .and(QueryContains("mutation { DeleteMediaListEntry(id: 42) { deleted } }"))
        .respond_with(data(json!({ "DeleteMediaListEntry": { "deleted": true } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server).await;
    assert!(client.delete_media_entry(42).await.unwrap());
}

#[tokio::test]
async fn test_delete_media_entry_null_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains("DeleteMediaListEntry"))
        .respond_with(data(json!({ "DeleteMediaListEntry": { "deleted": null } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server).await;
    let err = client.delete_media_entry(42).await.unwrap_err();
    let Error::Mapping(mapping) = err else {
        panic!("expected a mapping error");
    };
    assert_eq!(mapping, MappingError::missing("Deleted", "deleted"));
}

#[tokio::test]
async fn test_delete_media_entry_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "errors": [{ "message": "not found" }] })),
        )
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server).await;
    let err = client.delete_media_entry(42).await.unwrap_err();
    let Error::Remote(remote) = err else {
        panic!("expected a remote error");
    };
    assert_eq!(remote.message(), "not found");
}

#[tokio::test]
async fn test_mutations_require_a_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(data(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.delete_media_entry(42).await.unwrap_err();
    assert!(matches!(err, Error::AuthenticationRequired { .. }));

    let err = client
        .toggle_favorite(7, FavoriteKind::Anime)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthenticationRequired { .. }));

    let err = client
        .save_media_entry(21, &MediaEntryMutation::new().progress(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthenticationRequired { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_media_entry_sends_only_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains(
            "SaveMediaListEntry(mediaId: 21, status: CURRENT, progress: 12, startedAt: {year: 2024, month: 1, day: 5})",
        ))
        .respond_with(data(json!({
            "SaveMediaListEntry": {
                "id": 900,
                "mediaId": 21,
                "status": "CURRENT",
                "score": 0,
                "progress": 12,
                "progressVolumes": null,
                "startedAt": { "year": 2024, "month": 1, "day": 5 },
                "completedAt": { "year": null, "month": null, "day": null }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server).await;
    let mutation = MediaEntryMutation::new()
        .status(MediaEntryStatus::Current)
        .progress(12)
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    let entry = client.save_media_entry(21, &mutation).await.unwrap();

    assert_eq!(entry.id, 900);
    assert_eq!(entry.status, Some(MediaEntryStatus::Current));
    assert_eq!(entry.score, Some(0.0));
    assert_eq!(entry.volume_progress, None);
    assert_eq!(
        entry.start_date.and_then(|d| d.to_naive_date()),
        NaiveDate::from_ymd_opt(2024, 1, 5)
    );
    assert!(entry.complete_date.unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let query = document(&requests[1]).unwrap();
    assert!(query.starts_with("mutation"));
    assert_eq!(
        requests[1].headers.get("authorization").unwrap(),
        "Bearer token"
    );
    assert!(!query.contains("notes:"));
}

#[tokio::test]
async fn test_toggle_favorite_refetches_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains("ToggleFavourite(animeId: 7)"))
        .respond_with(data(json!({
            "ToggleFavourite": { "anime": { "pageInfo": { "total": 1 } } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(QueryContains("Media(id: 7)"))
        .respond_with(data(json!({ "Media": media_json(7, "ANIME", true) })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server).await;
    assert!(client.toggle_media_favorite(7, MediaType::Anime).await.unwrap());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(document(&requests[1]).unwrap().starts_with("mutation"));
    assert!(document(&requests[2]).unwrap().contains("isFavourite"));
    assert!(requests[2].headers.get("authorization").is_some());
}

#[tokio::test]
async fn test_toggle_studio_favorite() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains("ToggleFavourite(studioId: 11)"))
        .respond_with(data(json!({ "ToggleFavourite": { "anime": null } })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(QueryContains("Studio(id: 11)"))
        .respond_with(data(json!({
            "Studio": {
                "id": 11,
                "name": "Madhouse",
                "isAnimationStudio": true,
                "isFavourite": false
            }
        })))
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server).await;
    assert!(!client.toggle_studio_favorite(11).await.unwrap());
}

#[tokio::test]
async fn test_failed_authentication_clears_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains("Viewer"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "message": "Invalid token", "status": 400 }],
            "data": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(QueryContains("Media(id: 1)"))
        .respond_with(data(json!({ "Media": media_json(1, "ANIME", false) })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!client.try_authenticate("bad-token").await);
    assert!(!client.is_authenticated());
    assert!(!client.has_token());

    client.get_media(1).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Bearer bad-token"
    );
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_failed_authentication_on_network_error() {
    init_tracing();
    let client = AniClient::builder()
        .endpoint("http://127.0.0.1:9/graphql")
        .build()
        .unwrap();
    assert!(!client.try_authenticate("token").await);
    assert!(!client.has_token());
}

#[tokio::test]
async fn test_successful_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer good-token"))
        .and(QueryContains("Viewer"))
        .respond_with(data(json!({ "Viewer": { "id": 5, "name": "someone" } })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.try_authenticate("good-token").await);
    assert!(client.is_authenticated());
    assert!(client.has_token());

    let user = client.get_authenticated_user().await.unwrap();
    assert_eq!(user.name, "someone");

    client.sign_out();
    assert!(!client.is_authenticated());
    assert!(!client.has_token());
    assert!(matches!(
        client.get_authenticated_user().await,
        Err(Error::AuthenticationRequired { .. })
    ));
}

#[tokio::test]
async fn test_connect_with_configured_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains("Viewer"))
        .respond_with(data(json!({ "Viewer": { "id": 5, "name": "someone" } })))
        .expect(1)
        .mount(&server)
        .await;

    init_tracing();
    let config = ClientConfig::from_toml_str(&format!(
        "endpoint = \"{}\"\ntoken = \"good-token\"\ndefault_per_page = 25\n",
        server.uri()
    ))
    .unwrap();
    let client = AniClient::connect(config).await.unwrap();
    assert!(client.is_authenticated());
    assert_eq!(client.default_pagination().per_page(), 25);
}

#[tokio::test]
async fn test_get_user_entries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(QueryContains("mediaList(userId: 5, type: MANGA, status: CURRENT)"))
        .respond_with(data(json!({
            "Page": {
                "pageInfo": { "total": 1, "hasNextPage": false },
                "mediaList": [{
                    "id": 1,
                    "status": "CURRENT",
                    "progress": 40,
                    "progressVolumes": 4,
                    "media": { "id": 30013, "chapters": null, "volumes": 23, "episodes": null }
                }]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .get_user_entries(5, MediaType::Manga, Some(MediaEntryStatus::Current), None)
        .await
        .unwrap();
    let entry = &page.data[0];
    assert_eq!(entry.max_progress(), None);
    assert_eq!(entry.max_volume_progress(), Some(23));
    assert_eq!(entry.volume_progress, Some(4));
}

#[tokio::test]
async fn test_schema_drift_is_a_mapping_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(data(json!({ "Media": { "id": 1, "type": "PODCAST", "isFavourite": false } })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_media(1).await.unwrap_err();
    assert!(matches!(err, Error::Mapping(_)));
}
