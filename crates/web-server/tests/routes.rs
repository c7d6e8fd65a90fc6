// tests/routes.rs
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use configuration::DatabaseSettings;
use database::DbRepository;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{app, AppState};

async fn test_app() -> Router {
    test_app_with_repo().await.0
}

/// Also hands back the repository so a test can break the store underneath.
async fn test_app_with_repo() -> (Router, DbRepository) {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = database::connect(&settings).await.unwrap();
    database::run_migrations(&pool).await.unwrap();
    let db_repo = DbRepository::new(pool);
    let state = AppState::new(db_repo.clone()).unwrap();
    (app(Arc::new(state)), db_repo)
}

/// Encodes pairs as an urlencoded body. Test values only contain characters
/// that need no escaping besides spaces.
fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v.replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let res = app
        .clone()
        .oneshot(Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post(app: &Router, uri: &str, pairs: &[(&str, &str)]) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form_body(pairs)))
                .unwrap(),
        )
        .await
        .unwrap()
}

const BERLIN_GAME: &[(&str, &str)] = &[
    ("home", "Berlin Thunder"),
    ("away", "Cologne Centurions"),
    ("date", "01/05/2021"),
    ("time", "18:00"),
    ("weather", "Sunny"),
    ("stadium", "open"),
];

const KICKOFF_DRIVE: &[(&str, &str)] = &[
    ("time_received", "14:20"),
    ("drive_began", "HSD 9"),
    ("how_ball_obtained", "Kickoff"),
    ("time_lost", "14:00"),
    ("last_snap", "HSD 45"),
    ("how_given_up", "Punt"),
];

const THIRD_DOWN_PLAY: &[(&str, &str)] = &[
    ("quarter", "2"),
    ("down", "3"),
    ("yards_to_go", "7"),
    ("field_pos_half", "own"),
    ("field_pos_yard", "35"),
    ("time", "09:12"),
    ("shotgun", "yes"),
    ("play_description", "S.Darnold pass incomplete deep right to C.Herndon."),
];

fn rows_of(body: &str, kind: &str) -> usize {
    body.matches(&format!("data-kind=\"{}\"", kind)).count()
}

#[tokio::test]
async fn forms_render_with_their_fields() {
    let app = test_app().await;

    let (status, body) = get(&app, "/addgame").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/addgame\""));
    assert!(body.contains("Hamburg Sea Devils"));
    assert!(body.contains("name=\"stadium\""));

    let (status, body) = get(&app, "/drive").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"how_given_up\""));
    assert!(body.contains("End of Game"));

    let (status, body) = get(&app, "/play").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("type=\"radio\" name=\"down\""));
    assert!(body.contains("name=\"play_description\""));
}

#[tokio::test]
async fn posted_game_is_listed_once_with_submitted_values() {
    let app = test_app().await;

    let res = post(&app, "/addgame", BERLIN_GAME).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/");

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows_of(&body, "game"), 1);
    assert_eq!(body.matches("Cologne Centurions").count(), 1);
    for value in ["Berlin Thunder", "01/05/2021", "18:00", "Sunny", "<td>open</td>"] {
        assert!(body.contains(value), "missing {value}");
    }
    assert!(body.contains("href=\"/game/1\""));
    // Only the game table carries the extra link column.
    assert_eq!(body.matches("<th>Details</th>").count(), 1);
}

#[tokio::test]
async fn posted_drive_is_listed() {
    let app = test_app().await;

    let res = post(&app, "/drive", KICKOFF_DRIVE).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let (_, body) = get(&app, "/").await;
    assert_eq!(rows_of(&body, "drive"), 1);
    for value in ["14:20", "HSD 9", "Kickoff", "14:00", "HSD 45", "<td>Punt</td>"] {
        assert!(body.contains(value), "missing {value}");
    }
}

#[tokio::test]
async fn posted_play_is_listed() {
    let app = test_app().await;

    let res = post(&app, "/play", THIRD_DOWN_PLAY).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let (_, body) = get(&app, "/").await;
    assert_eq!(rows_of(&body, "play"), 1);
    assert!(body.contains("S.Darnold pass incomplete deep right to C.Herndon."));
    assert!(body.contains("09:12"));
}

#[tokio::test]
async fn missing_field_rerenders_form_and_stores_nothing() {
    let app = test_app().await;
    let without_weather: Vec<_> = BERLIN_GAME.iter().copied().filter(|(k, _)| *k != "weather").collect();

    let res = post(&app, "/addgame", &without_weather).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("<form"));
    assert!(body.contains("This field is required."));
    // The values that were submitted are kept.
    assert!(body.contains("value=\"01/05/2021\""));

    let (_, listing) = get(&app, "/").await;
    assert_eq!(rows_of(&listing, "game"), 0);
}

#[tokio::test]
async fn invalid_choice_is_rejected() {
    let app = test_app().await;
    let mut drive: Vec<_> = KICKOFF_DRIVE.to_vec();
    drive.push(("quarter", "9"));

    let res = post(&app, "/drive", &drive).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (_, listing) = get(&app, "/").await;
    assert_eq!(rows_of(&listing, "drive"), 0);
}

#[tokio::test]
async fn listing_partitions_records_by_kind() {
    let app = test_app().await;
    post(&app, "/play", THIRD_DOWN_PLAY).await;
    post(&app, "/addgame", BERLIN_GAME).await;
    post(&app, "/drive", KICKOFF_DRIVE).await;
    post(&app, "/play", THIRD_DOWN_PLAY).await;
    post(&app, "/drive", KICKOFF_DRIVE).await;
    post(&app, "/play", THIRD_DOWN_PLAY).await;

    let (_, body) = get(&app, "/").await;
    assert_eq!(rows_of(&body, "game"), 1);
    assert_eq!(rows_of(&body, "drive"), 2);
    assert_eq!(rows_of(&body, "play"), 3);
}

#[tokio::test]
async fn repeated_listing_is_identical() {
    let app = test_app().await;
    post(&app, "/addgame", BERLIN_GAME).await;
    post(&app, "/drive", KICKOFF_DRIVE).await;

    let (_, first) = get(&app, "/").await;
    let (_, second) = get(&app, "/").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn game_detail_is_looked_up_by_id() {
    let app = test_app().await;
    post(&app, "/addgame", BERLIN_GAME).await;

    let (status, body) = get(&app, "/game/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Berlin Thunder"));
    assert!(body.contains("01/05/2021"));

    let (status, body) = get(&app, "/game/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No game with id 3"));
    assert!(body.contains("<html"));

    let (status, _) = get(&app, "/game/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_failure_is_an_internal_error_page() {
    let (app, db_repo) = test_app_with_repo().await;
    db_repo.close().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("<html"));
    assert!(body.contains("An internal database error occurred"));

    let res = post(&app, "/addgame", BERLIN_GAME).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("<html"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = test_app().await;
    let (status, body) = get(&app, "/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404 Not Found"));
}

#[tokio::test]
async fn api_lists_tagged_records() {
    let app = test_app().await;
    post(&app, "/addgame", BERLIN_GAME).await;
    post(&app, "/drive", KICKOFF_DRIVE).await;

    let (status, body) = get(&app, "/api/records").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["kind"], "game");
    assert_eq!(records[0]["home"], "Berlin Thunder");
    assert_eq!(records[1]["kind"], "drive");
    assert_eq!(records[1]["quarter"], serde_json::Value::Null);

    let (status, body) = get(&app, "/api/games/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "No game with id 2");

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
