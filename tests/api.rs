//! End-to-end tests for the HTTP API, driving the full router in-process.
//!
//! Each test builds a fresh app over an in-memory store, so nothing here
//! touches disk or a real socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use catflex_backend::routes::build_router;
use catflex_backend::state::AppState;
use catflex_backend::storage::MemoryStore;

fn test_app() -> Router {
    let state = AppState::with_content(None, Arc::new(MemoryStore::default()));
    build_router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => Request::builder().method(method).uri(uri).body(Body::empty()).expect("request"),
    };
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// Solve `ordinal` with a known-good submission and return the check body.
async fn solve(app: &Router, ordinal: usize, css: &str) -> Value {
    let (status, body) =
        post(app, "/api/v1/check", json!({ "ordinal": ordinal, "css": css })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["solved"], true, "expected a solve for level {}: {}", ordinal, body);
    body
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let (status, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn fresh_session_has_defaults_and_no_progress() {
    let app = test_app();
    let (status, body) = get(&app, "/api/v1/session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], Value::Null);
    assert_eq!(body["darkMode"], false);
    assert_eq!(body["language"], "en");
    assert_eq!(body["themeId"], "cats");
    assert_eq!(body["progress"], json!([]));
    assert_eq!(body["completedCount"], 0);
    assert_eq!(body["totalChallenges"], 9);
    assert_eq!(body["overallPercent"], 0);
}

#[tokio::test]
async fn challenge_list_locks_everything_past_level_zero() {
    let app = test_app();
    let (status, body) = get(&app, "/api/v1/challenges").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 9);

    assert_eq!(rows[0]["unlocked"], true);
    assert_eq!(rows[0]["completed"], false);
    assert_eq!(rows[0]["bestScore"], Value::Null);
    for row in &rows[1..] {
        assert_eq!(row["unlocked"], false);
    }
    assert_eq!(rows[0]["tier"], "beginner");
    assert_eq!(rows[4]["tier"], "intermediate");
    assert_eq!(rows[7]["tier"], "advanced");
}

#[tokio::test]
async fn challenge_delivery_keeps_hints_and_rules_server_side() {
    let app = test_app();
    let (status, body) = get(&app, "/api/v1/challenge?ordinal=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ordinal"], 0);
    assert_eq!(body["title"], "Basic Row Layout");
    assert_eq!(body["tier"], "beginner");
    assert!(body["startingCode"].as_str().expect("startingCode").contains("display: flex"));
    assert_eq!(body["hintCount"], 3);
    assert_eq!(body["targetPositions"].as_array().expect("targets").len(), 3);
    assert_eq!(body["targetPositions"][0], json!({ "x": 25, "y": 50 }));
    assert_eq!(body["learningObjective"], "Understanding flex-direction property");
    assert!(body.get("hints").is_none());
    assert!(body.get("rule").is_none());

    let (status, body) = get(&app, "/api/v1/challenge?ordinal=99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().expect("error").contains("99"));
}

#[tokio::test]
async fn preview_merges_submission_over_the_baseline() {
    let app = test_app();
    let (status, body) = post(
        &app,
        "/api/v1/preview",
        json!({ "css": "justify-content: center;\ngap: 10px;" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let declarations = body["declarations"].as_array().expect("declarations");

    let pairs: Vec<(&str, &str)> = declarations
        .iter()
        .map(|d| {
            (d["property"].as_str().expect("property"), d["value"].as_str().expect("value"))
        })
        .collect();
    assert_eq!(pairs[0], ("display", "flex"));
    assert!(pairs.contains(&("width", "100%")));
    assert!(pairs.contains(&("height", "350px")));
    assert!(pairs.contains(&("justify-content", "center")));
    assert!(pairs.contains(&("gap", "10px")));
}

#[tokio::test]
async fn solving_a_level_updates_session_and_unlocks_the_next() {
    let app = test_app();
    let css = ".flex-container {\n  display: flex;\n  flex-direction: row;\n}";
    let (status, body) = post(
        &app,
        "/api/v1/check",
        json!({ "ordinal": 0, "css": css, "attempts": 2, "hintsUsed": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["solved"], true);
    assert_eq!(body["score"], 100);
    assert_eq!(body["bestScore"], 100);
    assert_eq!(body["tierCompleted"], Value::Null);
    assert_eq!(body["nextOrdinal"], 1);

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["completedCount"], 1);
    assert_eq!(session["overallPercent"], 11);
    let entry = &session["progress"][0];
    assert_eq!(entry["level"], 0);
    assert_eq!(entry["completed"], true);
    assert_eq!(entry["score"], 100);
    assert_eq!(entry["attempts"], 2);
    assert_eq!(entry["hintsUsed"], 1);
    assert!(entry["completedAt"].is_string());

    let (_, rows) = get(&app, "/api/v1/challenges").await;
    assert_eq!(rows[1]["unlocked"], true);
    assert_eq!(rows[2]["unlocked"], false);
}

#[tokio::test]
async fn finishing_level_three_completes_the_beginner_tier() {
    let app = test_app();
    let solutions = [
        "display: flex;",
        "flex-direction: column;",
        "justify-content: center;",
        "align-items: center;",
    ];
    for (ordinal, css) in solutions.iter().enumerate() {
        let body = solve(&app, ordinal, css).await;
        if ordinal == 3 {
            assert_eq!(body["tierCompleted"], "beginner");
            assert_eq!(body["nextOrdinal"], 4);
        } else {
            assert_eq!(body["tierCompleted"], Value::Null);
        }
    }

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["completedCount"], 4);
    assert_eq!(session["overallPercent"], 44);
}

#[tokio::test]
async fn invalid_syntax_is_rejected_with_the_offending_line() {
    let app = test_app();
    let (status, body) = post(
        &app,
        "/api/v1/check",
        json!({ "ordinal": 0, "css": "display flex", "attempts": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["solved"], false);
    let message = body["message"].as_str().expect("message");
    assert!(message.starts_with("Invalid CSS syntax:"));
    assert!(message.contains("display flex"));

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["completedCount"], 0);
}

#[tokio::test]
async fn wrong_answers_get_a_localized_personal_nudge() {
    let app = test_app();
    post(&app, "/api/v1/session", json!({ "username": "Mona", "language": "ar" })).await;

    let (status, body) = post(
        &app,
        "/api/v1/check",
        json!({ "ordinal": 1, "css": "display: flex;" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["solved"], false);
    let message = body["message"].as_str().expect("message");
    assert!(message.contains("Mona"));
    assert!(message.contains("CSS"));
}

#[tokio::test]
async fn best_score_survives_a_worse_rerun() {
    let app = test_app();
    let css = "justify-content: center;";
    let first = solve(&app, 2, css).await;
    assert_eq!(first["score"], 100);

    let (_, second) = post(
        &app,
        "/api/v1/check",
        json!({ "ordinal": 2, "css": css, "attempts": 30, "hintsUsed": 2 }),
    )
    .await;
    assert_eq!(second["solved"], true);
    assert_eq!(second["score"], 80);
    assert_eq!(second["bestScore"], 100);

    let (_, session) = get(&app, "/api/v1/session").await;
    let entry = &session["progress"][0];
    assert_eq!(entry["score"], 100);
    assert_eq!(entry["attempts"], 30);
    assert_eq!(entry["hintsUsed"], 2);
}

#[tokio::test]
async fn hint_score_and_format_endpoints() {
    let app = test_app();

    let (status, body) = get(&app, "/api/v1/hint?ordinal=0&hintsUsed=2").await;
    assert_eq!(status, StatusCode::OK);
    let hints = body["hints"].as_array().expect("hints");
    assert_eq!(hints.len(), 2);
    assert_eq!(hints[0], "First, you need to make the container a flex container (already done!)");
    assert_eq!(body["remaining"], 1);

    let (status, body) = get(&app, "/api/v1/hint?ordinal=42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().expect("error").contains("42"));

    let (status, body) = get(&app, "/api/v1/score?attempts=25&hintsUsed=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 80);

    let (status, body) = post(
        &app,
        "/api/v1/format",
        json!({ "css": ".flex-container {\n   display: flex;   \n\n}" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["css"], ".flex-container {\n  display: flex;\n}");
}

#[tokio::test]
async fn session_patch_validates_each_field() {
    let app = test_app();
    let (status, body) = post(
        &app,
        "/api/v1/session",
        json!({ "username": " Omar ", "darkMode": true, "language": "ar", "themeId": "space" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "Omar");
    assert_eq!(body["darkMode"], true);
    assert_eq!(body["language"], "ar");
    assert_eq!(body["themeId"], "space");

    // Unknown theme is ignored, the rest of the session is untouched.
    let (_, body) = post(&app, "/api/v1/session", json!({ "themeId": "volcanoes" })).await;
    assert_eq!(body["themeId"], "space");
    assert_eq!(body["username"], "Omar");

    // A blank name clears the welcome state.
    let (_, body) = post(&app, "/api/v1/session", json!({ "username": "   " })).await;
    assert_eq!(body["username"], Value::Null);
}

#[tokio::test]
async fn progress_reset_relocks_levels() {
    let app = test_app();
    solve(&app, 0, "display: flex;").await;

    let (status, body) = send(&app, Method::POST, "/api/v1/progress/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completedCount"], 0);
    assert_eq!(body["progress"], json!([]));

    let (_, rows) = get(&app, "/api/v1/challenges").await;
    assert_eq!(rows[1]["unlocked"], false);
}

#[tokio::test]
async fn themes_catalog_is_complete() {
    let app = test_app();
    let (status, body) = get(&app, "/api/v1/themes").await;
    assert_eq!(status, StatusCode::OK);
    let themes = body.as_array().expect("themes");
    assert_eq!(themes.len(), 4);

    let ids: Vec<&str> = themes.iter().map(|t| t["id"].as_str().expect("id")).collect();
    assert_eq!(ids, ["cats", "space", "food", "robots"]);
    assert_eq!(themes[0]["elements"]["emoji"].as_array().expect("emoji").len(), 3);
    assert_eq!(themes[0]["elements"]["names"][0], "Whiskers");
    assert_eq!(themes[0]["celebrationAnimation"], "animate-bounce");
}

#[tokio::test]
async fn ui_strings_follow_the_requested_language() {
    let app = test_app();
    let (status, body) = get(&app, "/api/v1/strings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lang"], "en");
    assert_eq!(body["strings"]["title"], "CatFlex");

    let (_, body) = get(&app, "/api/v1/strings?lang=ar").await;
    assert_eq!(body["lang"], "ar");
    assert_eq!(body["strings"]["title"], "كات فليكس");

    // Unknown codes fall back to the session language.
    let (_, body) = get(&app, "/api/v1/strings?lang=fr").await;
    assert_eq!(body["lang"], "en");
}

#[tokio::test]
async fn similar_solutions_do_not_cross_levels() {
    let app = test_app();
    let css = ".flex-container {\n  display: flex;\n  flex-direction: row-reverse;\n  justify-content: space-between;\n}";

    let body = solve(&app, 4, css).await;
    assert_eq!(body["tierCompleted"], Value::Null);

    let (status, body) = post(&app, "/api/v1/check", json!({ "ordinal": 5, "css": css })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["solved"], false);
}
