//! Integration tests for show management and seat availability endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, seed_show};
use serde_json::json;

fn create_show_body(password: &str) -> serde_json::Value {
    json!({
        "name": "Night Show",
        "screen": "Screen 1",
        "starts_at": "2026-09-01T19:00:00Z",
        "password": password,
    })
}

// ---------------------------------------------------------------------------
// Test: show creation requires the admin password
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_show_with_wrong_password_returns_401() {
    let (app, _store) = build_test_app();

    let response = post_json(app, "/api/v1/admin/shows", create_show_body("nope")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: show creation succeeds and the show appears in the listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_show_appears_in_listing() {
    let (app, _store) = build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/admin/shows",
        create_show_body("admin123"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert!(created["id"].is_string());
    assert_eq!(created["name"], "Night Show");

    let response = get(app, "/api/v1/shows").await;
    assert_eq!(response.status(), StatusCode::OK);

    let shows = body_json(response).await;
    let shows = shows.as_array().expect("listing must be an array");
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0]["name"], "Night Show");
    assert_eq!(shows[0]["screen"], "Screen 1");
}

// ---------------------------------------------------------------------------
// Test: empty show name is rejected even with the right password
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_show_with_empty_name_returns_400() {
    let (app, _store) = build_test_app();

    let body = json!({
        "name": "",
        "screen": "Screen 1",
        "starts_at": "2026-09-01T19:00:00Z",
        "password": "admin123",
    });
    let response = post_json(app, "/api/v1/admin/shows", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: seat listing for an empty show is empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seat_listing_is_empty_for_a_fresh_show() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = get(app, &format!("/api/v1/shows/{show_id}/seats")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let seats = body_json(response).await;
    assert_eq!(seats, json!([]));
}
