//! End-to-end booking flow tests: order creation, seat conflicts, payment
//! verification, replays, and hold expiry.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, get, post_json, seed_show, TEST_PAYMENT_SECRET};
use matinee_core::payment::payment_signature;
use serde_json::json;
use uuid::Uuid;

fn order_body(show_id: Uuid, seats: &[&str]) -> serde_json::Value {
    json!({
        "show_id": show_id,
        "name": "Asha",
        "email": "asha@example.com",
        "phone": "9999999999",
        "seats": seats,
    })
}

// ---------------------------------------------------------------------------
// Test: creating an order opens a hold and prices it correctly
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_order_returns_checkout_details() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/orders",
        order_body(show_id, &["A1", "A2"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let order = body_json(response).await;
    assert_eq!(order["key"], "rzp_test_key");
    assert_eq!(order["order_id"], "order_test_1");
    // 2 seats x 30 per seat x 100 minor units.
    assert_eq!(order["amount"], 6000);
    assert!(order["booking_id"].is_string());

    // The held seats now include the new hold.
    let response = get(app, &format!("/api/v1/shows/{show_id}/seats")).await;
    let seats = body_json(response).await;
    assert_eq!(seats, json!(["A1", "A2"]));
}

// ---------------------------------------------------------------------------
// Test: overlapping hold is rejected with 409 naming the seat
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overlapping_order_returns_409() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/orders",
        order_body(show_id, &["A1", "A2"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/v1/bookings/orders",
        order_body(show_id, &["A2", "A3"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "SEAT_CONFLICT");
    assert!(
        json["error"].as_str().unwrap().contains("A2"),
        "conflict message should name the offending seat"
    );
}

// ---------------------------------------------------------------------------
// Test: full happy path, hold -> verify -> paid
// ---------------------------------------------------------------------------

#[tokio::test]
async fn verify_with_valid_signature_confirms_the_booking() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/orders",
        order_body(show_id, &["B1"]),
    )
    .await;
    let order = body_json(response).await;
    let order_id = order["order_id"].as_str().unwrap().to_string();
    let booking_id = order["booking_id"].as_str().unwrap().to_string();

    let signature = payment_signature(TEST_PAYMENT_SECRET, &order_id, "pay_1");
    let response = post_json(
        app.clone(),
        "/api/v1/bookings/verify",
        json!({
            "show_id": show_id,
            "booking_id": booking_id,
            "order_id": order_id,
            "payment_id": "pay_1",
            "signature": signature,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "confirmed");

    // A paid seat conflicts unconditionally, even for a fresh purchaser.
    let response = post_json(
        app,
        "/api/v1/bookings/orders",
        order_body(show_id, &["B1"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: replayed verification reports success without re-checking the proof
// ---------------------------------------------------------------------------

#[tokio::test]
async fn replayed_verification_is_a_noop_success() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/orders",
        order_body(show_id, &["C1"]),
    )
    .await;
    let order = body_json(response).await;
    let order_id = order["order_id"].as_str().unwrap().to_string();
    let booking_id = order["booking_id"].as_str().unwrap().to_string();

    let signature = payment_signature(TEST_PAYMENT_SECRET, &order_id, "pay_2");
    let verify = json!({
        "show_id": show_id,
        "booking_id": booking_id,
        "order_id": order_id,
        "payment_id": "pay_2",
        "signature": signature,
    });

    let response = post_json(app.clone(), "/api/v1/bookings/verify", verify.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Replay with a garbage signature: the booking is already paid, so the
    // proof is irrelevant and the call still reports success.
    let mut replay = verify;
    replay["signature"] = json!("not-a-signature");
    let response = post_json(app, "/api/v1/bookings/verify", replay).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "already_confirmed");
}

// ---------------------------------------------------------------------------
// Test: bad signature on a live hold is rejected with 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn verify_with_bad_signature_returns_400() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/orders",
        order_body(show_id, &["D1"]),
    )
    .await;
    let order = body_json(response).await;

    let response = post_json(
        app,
        "/api/v1/bookings/verify",
        json!({
            "show_id": show_id,
            "booking_id": order["booking_id"],
            "order_id": order["order_id"],
            "payment_id": "pay_3",
            "signature": "deadbeef",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_SIGNATURE");
}

// ---------------------------------------------------------------------------
// Test: verifying an unknown booking returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn verify_unknown_booking_returns_404() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app,
        "/api/v1/bookings/verify",
        json!({
            "show_id": show_id,
            "booking_id": Uuid::new_v4(),
            "order_id": "order_x",
            "payment_id": "pay_x",
            "signature": "whatever",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: an expired hold releases its seats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn expired_hold_releases_the_seats() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/orders",
        order_body(show_id, &["E1"]),
    )
    .await;
    let order = body_json(response).await;
    let booking_id: Uuid = order["booking_id"].as_str().unwrap().parse().unwrap();

    // Age the hold past the 10-minute window.
    store.backdate_booking(booking_id, Utc::now() - Duration::minutes(11));

    // The seat no longer shows as held...
    let response = get(app.clone(), &format!("/api/v1/shows/{show_id}/seats")).await;
    assert_eq!(body_json(response).await, json!([]));

    // ...and a new purchaser can take it.
    let response = post_json(
        app,
        "/api/v1/bookings/orders",
        order_body(show_id, &["E1"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: the skip-payment path creates a paid booking under the same rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_booking_is_paid_immediately_and_blocks_seats() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/test",
        order_body(show_id, &["F1"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["booking_id"].is_string());

    // The seat conflicts as already booked, not as a pending hold.
    let response = post_json(
        app,
        "/api/v1/bookings/orders",
        order_body(show_id, &["F1"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("already booked"));
}

// ---------------------------------------------------------------------------
// Test: purchaser validation failures return 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn order_with_invalid_email_returns_400() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let mut body = order_body(show_id, &["G1"]);
    body["email"] = json!("not-an-email");

    let response = post_json(app, "/api/v1/bookings/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_with_duplicate_seats_is_rejected_before_the_gateway() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(
        app.clone(),
        "/api/v1/bookings/orders",
        order_body(show_id, &["A1", "A1"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // The rejected request must not have opened a gateway order: the next
    // valid reservation receives the gateway's first order id.
    let response = post_json(
        app,
        "/api/v1/bookings/orders",
        order_body(show_id, &["A1"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["order_id"], "order_test_1");
}

#[tokio::test]
async fn order_with_no_seats_returns_400() {
    let (app, store) = build_test_app();
    let show_id = seed_show(&store).await;

    let response = post_json(app, "/api/v1/bookings/orders", order_body(show_id, &[])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
