pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/shows                 create show (POST, admin password)
///
/// /shows                       list active shows (GET)
/// /shows/{show_id}/seats       held seat-codes for a show (GET)
///
/// /bookings/orders             open payment order + seat hold (POST)
/// /bookings/verify             verify payment, confirm booking (POST)
/// /bookings/test               skip-payment test booking (POST)
///
/// /tickets/check-in            redeem a scanned QR ticket (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/shows", post(handlers::shows::create))
        .route("/shows", get(handlers::shows::list))
        .route("/shows/{show_id}/seats", get(handlers::shows::held_seats))
        .route("/bookings/orders", post(handlers::bookings::create_order))
        .route("/bookings/verify", post(handlers::bookings::verify_payment))
        .route("/bookings/test", post(handlers::bookings::create_test_booking))
        .route("/tickets/check-in", post(handlers::tickets::check_in))
}
