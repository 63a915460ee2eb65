//! Handlers for door check-in.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use matinee_core::holds::CheckIn;
use matinee_core::store::Booking;
use matinee_core::ticket::TicketPayload;
use matinee_core::types::Timestamp;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Response body for a check-in scan.
#[derive(Debug, Serialize)]
pub struct CheckInReport {
    pub status: &'static str,
    pub message: &'static str,
    pub name: String,
    pub seats: Vec<String>,
    /// When the ticket was redeemed. On a repeated scan this is the
    /// original timestamp, not the time of this scan.
    pub checked_in_at: Option<Timestamp>,
}

impl CheckInReport {
    fn new(status: &'static str, message: &'static str, booking: Booking) -> Self {
        Self {
            status,
            message,
            name: booking.name,
            seats: booking.seats,
            checked_in_at: booking.checked_in_at,
        }
    }
}

/// POST /api/v1/tickets/check-in
///
/// Body is the scanned QR payload. The first scan of a paid booking marks
/// it checked in and returns 200; any later scan returns 409 with the
/// original check-in report so door staff can see who redeemed it and when.
pub async fn check_in(
    State(state): State<AppState>,
    Json(payload): Json<TicketPayload>,
) -> AppResult<(StatusCode, Json<CheckInReport>)> {
    let outcome = state
        .manager
        .check_in(payload.show_id, payload.booking_id)
        .await?;

    let (status_code, report) = match outcome {
        CheckIn::Valid(booking) => (
            StatusCode::OK,
            CheckInReport::new("valid", "VALID TICKET", booking),
        ),
        CheckIn::AlreadyCheckedIn(booking) => (
            StatusCode::CONFLICT,
            CheckInReport::new("already_checked_in", "ALREADY CHECKED IN", booking),
        ),
    };

    Ok((status_code, Json(report)))
}
