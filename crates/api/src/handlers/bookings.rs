//! Handlers for the booking flow: order creation, payment verification, and
//! the skip-payment test path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use matinee_core::holds::{Confirmation, PaymentProof, Purchaser, ReserveRequest};
use matinee_core::store::Booking;
use matinee_delivery::email::Ticket;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Order creation
// ---------------------------------------------------------------------------

/// Request body for creating a payment order and seat hold.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrder {
    pub show_id: Uuid,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "at least one seat is required"))]
    pub seats: Vec<String>,
}

/// Response body for a created order: everything the browser checkout
/// widget needs.
#[derive(Debug, Serialize)]
pub struct OrderCreated {
    /// Gateway public key id.
    pub key: String,
    /// Gateway order id to open checkout against.
    pub order_id: String,
    /// Hold id; echoed back at verification.
    pub booking_id: Uuid,
    /// Amount in minor currency units, as registered with the gateway.
    pub amount: i64,
}

/// POST /api/v1/bookings/orders
///
/// Checks seat availability, registers an order with the payment gateway
/// for `seats x price` (in minor units), then creates the pending hold
/// carrying the gateway order id. The full reservation validation and the
/// availability check both run before the gateway call so a bad or
/// obviously taken request fails without leaving a dangling gateway
/// order; [`reserve`](matinee_core::holds::SeatHoldManager::reserve)
/// re-checks right before the insert.
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<Json<OrderCreated>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let purchaser = Purchaser {
        name: input.name,
        email: input.email,
        phone: input.phone,
    };
    matinee_core::holds::validate_reservation(&input.seats, &purchaser)?;

    state
        .manager
        .check_conflicts(input.show_id, &input.seats)
        .await?;

    let amount_minor = state.manager.unit_price() * input.seats.len() as i64 * 100;
    let receipt = format!("receipt_{}", Utc::now().timestamp_millis());
    let order = state
        .gateway
        .create_order(amount_minor, "INR", &receipt)
        .await?;

    let hold = state
        .manager
        .reserve(
            input.show_id,
            ReserveRequest {
                seats: input.seats,
                purchaser,
                order_id: Some(order.id.clone()),
            },
        )
        .await?;

    Ok(Json(OrderCreated {
        key: state.gateway.key_id().to_string(),
        order_id: order.id,
        booking_id: hold.booking_id,
        amount: order.amount_minor,
    }))
}

// ---------------------------------------------------------------------------
// Payment verification
// ---------------------------------------------------------------------------

/// Request body for verifying a completed payment.
#[derive(Debug, Deserialize)]
pub struct VerifyPayment {
    pub show_id: Uuid,
    pub booking_id: Uuid,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Response body for a verified payment.
#[derive(Debug, Serialize)]
pub struct PaymentVerified {
    pub status: &'static str,
    pub message: &'static str,
    pub booking_id: Uuid,
}

/// POST /api/v1/bookings/verify
///
/// Verifies the gateway's payment signature and transitions the hold to
/// paid. Replays of an already-confirmed booking report success without
/// mutating anything. The ticket email is sent best-effort; delivery
/// failure never fails the confirmation.
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(input): Json<VerifyPayment>,
) -> AppResult<Json<PaymentVerified>> {
    let outcome = state
        .manager
        .confirm(
            input.show_id,
            input.booking_id,
            PaymentProof {
                order_id: input.order_id,
                payment_id: input.payment_id,
                signature: input.signature,
            },
        )
        .await?;

    let (status, message) = match &outcome {
        Confirmation::Confirmed(booking) => {
            deliver_ticket(&state, booking, false).await;
            (
                "confirmed",
                "Booking confirmed. Check your email for the QR ticket.",
            )
        }
        Confirmation::AlreadyConfirmed(_) => {
            ("already_confirmed", "This booking is already confirmed.")
        }
    };

    Ok(Json(PaymentVerified {
        status,
        message,
        booking_id: outcome.booking().id,
    }))
}

// ---------------------------------------------------------------------------
// Test bookings
// ---------------------------------------------------------------------------

/// Request body for the skip-payment test path.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestBooking {
    pub show_id: Uuid,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "at least one seat is required"))]
    pub seats: Vec<String>,
}

/// Response body for a created test booking.
#[derive(Debug, Serialize)]
pub struct TestBookingCreated {
    pub message: &'static str,
    pub booking_id: Uuid,
}

/// POST /api/v1/bookings/test
///
/// Creates a booking directly as paid without touching the gateway. Seat
/// conflict rules apply exactly as on the real path; the ticket email is
/// flagged as a test booking.
pub async fn create_test_booking(
    State(state): State<AppState>,
    Json(input): Json<CreateTestBooking>,
) -> AppResult<(StatusCode, Json<TestBookingCreated>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let booking = state
        .manager
        .reserve_paid(
            input.show_id,
            input.seats,
            Purchaser {
                name: input.name,
                email: input.email,
                phone: input.phone,
            },
        )
        .await?;

    deliver_ticket(&state, &booking, true).await;

    Ok((
        StatusCode::CREATED,
        Json(TestBookingCreated {
            message: "Test booking confirmed. Check your email for the QR ticket.",
            booking_id: booking.id,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Ticket delivery
// ---------------------------------------------------------------------------

/// Send the ticket email for a confirmed booking, best-effort.
///
/// Failures are logged and swallowed: the booking is already paid, and a
/// missing email must never surface as a payment error.
pub(crate) async fn deliver_ticket(state: &AppState, booking: &Booking, test_mode: bool) {
    let Some(mailer) = &state.mailer else {
        tracing::debug!(booking_id = %booking.id, "SMTP not configured, skipping ticket email");
        return;
    };

    let show = match state.store.get_show(booking.show_id).await {
        Ok(show) => show,
        Err(err) => {
            tracing::warn!(error = %err, booking_id = %booking.id, "Show lookup failed for ticket email");
            None
        }
    };

    let ticket = Ticket::for_booking(booking, show.as_ref(), test_mode);
    if let Err(err) = mailer.send_ticket(&booking.email, &ticket).await {
        tracing::warn!(error = %err, booking_id = %booking.id, "Ticket email failed");
    }
}
