use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use matinee_core::error::HoldError;
use serde_json::json;

use crate::payment::PaymentError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`HoldError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `matinee_core`.
    #[error(transparent)]
    Hold(#[from] HoldError),

    /// A payment gateway error from the REST client.
    #[error("Payment gateway error: {0}")]
    Payment(#[from] PaymentError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The admin password did not match.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- HoldError variants ---
            AppError::Hold(hold) => match hold {
                HoldError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                HoldError::SeatConflict { seat, reason } => (
                    StatusCode::CONFLICT,
                    "SEAT_CONFLICT",
                    format!("Seat {seat} is unavailable: {reason}"),
                ),
                HoldError::InvalidSignature => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_SIGNATURE",
                    "Payment signature verification failed".to_string(),
                ),
                HoldError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                HoldError::NotPaid(id) => (
                    StatusCode::BAD_REQUEST,
                    "NOT_PAID",
                    format!("Booking {id} has not been paid for"),
                ),
                HoldError::Store(err) => {
                    tracing::error!(error = %err, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Payment gateway errors ---
            AppError::Payment(err) => {
                tracing::error!(error = %err, "Payment gateway error");
                (
                    StatusCode::BAD_GATEWAY,
                    "PAYMENT_GATEWAY_ERROR",
                    "Could not create payment order".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
