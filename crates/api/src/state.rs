use std::sync::Arc;

use matinee_core::holds::SeatHoldManager;
use matinee_core::store::BookingStore;
use matinee_delivery::email::TicketMailer;

use crate::config::ServerConfig;
use crate::payment::PaymentGateway;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Booking storage backend (Postgres in production, in-memory in tests).
    pub store: Arc<dyn BookingStore>,
    /// Seat-hold protocol engine.
    pub manager: Arc<SeatHoldManager>,
    /// Payment gateway client.
    pub gateway: Arc<dyn PaymentGateway>,
    /// Ticket mailer; `None` when SMTP is not configured.
    pub mailer: Option<Arc<TicketMailer>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
