//! Booking entities and the storage collaborator trait.
//!
//! The storage backend is injected into the Seat-Hold Manager behind
//! [`BookingStore`] rather than reached through a module-level singleton, so
//! the manager's logic runs unchanged against PostgreSQL in production and
//! against [`memory::MemoryStore`] in tests.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Lifecycle state of a booking. Transitions only `Pending -> Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// A provisional hold; counts toward held seats only while younger than
    /// the hold window.
    Pending,
    /// Payment verified; counts toward held seats unconditionally.
    Paid,
}

impl BookingStatus {
    /// Storage representation (`pending` / `paid`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Paid => "paid",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "paid" => Ok(BookingStatus::Paid),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// A single event showing. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Show {
    pub id: Uuid,
    pub name: String,
    /// Screen / venue label displayed on tickets.
    pub screen: String,
    pub starts_at: Timestamp,
    pub is_active: bool,
}

/// Input for creating a show.
#[derive(Debug, Clone)]
pub struct NewShow {
    pub name: String,
    pub screen: String,
    pub starts_at: Timestamp,
}

/// A booking row: a seat hold that may have been paid and checked in.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub show_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Seat-codes claimed by this booking. Immutable after creation.
    pub seats: Vec<String>,
    /// Total price in whole currency units.
    pub amount: i64,
    pub status: BookingStatus,
    /// Gateway order reference attached at hold time.
    pub order_id: Option<String>,
    /// Gateway payment reference stored at confirmation.
    pub payment_id: Option<String>,
    pub checked_in: bool,
    pub checked_in_at: Option<Timestamp>,
    /// Assigned by the storage layer at insert time. Hold expiry is derived
    /// from this, never stored.
    pub created_at: Timestamp,
}

/// Input for inserting a booking. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub show_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub seats: Vec<String>,
    pub amount: i64,
    pub status: BookingStatus,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
}

// ---------------------------------------------------------------------------
// BookingStore
// ---------------------------------------------------------------------------

/// Storage collaborator for shows and bookings.
///
/// The read methods mirror the distinct availability queries the Seat-Hold
/// Manager performs: all paid bookings, all live pending bookings, and the
/// seat-intersection variants used by the conflict check. "Intersecting"
/// means the booking's seat set shares at least one seat-code with the
/// given set.
///
/// No method is transactional; the manager's check-then-write sequence is
/// intentionally best-effort (see the crate-level notes on the reserve
/// race).
#[async_trait]
pub trait BookingStore: Send + Sync {
    // -- Shows --------------------------------------------------------------

    /// Insert a show, assigning its id.
    async fn insert_show(&self, show: NewShow) -> Result<Show, StoreError>;

    /// All active shows, ordered by start time ascending.
    async fn list_active_shows(&self) -> Result<Vec<Show>, StoreError>;

    /// Point read of a show.
    async fn get_show(&self, show_id: Uuid) -> Result<Option<Show>, StoreError>;

    // -- Booking reads ------------------------------------------------------

    /// All paid bookings for a show.
    async fn paid_bookings(&self, show_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    /// All pending bookings for a show created strictly after `cutoff`.
    async fn pending_bookings_since(
        &self,
        show_id: Uuid,
        cutoff: Timestamp,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Paid bookings whose seat sets intersect `seats`.
    async fn paid_bookings_intersecting(
        &self,
        show_id: Uuid,
        seats: &[String],
    ) -> Result<Vec<Booking>, StoreError>;

    /// Pending bookings created strictly after `cutoff` whose seat sets
    /// intersect `seats`.
    async fn pending_bookings_intersecting_since(
        &self,
        show_id: Uuid,
        seats: &[String],
        cutoff: Timestamp,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Point read of a booking, scoped to its show.
    async fn get_booking(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, StoreError>;

    // -- Booking writes -----------------------------------------------------

    /// Insert a booking, assigning its id and server-side `created_at`.
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    /// Transition a booking to paid and attach the payment reference.
    /// Returns the updated row, or `None` if the booking does not exist.
    async fn mark_paid(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
        payment_id: &str,
    ) -> Result<Option<Booking>, StoreError>;

    /// Mark a booking checked in with a server-side timestamp.
    /// Returns the updated row, or `None` if the booking does not exist.
    async fn mark_checked_in(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, StoreError>;

    // -- Health -------------------------------------------------------------

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
