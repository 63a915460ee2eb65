//! Repository for the `bookings` table.
//!
//! The availability reads mirror the Seat-Hold Manager's queries: paid
//! bookings, live pending bookings (created after a cutoff), and the
//! seat-intersection variants used by the conflict check. Seat-set
//! intersection is the Postgres array-overlap operator (`&&`) backed by a
//! GIN index.

use matinee_core::store::NewBooking;
use matinee_core::types::Timestamp;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::BookingRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, show_id, name, email, phone, seats, amount, status, \
                       order_id, payment_id, checked_in, checked_in_at, created_at";

/// Query methods for bookings. Rows are never deleted.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking; `id` and `created_at` are assigned server-side.
    pub async fn create(pool: &PgPool, input: &NewBooking) -> Result<BookingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (show_id, name, email, phone, seats, amount, status, order_id, payment_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(input.show_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.seats)
            .bind(input.amount)
            .bind(input.status.as_str())
            .bind(&input.order_id)
            .bind(&input.payment_id)
            .fetch_one(pool)
            .await
    }

    /// All paid bookings for a show.
    pub async fn list_paid(pool: &PgPool, show_id: Uuid) -> Result<Vec<BookingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE show_id = $1 AND status = 'paid'"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(show_id)
            .fetch_all(pool)
            .await
    }

    /// Pending bookings created strictly after `cutoff`.
    pub async fn list_pending_since(
        pool: &PgPool,
        show_id: Uuid,
        cutoff: Timestamp,
    ) -> Result<Vec<BookingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE show_id = $1 AND status = 'pending' AND created_at > $2"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(show_id)
            .bind(cutoff)
            .fetch_all(pool)
            .await
    }

    /// Paid bookings whose seat sets overlap `seats`.
    pub async fn list_paid_intersecting(
        pool: &PgPool,
        show_id: Uuid,
        seats: &[String],
    ) -> Result<Vec<BookingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE show_id = $1 AND status = 'paid' AND seats && $2"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(show_id)
            .bind(seats)
            .fetch_all(pool)
            .await
    }

    /// Pending bookings created strictly after `cutoff` whose seat sets
    /// overlap `seats`.
    pub async fn list_pending_intersecting_since(
        pool: &PgPool,
        show_id: Uuid,
        seats: &[String],
        cutoff: Timestamp,
    ) -> Result<Vec<BookingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE show_id = $1 AND status = 'pending' AND created_at > $2 AND seats && $3"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(show_id)
            .bind(cutoff)
            .bind(seats)
            .fetch_all(pool)
            .await
    }

    /// Point read, scoped to the show the booking belongs to.
    pub async fn find_by_id(
        pool: &PgPool,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<BookingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE id = $1 AND show_id = $2"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(booking_id)
            .bind(show_id)
            .fetch_optional(pool)
            .await
    }

    /// Transition to paid and attach the gateway payment reference.
    pub async fn mark_paid(
        pool: &PgPool,
        show_id: Uuid,
        booking_id: Uuid,
        payment_id: &str,
    ) -> Result<Option<BookingRow>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings
             SET status = 'paid', payment_id = $3
             WHERE id = $1 AND show_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(booking_id)
            .bind(show_id)
            .bind(payment_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark checked in with a server-side timestamp.
    pub async fn mark_checked_in(
        pool: &PgPool,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<BookingRow>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings
             SET checked_in = TRUE, checked_in_at = now()
             WHERE id = $1 AND show_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(booking_id)
            .bind(show_id)
            .fetch_optional(pool)
            .await
    }
}
