//! [`PgBookingStore`]: the PostgreSQL implementation of the core
//! [`BookingStore`] trait.
//!
//! A thin adapter over the repositories: each trait method is one query
//! plus row-to-entity conversion. Deliberately no transactions -- the
//! Seat-Hold Manager's check-then-write sequence is best-effort by design,
//! and no single method needs more than one statement.

use async_trait::async_trait;
use matinee_core::error::StoreError;
use matinee_core::store::{Booking, BookingStore, NewBooking, NewShow, Show};
use matinee_core::types::Timestamp;
use uuid::Uuid;

use crate::models::booking::BookingRow;
use crate::repositories::{BookingRepo, ShowRepo};
use crate::DbPool;

/// Booking storage backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn convert_rows(rows: Vec<BookingRow>) -> Result<Vec<Booking>, StoreError> {
    rows.into_iter().map(convert_row).collect()
}

/// A row that fails domain conversion means the table holds data this
/// build cannot interpret; log it with the offending id before
/// surfacing the storage error.
fn convert_row(row: BookingRow) -> Result<Booking, StoreError> {
    let booking_id = row.id;
    Booking::try_from(row).map_err(|err| {
        tracing::error!(booking_id = %booking_id, error = %err, "Booking row failed conversion");
        StoreError::backend(err)
    })
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert_show(&self, show: NewShow) -> Result<Show, StoreError> {
        let row = ShowRepo::create(&self.pool, &show)
            .await
            .map_err(StoreError::backend)?;
        Ok(row.into())
    }

    async fn list_active_shows(&self) -> Result<Vec<Show>, StoreError> {
        let rows = ShowRepo::list_active(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(rows.into_iter().map(Show::from).collect())
    }

    async fn get_show(&self, show_id: Uuid) -> Result<Option<Show>, StoreError> {
        let row = ShowRepo::find_by_id(&self.pool, show_id)
            .await
            .map_err(StoreError::backend)?;
        Ok(row.map(Show::from))
    }

    async fn paid_bookings(&self, show_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let rows = BookingRepo::list_paid(&self.pool, show_id)
            .await
            .map_err(StoreError::backend)?;
        convert_rows(rows)
    }

    async fn pending_bookings_since(
        &self,
        show_id: Uuid,
        cutoff: Timestamp,
    ) -> Result<Vec<Booking>, StoreError> {
        let rows = BookingRepo::list_pending_since(&self.pool, show_id, cutoff)
            .await
            .map_err(StoreError::backend)?;
        convert_rows(rows)
    }

    async fn paid_bookings_intersecting(
        &self,
        show_id: Uuid,
        seats: &[String],
    ) -> Result<Vec<Booking>, StoreError> {
        let rows = BookingRepo::list_paid_intersecting(&self.pool, show_id, seats)
            .await
            .map_err(StoreError::backend)?;
        convert_rows(rows)
    }

    async fn pending_bookings_intersecting_since(
        &self,
        show_id: Uuid,
        seats: &[String],
        cutoff: Timestamp,
    ) -> Result<Vec<Booking>, StoreError> {
        let rows =
            BookingRepo::list_pending_intersecting_since(&self.pool, show_id, seats, cutoff)
                .await
                .map_err(StoreError::backend)?;
        convert_rows(rows)
    }

    async fn get_booking(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, StoreError> {
        let row = BookingRepo::find_by_id(&self.pool, show_id, booking_id)
            .await
            .map_err(StoreError::backend)?;
        row.map(convert_row).transpose()
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let row = BookingRepo::create(&self.pool, &booking)
            .await
            .map_err(StoreError::backend)?;
        convert_row(row)
    }

    async fn mark_paid(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
        payment_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        let row = BookingRepo::mark_paid(&self.pool, show_id, booking_id, payment_id)
            .await
            .map_err(StoreError::backend)?;
        row.map(convert_row).transpose()
    }

    async fn mark_checked_in(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, StoreError> {
        let row = BookingRepo::mark_checked_in(&self.pool, show_id, booking_id)
            .await
            .map_err(StoreError::backend)?;
        row.map(convert_row).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(StoreError::backend)
    }
}
