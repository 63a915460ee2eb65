//! In-memory [`BookingStore`] implementation.
//!
//! Backs the Seat-Hold Manager's unit tests and the api crate's integration
//! tests, which exercise the full HTTP stack without a database. Uses a
//! plain `Mutex` held only for the duration of each call; nothing here is
//! performance-sensitive.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::Timestamp;

use super::{Booking, BookingStatus, BookingStore, NewBooking, NewShow, Show};

/// Thread-safe in-memory store for shows and bookings.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    shows: HashMap<Uuid, Show>,
    bookings: Vec<Booking>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite a booking's creation timestamp.
    ///
    /// Test hook for exercising hold expiry without sleeping through the
    /// hold window. Panics if the booking does not exist.
    pub fn backdate_booking(&self, booking_id: Uuid, created_at: Timestamp) {
        let mut inner = self.inner.lock().expect("memory store lock");
        let booking = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .expect("backdate_booking: unknown booking");
        booking.created_at = created_at;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock")
    }
}

fn intersects(seats: &[String], other: &[String]) -> bool {
    seats.iter().any(|s| other.contains(s))
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_show(&self, show: NewShow) -> Result<Show, StoreError> {
        let row = Show {
            id: Uuid::new_v4(),
            name: show.name,
            screen: show.screen,
            starts_at: show.starts_at,
            is_active: true,
        };
        self.lock().shows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_active_shows(&self) -> Result<Vec<Show>, StoreError> {
        let mut shows: Vec<Show> = self
            .lock()
            .shows
            .values()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        shows.sort_by_key(|s| s.starts_at);
        Ok(shows)
    }

    async fn get_show(&self, show_id: Uuid) -> Result<Option<Show>, StoreError> {
        Ok(self.lock().shows.get(&show_id).cloned())
    }

    async fn paid_bookings(&self, show_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .lock()
            .bookings
            .iter()
            .filter(|b| b.show_id == show_id && b.status == BookingStatus::Paid)
            .cloned()
            .collect())
    }

    async fn pending_bookings_since(
        &self,
        show_id: Uuid,
        cutoff: Timestamp,
    ) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .lock()
            .bookings
            .iter()
            .filter(|b| {
                b.show_id == show_id
                    && b.status == BookingStatus::Pending
                    && b.created_at > cutoff
            })
            .cloned()
            .collect())
    }

    async fn paid_bookings_intersecting(
        &self,
        show_id: Uuid,
        seats: &[String],
    ) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .lock()
            .bookings
            .iter()
            .filter(|b| {
                b.show_id == show_id
                    && b.status == BookingStatus::Paid
                    && intersects(seats, &b.seats)
            })
            .cloned()
            .collect())
    }

    async fn pending_bookings_intersecting_since(
        &self,
        show_id: Uuid,
        seats: &[String],
        cutoff: Timestamp,
    ) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .lock()
            .bookings
            .iter()
            .filter(|b| {
                b.show_id == show_id
                    && b.status == BookingStatus::Pending
                    && b.created_at > cutoff
                    && intersects(seats, &b.seats)
            })
            .cloned()
            .collect())
    }

    async fn get_booking(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .lock()
            .bookings
            .iter()
            .find(|b| b.id == booking_id && b.show_id == show_id)
            .cloned())
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let row = Booking {
            id: Uuid::new_v4(),
            show_id: booking.show_id,
            name: booking.name,
            email: booking.email,
            phone: booking.phone,
            seats: booking.seats,
            amount: booking.amount,
            status: booking.status,
            order_id: booking.order_id,
            payment_id: booking.payment_id,
            checked_in: false,
            checked_in_at: None,
            created_at: Utc::now(),
        };
        self.lock().bookings.push(row.clone());
        Ok(row)
    }

    async fn mark_paid(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
        payment_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        let mut inner = self.lock();
        let Some(booking) = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id && b.show_id == show_id)
        else {
            return Ok(None);
        };
        booking.status = BookingStatus::Paid;
        booking.payment_id = Some(payment_id.to_string());
        Ok(Some(booking.clone()))
    }

    async fn mark_checked_in(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, StoreError> {
        let mut inner = self.lock();
        let Some(booking) = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id && b.show_id == show_id)
        else {
            return Ok(None);
        };
        booking.checked_in = true;
        booking.checked_in_at = Some(Utc::now());
        Ok(Some(booking.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
