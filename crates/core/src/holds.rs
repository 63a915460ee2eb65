//! The Seat-Hold Manager.
//!
//! Availability for a show is derived from two overlapping booking states:
//! `paid` bookings hold their seats unconditionally, and `pending` bookings
//! hold theirs only while younger than the hold window. Expiry is never
//! stored -- it is recomputed from `(status, created_at, now)` on every read,
//! so there is no sweeper job and no row is ever deleted.
//!
//! The conflict check before a new hold is a two-stage query (paid first,
//! then live pending) followed by an insert. The check-then-write pair is
//! deliberately not transactional: two concurrent `reserve` calls for the
//! same seat can both pass the check and double-hold. The window is narrow
//! and the race resolves at payment time, since only one payer completes
//! signature verification for a given gateway order.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::{ConflictReason, HoldError};
use crate::payment::verify_payment_signature;
use crate::store::{Booking, BookingStatus, BookingStore, NewBooking};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How long a pending hold counts toward held seats.
pub const HOLD_WINDOW_MINUTES: i64 = 10;

/// Default per-seat price in whole currency units.
pub const DEFAULT_UNIT_PRICE: i64 = 30;

/// Sentinel payment reference written by the test/bypass booking path.
pub const TEST_PAYMENT_REFERENCE: &str = "TEST_MODE_SKIP";

// ---------------------------------------------------------------------------
// Config and request/result types
// ---------------------------------------------------------------------------

/// Tunables for the Seat-Hold Manager.
#[derive(Debug, Clone)]
pub struct HoldConfig {
    /// Lifetime of a pending hold.
    pub hold_window: Duration,
    /// Per-seat price in whole currency units.
    pub unit_price: i64,
    /// Shared secret for payment-proof verification.
    pub payment_secret: String,
}

impl HoldConfig {
    /// Standard configuration: the 10-minute hold window with the given
    /// price and signing secret.
    pub fn new(unit_price: i64, payment_secret: impl Into<String>) -> Self {
        Self {
            hold_window: Duration::minutes(HOLD_WINDOW_MINUTES),
            unit_price,
            payment_secret: payment_secret.into(),
        }
    }
}

/// Purchaser contact details. All fields required.
#[derive(Debug, Clone)]
pub struct Purchaser {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Input to [`SeatHoldManager::reserve`].
#[derive(Debug, Clone)]
pub struct ReserveRequest {
    pub seats: Vec<String>,
    pub purchaser: Purchaser,
    /// Gateway order reference to attach to the hold, when the caller has
    /// already opened one.
    pub order_id: Option<String>,
}

/// A successfully created hold.
#[derive(Debug, Clone)]
pub struct HoldReceipt {
    pub booking_id: Uuid,
    /// Computed total: seat count times unit price.
    pub amount: i64,
}

/// Opaque payment proof presented at confirmation.
#[derive(Debug, Clone)]
pub struct PaymentProof {
    pub order_id: String,
    pub payment_id: String,
    /// HMAC-SHA256 over `"{order_id}|{payment_id}"`, hex-encoded.
    pub signature: String,
}

/// Outcome of [`SeatHoldManager::confirm`].
#[derive(Debug)]
pub enum Confirmation {
    /// The booking transitioned pending -> paid on this call.
    Confirmed(Booking),
    /// The booking was already paid; nothing was mutated.
    AlreadyConfirmed(Booking),
}

impl Confirmation {
    pub fn booking(&self) -> &Booking {
        match self {
            Confirmation::Confirmed(b) | Confirmation::AlreadyConfirmed(b) => b,
        }
    }
}

/// Outcome of [`SeatHoldManager::check_in`]. A repeated scan is a status
/// report, not an error.
#[derive(Debug)]
pub enum CheckIn {
    /// First scan: the booking is now marked checked in.
    Valid(Booking),
    /// The booking was checked in earlier; carries the original timestamp.
    AlreadyCheckedIn(Booking),
}

// ---------------------------------------------------------------------------
// SeatHoldManager
// ---------------------------------------------------------------------------

/// Coordinates seat availability, holds, payment confirmation, and check-in
/// over an injected [`BookingStore`].
pub struct SeatHoldManager {
    store: Arc<dyn BookingStore>,
    config: HoldConfig,
}

impl SeatHoldManager {
    pub fn new(store: Arc<dyn BookingStore>, config: HoldConfig) -> Self {
        Self { store, config }
    }

    /// Per-seat price, exposed so callers can size gateway orders.
    pub fn unit_price(&self) -> i64 {
        self.config.unit_price
    }

    /// Oldest `created_at` at which a pending hold still counts.
    fn pending_cutoff(&self) -> Timestamp {
        Utc::now() - self.config.hold_window
    }

    /// The set of seat-codes currently held for a show: every paid
    /// booking's seats plus every live pending booking's seats,
    /// de-duplicated and sorted. Read-only.
    pub async fn held_seats(&self, show_id: Uuid) -> Result<Vec<String>, HoldError> {
        let paid = self.store.paid_bookings(show_id).await?;
        let pending = self
            .store
            .pending_bookings_since(show_id, self.pending_cutoff())
            .await?;

        let mut seats: Vec<String> = paid
            .into_iter()
            .chain(pending)
            .flat_map(|b| b.seats)
            .collect();
        seats.sort();
        seats.dedup();
        Ok(seats)
    }

    /// The two-stage conflict check run before creating a hold: paid
    /// bookings first (unconditional), then pending bookings still inside
    /// the hold window. Fails with [`HoldError::SeatConflict`] naming one
    /// offending seat.
    pub async fn check_conflicts(&self, show_id: Uuid, seats: &[String]) -> Result<(), HoldError> {
        let paid = self
            .store
            .paid_bookings_intersecting(show_id, seats)
            .await?;
        if let Some(conflict) = first_shared_seat(&paid, seats) {
            tracing::debug!(show_id = %show_id, seat = %conflict, "Seat already booked");
            return Err(HoldError::SeatConflict {
                seat: conflict,
                reason: ConflictReason::AlreadyBooked,
            });
        }

        let pending = self
            .store
            .pending_bookings_intersecting_since(show_id, seats, self.pending_cutoff())
            .await?;
        if let Some(conflict) = first_shared_seat(&pending, seats) {
            tracing::debug!(show_id = %show_id, seat = %conflict, "Seat on a live hold");
            return Err(HoldError::SeatConflict {
                seat: conflict,
                reason: ConflictReason::HoldInProgress,
            });
        }

        Ok(())
    }

    /// Create a pending hold: validate, run the conflict check, then insert
    /// with `amount = seats x unit price` and a store-assigned creation
    /// timestamp. No lock spans the check and the insert.
    pub async fn reserve(
        &self,
        show_id: Uuid,
        request: ReserveRequest,
    ) -> Result<HoldReceipt, HoldError> {
        validate_reservation(&request.seats, &request.purchaser)?;
        self.check_conflicts(show_id, &request.seats).await?;

        let amount = self.config.unit_price * request.seats.len() as i64;
        let booking = self
            .store
            .insert_booking(NewBooking {
                show_id,
                name: request.purchaser.name,
                email: request.purchaser.email,
                phone: request.purchaser.phone,
                seats: request.seats,
                amount,
                status: BookingStatus::Pending,
                order_id: request.order_id,
                payment_id: None,
            })
            .await?;

        tracing::info!(
            show_id = %show_id,
            booking_id = %booking.id,
            seats = ?booking.seats,
            amount,
            "Seat hold created"
        );

        Ok(HoldReceipt {
            booking_id: booking.id,
            amount,
        })
    }

    /// Test/bypass path: the same conflict check as [`Self::reserve`], but
    /// the booking is created directly as paid with the
    /// [`TEST_PAYMENT_REFERENCE`] sentinel, skipping the pending phase.
    pub async fn reserve_paid(
        &self,
        show_id: Uuid,
        seats: Vec<String>,
        purchaser: Purchaser,
    ) -> Result<Booking, HoldError> {
        validate_reservation(&seats, &purchaser)?;
        self.check_conflicts(show_id, &seats).await?;

        let amount = self.config.unit_price * seats.len() as i64;
        let booking = self
            .store
            .insert_booking(NewBooking {
                show_id,
                name: purchaser.name,
                email: purchaser.email,
                phone: purchaser.phone,
                seats,
                amount,
                status: BookingStatus::Paid,
                order_id: None,
                payment_id: Some(TEST_PAYMENT_REFERENCE.to_string()),
            })
            .await?;

        tracing::info!(
            show_id = %show_id,
            booking_id = %booking.id,
            "Test booking created as paid"
        );

        Ok(booking)
    }

    /// Transition a hold to paid after verifying the payment proof.
    ///
    /// An already-paid booking short-circuits to
    /// [`Confirmation::AlreadyConfirmed`] before the signature is even
    /// examined, so a replayed confirmation with a stale proof still
    /// reports success without mutating anything.
    pub async fn confirm(
        &self,
        show_id: Uuid,
        booking_id: Uuid,
        proof: PaymentProof,
    ) -> Result<Confirmation, HoldError> {
        let booking = self
            .store
            .get_booking(show_id, booking_id)
            .await?
            .ok_or(HoldError::NotFound {
                entity: "booking",
                id: booking_id,
            })?;

        if booking.status == BookingStatus::Paid {
            return Ok(Confirmation::AlreadyConfirmed(booking));
        }

        if !verify_payment_signature(
            &self.config.payment_secret,
            &proof.order_id,
            &proof.payment_id,
            &proof.signature,
        ) {
            tracing::warn!(
                show_id = %show_id,
                booking_id = %booking_id,
                order_id = %proof.order_id,
                "Payment signature rejected"
            );
            return Err(HoldError::InvalidSignature);
        }

        let booking = self
            .store
            .mark_paid(show_id, booking_id, &proof.payment_id)
            .await?
            .ok_or(HoldError::NotFound {
                entity: "booking",
                id: booking_id,
            })?;

        tracing::info!(
            show_id = %show_id,
            booking_id = %booking_id,
            payment_id = %proof.payment_id,
            "Payment confirmed"
        );

        Ok(Confirmation::Confirmed(booking))
    }

    /// Redeem a ticket at the door. Idempotent in effect: the first scan
    /// marks the booking checked in; every later scan reports the original
    /// check-in without mutating anything.
    pub async fn check_in(&self, show_id: Uuid, booking_id: Uuid) -> Result<CheckIn, HoldError> {
        let booking = self
            .store
            .get_booking(show_id, booking_id)
            .await?
            .ok_or(HoldError::NotFound {
                entity: "booking",
                id: booking_id,
            })?;

        if booking.status != BookingStatus::Paid {
            return Err(HoldError::NotPaid(booking_id));
        }

        if booking.checked_in {
            return Ok(CheckIn::AlreadyCheckedIn(booking));
        }

        let booking = self
            .store
            .mark_checked_in(show_id, booking_id)
            .await?
            .ok_or(HoldError::NotFound {
                entity: "booking",
                id: booking_id,
            })?;

        tracing::info!(show_id = %show_id, booking_id = %booking_id, "Ticket checked in");

        Ok(CheckIn::Valid(booking))
    }
}

/// First seat-code shared between any of `bookings` and the requested set,
/// used to name the offending seat in a conflict error.
fn first_shared_seat(bookings: &[Booking], requested: &[String]) -> Option<String> {
    bookings.first().and_then(|b| {
        b.seats
            .iter()
            .find(|s| requested.contains(s))
            .cloned()
    })
}

/// Validate a reservation request: purchaser fields present, seat list
/// non-empty, seat codes non-blank and free of duplicates.
///
/// [`SeatHoldManager::reserve`] runs this itself; it is public so callers
/// with side effects between validation and the hold (such as opening a
/// gateway order) can reject a bad request before those side effects.
pub fn validate_reservation(seats: &[String], purchaser: &Purchaser) -> Result<(), HoldError> {
    if purchaser.name.trim().is_empty() {
        return Err(HoldError::Validation("name is required".into()));
    }
    if purchaser.email.trim().is_empty() {
        return Err(HoldError::Validation("email is required".into()));
    }
    if purchaser.phone.trim().is_empty() {
        return Err(HoldError::Validation("phone is required".into()));
    }
    if seats.is_empty() {
        return Err(HoldError::Validation("at least one seat is required".into()));
    }
    for (i, seat) in seats.iter().enumerate() {
        if seat.trim().is_empty() {
            return Err(HoldError::Validation("seat codes must be non-empty".into()));
        }
        if seats[..i].contains(seat) {
            return Err(HoldError::Validation(format!("duplicate seat {seat}")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
