use uuid::Uuid;

/// Why a requested seat is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// The seat belongs to a booking that has been paid for.
    AlreadyBooked,
    /// The seat belongs to a pending hold that has not yet expired.
    HoldInProgress,
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictReason::AlreadyBooked => write!(f, "already booked"),
            ConflictReason::HoldInProgress => write!(f, "hold in progress"),
        }
    }
}

/// Domain errors surfaced by the Seat-Hold Manager.
///
/// `AlreadyCheckedIn` is deliberately *not* here: a repeated check-in scan is
/// an informational result, not a failure (see [`crate::holds::CheckIn`]).
#[derive(Debug, thiserror::Error)]
pub enum HoldError {
    /// A required field was missing or empty. Caller's fault, no retry.
    #[error("validation failed: {0}")]
    Validation(String),

    /// One of the requested seats is already paid for or on a live hold.
    /// The caller should refresh availability and may retry with other seats.
    #[error("seat {seat} is unavailable: {reason}")]
    SeatConflict {
        seat: String,
        reason: ConflictReason,
    },

    /// The payment proof did not verify. Fatal for this confirmation
    /// attempt; no mutation was made.
    #[error("payment signature did not verify")]
    InvalidSignature,

    /// The referenced booking or show does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// Check-in was attempted on a booking that was never paid.
    #[error("booking {0} has not been paid")]
    NotPaid(Uuid),

    /// The storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure inside a [`crate::store::BookingStore`] implementation.
#[derive(Debug, thiserror::Error)]
#[error("storage error: {0}")]
pub struct StoreError(String);

impl StoreError {
    /// Wrap a backend-specific failure.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}
