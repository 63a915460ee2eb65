//! Row model for the `bookings` table.

use matinee_core::store::{Booking, BookingStatus};
use matinee_core::types::Timestamp;
use sqlx::FromRow;
use uuid::Uuid;

/// A booking row as stored. `status` is the raw text column; conversion to
/// the core entity parses it (the table's CHECK constraint limits it to
/// `pending` / `paid`).
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub show_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub seats: Vec<String>,
    pub amount: i64,
    pub status: String,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub checked_in: bool,
    pub checked_in_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl TryFrom<BookingRow> for Booking {
    type Error = String;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row.status.parse()?;
        Ok(Booking {
            id: row.id,
            show_id: row.show_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            seats: row.seats,
            amount: row.amount,
            status,
            order_id: row.order_id,
            payment_id: row.payment_id,
            checked_in: row.checked_in,
            checked_in_at: row.checked_in_at,
            created_at: row.created_at,
        })
    }
}
