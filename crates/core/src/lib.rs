//! Domain core for the matinee seat-booking service.
//!
//! This crate holds everything that does not touch a network or a database:
//! the booking entities, the [`store::BookingStore`] collaborator trait, the
//! payment-proof verification, the QR ticket payload, and the Seat-Hold
//! Manager itself ([`holds::SeatHoldManager`]). The api and db crates plug
//! concrete collaborators into these seams.

pub mod error;
pub mod holds;
pub mod payment;
pub mod store;
pub mod ticket;
pub mod types;
