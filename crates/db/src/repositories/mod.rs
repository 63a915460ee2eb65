//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod show_repo;

pub use booking_repo::BookingRepo;
pub use show_repo::ShowRepo;
