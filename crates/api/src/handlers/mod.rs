pub mod bookings;
pub mod shows;
pub mod tickets;
