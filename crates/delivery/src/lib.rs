//! Ticket issuance for the matinee booking service.
//!
//! A confirmed booking produces one artifact: an HTML email carrying a QR
//! code image that encodes the `{bookingId, showId}` payload. The QR image
//! itself is rendered by an external service ([`qr`]); this crate builds the
//! image URL and sends the email ([`email`]). Delivery failure is the
//! caller's concern to log -- payment state is never coupled to it.

pub mod email;
pub mod qr;
