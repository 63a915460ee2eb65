//! Ticket QR image URLs.
//!
//! QR rasterization is delegated to an external renderer: the ticket email
//! embeds an `<img>` pointing at the renderer with the JSON payload as a
//! URL-encoded query parameter.

use matinee_core::ticket::TicketPayload;

/// External QR renderer endpoint.
const QR_SERVICE_BASE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Rendered image size in pixels.
const QR_SIZE: &str = "200x200";

/// Build the QR image URL for a ticket payload.
pub fn qr_image_url(payload: &TicketPayload) -> String {
    format!(
        "{QR_SERVICE_BASE}?size={QR_SIZE}&data={}",
        urlenc::encode(&payload.to_json())
    )
}

mod urlenc {
    /// Percent-encode a string for use as a URL query value. Unreserved
    /// characters (RFC 3986 §2.3) pass through; everything else is encoded
    /// byte-wise.
    pub fn encode(input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for byte in input.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                    out.push(byte as char);
                }
                other => out.push_str(&format!("%{other:02X}")),
            }
        }
        out
    }
}
