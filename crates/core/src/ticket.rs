//! The QR ticket payload.
//!
//! A ticket QR code encodes exactly one artifact: a JSON object carrying the
//! booking and show identifiers. The door scanner decodes it and posts it
//! back for check-in; nothing else on the ticket is trusted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The payload rendered into a ticket QR code and scanned at the door.
///
/// Wire field names are camelCase; they are part of the scanner contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub booking_id: Uuid,
    pub show_id: Uuid,
}

impl TicketPayload {
    /// Serialize to the compact JSON string embedded in the QR image.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ticket payload serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_wire_names() {
        let payload = TicketPayload {
            booking_id: Uuid::nil(),
            show_id: Uuid::nil(),
        };
        let json = payload.to_json();
        assert!(json.contains("\"bookingId\""));
        assert!(json.contains("\"showId\""));
    }

    #[test]
    fn payload_round_trips() {
        let payload = TicketPayload {
            booking_id: Uuid::new_v4(),
            show_id: Uuid::new_v4(),
        };
        let decoded: TicketPayload = serde_json::from_str(&payload.to_json()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn payload_decodes_scanner_input() {
        let json = r#"{"bookingId":"7f0f9a2e-1111-4222-8333-444455556666","showId":"00000000-0000-4000-8000-000000000001"}"#;
        let decoded: TicketPayload = serde_json::from_str(json).unwrap();
        assert_eq!(
            decoded.booking_id.to_string(),
            "7f0f9a2e-1111-4222-8333-444455556666"
        );
    }
}
