//! Payment-proof verification.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with a shared secret and
//! sends the HMAC-SHA256 hex digest back alongside the payment. Confirming a
//! booking recomputes the digest and compares it against the supplied
//! signature; nothing else about the gateway is trusted.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected signature for a completed payment.
///
/// The signed string is exactly `"{order_id}|{payment_id}"` and the result
/// is hex-encoded, matching the gateway's webhook contract.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a supplied payment signature against the shared secret.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    payment_signature(secret, order_id, payment_id) == signature
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}
