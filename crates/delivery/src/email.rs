//! Ticket email delivery via SMTP.
//!
//! [`TicketMailer`] wraps the `lettre` async SMTP transport to send the HTML
//! confirmation email with the embedded QR ticket. Configuration is loaded
//! from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be
//! constructed -- bookings still confirm, tickets just are not emailed.

use matinee_core::store::{Booking, Show};

use crate::qr;
use matinee_core::ticket::TicketPayload;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for ticket email failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "tickets@matinee.local";

/// Configuration for the SMTP ticket mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that ticket
    /// email is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      | —                        |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `tickets@matinee.local`  |
    /// | `SMTP_USER`     | no       | —                        |
    /// | `SMTP_PASSWORD` | no       | —                        |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Placeholder used when the show row cannot be loaded at email time.
const FALLBACK_SHOW_NAME: &str = "Your Show";
const FALLBACK_SCREEN: &str = "N/A";

/// Everything needed to render one ticket email.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub recipient_name: String,
    pub show_name: String,
    pub screen: String,
    pub seats: Vec<String>,
    pub payload: TicketPayload,
    /// True for bookings made through the skip-payment test path; flagged
    /// in the subject and body so test tickets are unmistakable.
    pub test_mode: bool,
}

impl Ticket {
    /// Assemble a ticket from a confirmed booking and its (possibly
    /// missing) show row.
    pub fn for_booking(booking: &Booking, show: Option<&Show>, test_mode: bool) -> Self {
        Self {
            recipient_name: booking.name.clone(),
            show_name: show
                .map(|s| s.name.clone())
                .unwrap_or_else(|| FALLBACK_SHOW_NAME.to_string()),
            screen: show
                .map(|s| s.screen.clone())
                .unwrap_or_else(|| FALLBACK_SCREEN.to_string()),
            seats: booking.seats.clone(),
            payload: TicketPayload {
                booking_id: booking.id,
                show_id: booking.show_id,
            },
            test_mode,
        }
    }
}

/// Subject line for a ticket email.
pub fn render_subject(ticket: &Ticket) -> String {
    if ticket.test_mode {
        "Your Ticket is Confirmed! (TEST)".to_string()
    } else {
        "Your Ticket is Confirmed!".to_string()
    }
}

/// HTML body for a ticket email: greeting, QR image, and booking details.
pub fn render_html(ticket: &Ticket) -> String {
    let heading = if ticket.test_mode {
        "Booking Confirmed! (TEST BOOKING)"
    } else {
        "Booking Confirmed!"
    };
    let qr_url = qr::qr_image_url(&ticket.payload);

    format!(
        "<h1>{heading}</h1>\
         <p>Hi {name},</p>\
         <p>Thank you for your booking for <b>{show}</b>.</p>\
         <p>Please show this QR code at the event entrance.</p>\
         <img src=\"{qr_url}\" alt=\"Your QR Code Ticket\">\
         <hr>\
         <h3>Booking Details:</h3>\
         <p><b>Show:</b> {show}</p>\
         <p><b>Screen:</b> {screen}</p>\
         <p><b>Seats:</b> {seats}</p>\
         <p><b>Booking ID:</b> {booking_id}</p>",
        name = ticket.recipient_name,
        show = ticket.show_name,
        screen = ticket.screen,
        seats = ticket.seats.join(", "),
        booking_id = ticket.payload.booking_id,
    )
}

// ---------------------------------------------------------------------------
// TicketMailer
// ---------------------------------------------------------------------------

/// Sends ticket confirmation emails via SMTP.
pub struct TicketMailer {
    config: EmailConfig,
}

impl TicketMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the ticket email for a confirmed booking.
    pub async fn send_ticket(&self, to_email: &str, ticket: &Ticket) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(render_subject(ticket))
            .header(ContentType::TEXT_HTML)
            .body(render_html(ticket))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            to = to_email,
            booking_id = %ticket.payload.booking_id,
            "Ticket email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ticket(test_mode: bool) -> Ticket {
        Ticket {
            recipient_name: "Asha".into(),
            show_name: "Night Show".into(),
            screen: "Screen 1".into(),
            seats: vec!["A1".into(), "A2".into()],
            payload: TicketPayload {
                booking_id: Uuid::nil(),
                show_id: Uuid::nil(),
            },
            test_mode,
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn subject_flags_test_bookings() {
        assert_eq!(render_subject(&ticket(false)), "Your Ticket is Confirmed!");
        assert_eq!(
            render_subject(&ticket(true)),
            "Your Ticket is Confirmed! (TEST)"
        );
    }

    #[test]
    fn html_body_contains_details_and_qr() {
        let html = render_html(&ticket(false));
        assert!(html.contains("Hi Asha,"));
        assert!(html.contains("<b>Night Show</b>"));
        assert!(html.contains("Screen 1"));
        assert!(html.contains("A1, A2"));
        assert!(html.contains("api.qrserver.com"));
        assert!(html.contains(&Uuid::nil().to_string()));
    }

    #[test]
    fn html_body_marks_test_bookings() {
        let html = render_html(&ticket(true));
        assert!(html.contains("(TEST BOOKING)"));
    }

    #[test]
    fn ticket_falls_back_when_show_is_missing() {
        let booking = matinee_core::store::Booking {
            id: Uuid::new_v4(),
            show_id: Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9999999999".into(),
            seats: vec!["A1".into()],
            amount: 30,
            status: matinee_core::store::BookingStatus::Paid,
            order_id: None,
            payment_id: None,
            checked_in: false,
            checked_in_at: None,
            created_at: chrono::Utc::now(),
        };
        let ticket = Ticket::for_booking(&booking, None, false);
        assert_eq!(ticket.show_name, "Your Show");
        assert_eq!(ticket.screen, "N/A");
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
