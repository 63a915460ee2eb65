//! Payment gateway REST client.
//!
//! Order creation happens server-side against the gateway's REST API with
//! basic auth; the browser then completes checkout against the returned
//! order id. [`PaymentGateway`] is a trait so integration tests can swap in
//! a canned gateway without touching the network.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::PaymentConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for payment gateway failures.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The HTTP request to the gateway failed.
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway responded with a non-success status.
    #[error("gateway rejected the order: {0}")]
    Rejected(String),
}

// ---------------------------------------------------------------------------
// PaymentGateway
// ---------------------------------------------------------------------------

/// An order registered with the payment gateway.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    /// Gateway-assigned order id, echoed back in the payment proof.
    pub id: String,
    /// Order amount in minor currency units (e.g. paise).
    pub amount_minor: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Creates payment orders with the external gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key id for the browser checkout widget.
    fn key_id(&self) -> &str;

    /// Register an order with the gateway.
    ///
    /// `amount_minor` is in minor currency units; `receipt` is an opaque
    /// merchant reference.
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError>;
}

// ---------------------------------------------------------------------------
// RestPaymentGateway
// ---------------------------------------------------------------------------

/// Gateway wire response for order creation.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

/// Production [`PaymentGateway`] backed by the gateway's REST API.
pub struct RestPaymentGateway {
    client: reqwest::Client,
    key_id: String,
    key_secret: String,
    api_base: String,
}

impl RestPaymentGateway {
    /// Create a client from payment configuration.
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RestPaymentGateway {
    fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.api_base);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&serde_json::json!({
                "amount": amount_minor,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Payment gateway rejected order");
            return Err(PaymentError::Rejected(format!("HTTP {status}")));
        }

        let order: OrderResponse = response.json().await?;
        tracing::info!(order_id = %order.id, amount = order.amount, "Payment order created");

        Ok(GatewayOrder {
            id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }
}
