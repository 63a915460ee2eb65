//! Shared helpers for API integration tests.
//!
//! Tests run the full application router (same middleware stack as
//! production) over an in-memory booking store and a canned payment
//! gateway, so no database or network is needed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use matinee_api::config::{PaymentConfig, ServerConfig};
use matinee_api::payment::{GatewayOrder, PaymentError, PaymentGateway};
use matinee_api::router::build_app_router;
use matinee_api::state::AppState;
use matinee_core::holds::{HoldConfig, SeatHoldManager};
use matinee_core::store::memory::MemoryStore;
use matinee_core::store::{BookingStore, NewShow};

/// Payment secret used throughout the API tests; signatures are computed
/// with `matinee_core::payment::payment_signature` against this value.
pub const TEST_PAYMENT_SECRET: &str = "test_secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_password: "admin123".to_string(),
        ticket_price: 30,
        payment: PaymentConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: TEST_PAYMENT_SECRET.to_string(),
            api_base: "http://gateway.invalid".to_string(),
        },
    }
}

/// Canned payment gateway: hands out sequential order ids, never touches
/// the network.
#[derive(Default)]
pub struct TestGateway {
    counter: AtomicU64,
}

#[async_trait]
impl PaymentGateway for TestGateway {
    fn key_id(&self) -> &str {
        "rzp_test_key"
    }

    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            id: format!("order_test_{n}"),
            amount_minor,
            currency: currency.to_string(),
        })
    }
}

/// Build the full application router over an in-memory store.
///
/// Returns the router plus the store so tests can seed data and reach
/// behind the HTTP surface (e.g. to backdate a hold).
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn BookingStore> = store.clone();
    let manager = Arc::new(SeatHoldManager::new(
        Arc::clone(&dyn_store),
        HoldConfig::new(config.ticket_price, TEST_PAYMENT_SECRET),
    ));

    let state = AppState {
        store: dyn_store,
        manager,
        gateway: Arc::new(TestGateway::default()),
        mailer: None,
        config: Arc::new(config.clone()),
    };

    (build_app_router(state, &config), store)
}

/// Seed one active show and return its id.
#[allow(dead_code)]
pub async fn seed_show(store: &MemoryStore) -> Uuid {
    let show = store
        .insert_show(NewShow {
            name: "Night Show".to_string(),
            screen: "Screen 1".to_string(),
            starts_at: chrono::Utc::now() + chrono::Duration::days(1),
        })
        .await
        .expect("seeding a show must succeed");
    show.id
}

/// Perform a GET request against the app.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Perform a POST request with a JSON body against the app.
#[allow(dead_code)]
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
