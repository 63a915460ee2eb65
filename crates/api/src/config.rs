use matinee_core::holds::DEFAULT_UNIT_PRICE;

/// Payment gateway credentials and endpoint.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Public key id, returned to the browser checkout widget.
    pub key_id: String,
    /// Secret key, used for REST auth and payment signature verification.
    pub key_secret: String,
    /// Gateway REST base URL.
    pub api_base: String,
}

impl PaymentConfig {
    /// Load payment configuration from environment variables.
    ///
    /// | Env Var              | Default                      |
    /// |----------------------|------------------------------|
    /// | `PAYMENT_KEY_ID`     | `rzp_test_key`               |
    /// | `PAYMENT_KEY_SECRET` | `dev_payment_secret`         |
    /// | `PAYMENT_API_BASE`   | `https://api.razorpay.com`   |
    pub fn from_env() -> Self {
        Self {
            key_id: std::env::var("PAYMENT_KEY_ID").unwrap_or_else(|_| "rzp_test_key".into()),
            key_secret: std::env::var("PAYMENT_KEY_SECRET")
                .unwrap_or_else(|_| "dev_payment_secret".into()),
            api_base: std::env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.razorpay.com".into()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared admin password for show management endpoints.
    pub admin_password: String,
    /// Price per seat in whole currency units.
    pub ticket_price: i64,
    /// Payment gateway credentials and endpoint.
    pub payment: PaymentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ADMIN_PASSWORD`       | `admin123`                 |
    /// | `TICKET_PRICE`         | `30`                       |
    ///
    /// Payment variables are documented on [`PaymentConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());

        let ticket_price: i64 = std::env::var("TICKET_PRICE")
            .unwrap_or_else(|_| DEFAULT_UNIT_PRICE.to_string())
            .parse()
            .expect("TICKET_PRICE must be a valid i64");

        let payment = PaymentConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_password,
            ticket_price,
            payment,
        }
    }
}
