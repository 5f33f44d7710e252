use std::env;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

// Environment-driven configuration for the concrete adapters.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub identity_base_url: String,
    pub identity_api_key: String,
    pub http_timeout: Duration,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_refresh_token: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let identity_api_key = env::var("IDENTITY_API_KEY")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_API_KEY"))?;

        let identity_base_url = env::var("IDENTITY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_IDENTITY_BASE_URL.to_string());

        let http_timeout = env::var("IDENTITY_HTTP_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS));

        // Google credentials are only exercised by the federated flow; the
        // email/password paths work without them.
        Ok(Self {
            identity_base_url,
            identity_api_key,
            http_timeout,
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            google_refresh_token: env::var("GOOGLE_REFRESH_TOKEN").unwrap_or_default(),
        })
    }
}
