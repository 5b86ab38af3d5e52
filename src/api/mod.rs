//! HTTP boundary to the platform backend.
//!
//! One configured [`ApiClient`] is built at startup and shared with the
//! request worker. Every endpoint speaks the backend's envelope convention:
//! a `success` flag plus an optional `message` that is surfaced verbatim in
//! the UI when a request is rejected.

mod endpoints;

pub use endpoints::AdminApi;
#[cfg(test)]
pub use endpoints::MockAdminApi;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Environment variable holding the backend base URL.
pub const ENV_API_URL: &str = "KARWAN_API_URL";
/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "KARWAN_API_TOKEN";

const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Problems constructing the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {ENV_API_URL} value `{0}`")]
    InvalidBaseUrl(String),
    #[error("{ENV_API_URL} must use http or https, got `{0}`")]
    UnsupportedScheme(String),
}

/// Immutable connection settings, read once at startup and injected.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    /// Bearer token attached to every request, if configured.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Builds a configuration from a base URL string.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: None,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Reads the configuration from the environment, falling back to the
    /// local development backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base)?;
        config.api_token = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.is_empty());
        Ok(config)
    }

    /// Sets the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

/// Errors crossing the HTTP boundary.
///
/// The three user-visible cases from the screens' point of view are
/// transport failure, server rejection and contract mismatch; all of them
/// resolve to a single notification and leave screen state untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, timeout, TLS).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// HTTP succeeded but the envelope carried `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// Non-2xx response.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The body did not match the endpoint's contract.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns the message shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach the server".to_string(),
            ApiError::Rejected(message) => message.clone(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server sent an unexpected response".to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Minimal envelope used for status checks and error extraction.
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub(crate) fn rejected(message: Option<String>) -> ApiError {
    ApiError::Rejected(message.unwrap_or_else(|| "The server rejected the request".to_string()))
}

/// The configured HTTP client wrapping base URL, auth header and timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds the client from a configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            if let Ok(value) =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            {
                headers.insert(reqwest::header::AUTHORIZATION, value);
            }
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Joins endpoint segments onto the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Decodes a response body, mapping non-2xx statuses to
    /// [`ApiError::Status`] with a best-effort message from the body.
    pub(crate) async fn parse<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Ack>(&bytes)
                .ok()
                .and_then(|ack| ack.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Decodes an acknowledgement-only response and checks its flag.
    pub(crate) async fn parse_ack(&self, response: reqwest::Response) -> ApiResult<()> {
        let ack: Ack = self.parse(response).await?;
        if !ack.success {
            return Err(rejected(ack.message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_trims_trailing_slash() {
        let config = ApiConfig::new("https://api.example.com/v1/").unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn config_rejects_garbage() {
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiConfig::new("ftp://api.example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn endpoint_joins_segments() {
        let config = ApiConfig::new("http://localhost:4000/api").unwrap();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(&["banks", "bank-3", "status"]),
            "http://localhost:4000/api/banks/bank-3/status"
        );
    }

    #[test]
    fn rejection_falls_back_to_generic_message() {
        let err = rejected(None);
        assert_eq!(err.user_message(), "The server rejected the request");

        let err = rejected(Some("IBAN already registered".to_string()));
        assert_eq!(err.user_message(), "IBAN already registered");
    }

    #[test]
    fn ack_decodes_with_and_without_message() {
        let ack: Ack = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ack.success);
        assert_eq!(ack.message, None);

        let ack: Ack =
            serde_json::from_str(r#"{"success":false,"message":"No such record"}"#).unwrap();
        assert!(!ack.success);
        assert_eq!(ack.message.as_deref(), Some("No such record"));
    }
}
