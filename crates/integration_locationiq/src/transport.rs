//! HTTP transport
//!
//! Performs exactly one GET per call and classifies the outcome. There are
//! no retries; every failure is returned to the caller as an [`ApiError`].

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::LocationIqConfig;
use crate::error::ApiError;
use crate::models::ErrorBody;
use crate::params::RequestParameters;

/// Headers sent with every request
#[must_use]
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Issues a single GET request and returns the parsed JSON body
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the given query parameters and headers
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] matching the response status, or a
    /// `ServerError` with status 500 if no response was received.
    async fn get(
        &self,
        url: &str,
        params: &RequestParameters,
        headers: &HeaderMap,
    ) -> Result<Value, ApiError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport honouring the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &LocationIqConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::network(format!("HTTP client initialization failed: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, params, headers))]
    async fn get(
        &self,
        url: &str,
        params: &RequestParameters,
        headers: &HeaderMap,
    ) -> Result<Value, ApiError> {
        debug!(?params, "Sending LocationIQ request");

        let response = self
            .client
            .get(url)
            .query(params)
            .headers(headers.clone())
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        debug!(status = %status, "Received LocationIQ response");

        let body = response.text().await.map_err(classify_send_error)?;

        if !status.is_success() {
            return Err(ApiError::from_status(
                status.as_u16(),
                error_message(status, &body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::from_status(status.as_u16(), format!("Invalid JSON response: {e}"))
        })
    }
}

/// Map a failure without an HTTP status to a synthetic server error
///
/// The URL is stripped first since its query string carries the API key.
fn classify_send_error(e: reqwest::Error) -> ApiError {
    let e = e.without_url();
    if e.is_timeout() {
        ApiError::network(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ApiError::network(format!("Connection failed: {e}"))
    } else {
        ApiError::network(format!("Request failed: {e}"))
    }
}

/// Pick the most useful message out of an error response
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        return error;
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let headers = default_headers();
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn test_error_message_from_json_body() {
        let message = error_message(StatusCode::UNAUTHORIZED, r#"{"error": "Invalid key"}"#);
        assert_eq!(message, "Invalid key");
    }

    #[test]
    fn test_error_message_from_text_body() {
        let message = error_message(StatusCode::BAD_GATEWAY, "  upstream down \n");
        assert_eq!(message, "upstream down");
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        let message = error_message(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(message, "Too Many Requests");
    }

    #[test]
    fn test_transport_builds_with_timeouts() {
        let config = LocationIqConfig::new("key")
            .with_timeout_secs(3)
            .with_connect_timeout_secs(1);
        assert!(HttpTransport::new(&config).is_ok());
    }
}
