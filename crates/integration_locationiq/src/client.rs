//! LocationIQ geocoding client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::LocationIqConfig;
use crate::error::ApiError;
use crate::params::RequestParameters;
use crate::transport::{HttpTransport, Transport, default_headers};

const SEARCH_ENDPOINT: &str = "search.php";
const REVERSE_ENDPOINT: &str = "reverse.php";

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for places matching a free-form query
    ///
    /// Returns the raw JSON array of matches.
    async fn geocode(&self, query: &str) -> Result<Value, ApiError>;

    /// Look up the place at the given coordinates
    ///
    /// Returns the raw JSON object describing the place.
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Value, ApiError>;
}

/// LocationIQ client
///
/// Holds only immutable state, so a single instance can be shared across
/// tasks. Queries and coordinates are passed to the API as given; the
/// service reports bad input as [`ApiError::InvalidRequest`].
#[derive(Debug)]
pub struct LocationIqClient<T = HttpTransport> {
    transport: T,
    config: LocationIqConfig,
    headers: HeaderMap,
}

impl LocationIqClient {
    /// Create a new client using the reqwest transport
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the configuration is invalid, or
    /// `ServerError` if the HTTP client cannot be initialized.
    pub fn new(config: LocationIqConfig) -> Result<Self, ApiError> {
        validate(&config)?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::from_parts(transport, config))
    }

    /// Create a shareable client wrapped in Arc
    ///
    /// # Errors
    ///
    /// Same as [`LocationIqClient::new`].
    pub fn new_shared(config: LocationIqConfig) -> Result<Arc<Self>, ApiError> {
        Ok(Arc::new(Self::new(config)?))
    }
}

impl<T: Transport> LocationIqClient<T> {
    /// Create a client on top of a custom transport
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the configuration is invalid.
    pub fn with_transport(transport: T, config: LocationIqConfig) -> Result<Self, ApiError> {
        validate(&config)?;
        Ok(Self::from_parts(transport, config))
    }

    fn from_parts(transport: T, config: LocationIqConfig) -> Self {
        Self {
            transport,
            config,
            headers: default_headers(),
        }
    }

    /// Configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &LocationIqConfig {
        &self.config
    }
}

fn validate(config: &LocationIqConfig) -> Result<(), ApiError> {
    config
        .validate()
        .map_err(|reason| ApiError::from_status(400, format!("Invalid configuration: {reason}")))
}

#[async_trait]
impl<T: Transport> GeocodingClient for LocationIqClient<T> {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Value, ApiError> {
        let url = self.config.endpoint(SEARCH_ENDPOINT);
        let params = RequestParameters::forward(&self.config, query);

        let response = self.transport.get(&url, &params, &self.headers).await?;

        debug!(
            results = response.as_array().map_or(1, Vec::len),
            "Geocoding completed"
        );
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Value, ApiError> {
        let url = self.config.endpoint(REVERSE_ENDPOINT);
        let params = RequestParameters::reverse(&self.config, latitude, longitude);

        let response = self.transport.get(&url, &params, &self.headers).await?;

        debug!("Reverse geocoding completed");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use mockall::predicate::{always, eq};
    use serde_json::json;

    fn config() -> LocationIqConfig {
        LocationIqConfig::new("test-key")
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let result = LocationIqClient::new(LocationIqConfig::default());
        assert!(matches!(
            result,
            Err(ApiError::InvalidRequest { status: 400, .. })
        ));
    }

    #[test]
    fn test_client_with_valid_config() {
        let client = LocationIqClient::new(config()).unwrap();
        assert_eq!(client.config().limit, 10);
    }

    #[tokio::test]
    async fn test_geocode_uses_search_endpoint() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(eq("https://locationiq.org/v1/search.php"), always(), always())
            .times(1)
            .returning(|_, params, _| {
                assert_eq!(params.get("q"), Some("Lingampally, Hyderabad"));
                assert_eq!(params.get("key"), Some("test-key"));
                Ok(json!([{"lat": "17.49", "lon": "78.31"}]))
            });

        let client = LocationIqClient::with_transport(transport, config()).unwrap();
        let result = client.geocode("Lingampally, Hyderabad").await.unwrap();
        assert_eq!(result[0]["lat"], "17.49");
    }

    #[tokio::test]
    async fn test_reverse_geocode_uses_reverse_endpoint() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(eq("https://locationiq.org/v1/reverse.php"), always(), always())
            .times(1)
            .returning(|_, params, headers| {
                assert_eq!(params.get("lat"), Some("17.4933"));
                assert_eq!(params.get("lon"), Some("78.3158"));
                assert!(params.get("q").is_none());
                assert!(headers.contains_key("content-type"));
                Ok(json!({"display_name": "Lingampally"}))
            });

        let client = LocationIqClient::with_transport(transport, config()).unwrap();
        let result = client.reverse_geocode(17.4933, 78.3158).await.unwrap();
        assert_eq!(result["display_name"], "Lingampally");
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_, _, _| Err(ApiError::from_status(401, "Invalid key")));

        let client = LocationIqClient::with_transport(transport, config()).unwrap();
        let err = client.geocode("anything").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidKey { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_repeated_calls_send_identical_parameters() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);

        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(2)
            .returning(move |_, params, _| {
                recorder.lock().unwrap().push(params.clone());
                Ok(json!([]))
            });

        let client = LocationIqClient::with_transport(transport, config()).unwrap();
        client.geocode("Berlin").await.unwrap();
        client.geocode("Berlin").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
    }
}
