#![forbid(unsafe_code)]
//! LocationIQ geocoding integration
//!
//! Provides forward geocoding (free text to places) and reverse geocoding
//! (coordinates to a place) via the [LocationIQ](https://locationiq.com) API.
//!
//! # Architecture
//!
//! [`GeocodingClient`] defines the two operations and is implemented by
//! [`LocationIqClient`]. Each call builds a fresh [`RequestParameters`] from
//! the immutable [`LocationIqConfig`] and hands it to a [`Transport`], which
//! issues exactly one GET and classifies failures into [`ApiError`]. The
//! response body is returned as raw JSON; [`Place`] offers a typed view.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_locationiq::{GeocodingClient, LocationIqClient, LocationIqConfig};
//!
//! let client = LocationIqClient::new(LocationIqConfig::new("pk.my-key"))?;
//!
//! let matches = client.geocode("Lingampally, Hyderabad").await?;
//! let place = client.reverse_geocode(17.4933, 78.3158).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod params;
mod transport;

pub use client::{GeocodingClient, LocationIqClient};
pub use config::{ExtraParams, LocationIqConfig, MAX_LIMIT, MAX_ZOOM, SUPPORTED_FORMATS, ViewBox};
pub use error::{ApiError, NOT_FOUND_MESSAGE, SYNTHETIC_SERVER_ERROR_STATUS};
pub use models::{Place, places_from_value};
pub use params::RequestParameters;
pub use transport::{HttpTransport, Transport, default_headers};
