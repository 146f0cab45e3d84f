//! LocationIQ client configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::warn;

/// Output formats accepted by the client (all of them return JSON bodies)
pub const SUPPORTED_FORMATS: [&str; 4] = ["json", "jsonv2", "geojson", "geocodejson"];

/// Largest result limit accepted by the API
pub const MAX_LIMIT: u8 = 50;

/// Largest zoom level accepted by the API
pub const MAX_ZOOM: u8 = 18;

/// Configuration for the LocationIQ client
///
/// Immutable once handed to the client; every request copies the defaults
/// out of it.
#[derive(Clone, Serialize, Deserialize)]
pub struct LocationIqConfig {
    /// API key (sensitive - uses SecretString)
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: SecretString,

    /// Base URL of the API, without the endpoint file name
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Output format: "json", "jsonv2", "geojson" or "geocodejson"
    #[serde(default = "default_format")]
    pub format: String,

    /// Include a breakdown of the address into elements
    #[serde(default = "default_address_details")]
    pub address_details: bool,

    /// Maximum number of returned results (1-50)
    #[serde(default = "default_limit")]
    pub limit: u8,

    /// Preferred language of the results (sent as `accept-language`)
    #[serde(default = "default_language")]
    pub language: String,

    /// Optional search filters sent with every request
    #[serde(default)]
    pub extra: ExtraParams,

    /// Overall request timeout in seconds (None for no timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Connect timeout in seconds (None for no timeout)
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// Relaxes base URL checks so the client can target a local mock server
    #[serde(default)]
    pub test_mode: bool,
}

impl fmt::Debug for LocationIqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationIqConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("format", &self.format)
            .field("address_details", &self.address_details)
            .field("limit", &self.limit)
            .field("language", &self.language)
            .field("extra", &self.extra)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("test_mode", &self.test_mode)
            .finish()
    }
}

fn default_api_key() -> SecretString {
    SecretString::from(String::new())
}

fn default_base_url() -> String {
    "https://locationiq.org/v1".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

const fn default_address_details() -> bool {
    true
}

const fn default_limit() -> u8 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for LocationIqConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            format: default_format(),
            address_details: default_address_details(),
            limit: default_limit(),
            language: default_language(),
            extra: ExtraParams::default(),
            timeout_secs: None,
            connect_timeout_secs: None,
            test_mode: false,
        }
    }
}

impl LocationIqConfig {
    /// Create a configuration with the given API key and default settings
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing against a mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from("test-key".to_string()),
            base_url: base_url.into(),
            timeout_secs: Some(5),
            test_mode: true,
            ..Default::default()
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Enable or disable the address breakdown
    #[must_use]
    pub const fn with_address_details(mut self, enabled: bool) -> Self {
        self.address_details = enabled;
        self
    }

    /// Set the maximum number of results
    #[must_use]
    pub const fn with_limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    /// Set the result language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the extra search filters
    #[must_use]
    pub fn with_extra(mut self, extra: ExtraParams) -> Self {
        self.extra = extra;
        self
    }

    /// Set the overall request timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the connect timeout
    #[must_use]
    pub const fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// Enable or disable test mode
    #[must_use]
    pub const fn with_test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = enabled;
        self
    }

    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Overall request timeout, if configured
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Connect timeout, if configured
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// URL of an endpoint file below the base URL
    #[must_use]
    pub fn endpoint(&self, file: &str) -> String {
        format!("{}/{file}", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key_str().trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.test_mode && !self.base_url.starts_with("https://") {
            return Err("base_url must use https outside of test mode".to_string());
        }

        if !SUPPORTED_FORMATS.contains(&self.format.as_str()) {
            return Err(format!(
                "format must be one of: {}",
                SUPPORTED_FORMATS.join(", ")
            ));
        }

        if self.limit == 0 {
            return Err("limit must be greater than 0".to_string());
        }

        if self.limit > MAX_LIMIT {
            return Err(format!("limit must be {MAX_LIMIT} or less"));
        }

        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.connect_timeout_secs == Some(0) {
            return Err("connect_timeout_secs must be greater than 0".to_string());
        }

        if self.extra.zoom.is_some_and(|zoom| zoom > MAX_ZOOM) {
            return Err(format!("zoom must be {MAX_ZOOM} or less"));
        }

        Ok(())
    }
}

/// Rectangle restricting search results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Western longitude
    pub left: f64,
    /// Northern latitude
    pub top: f64,
    /// Eastern longitude
    pub right: f64,
    /// Southern latitude
    pub bottom: f64,
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

impl FromStr for ViewBox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid viewbox coordinate: {e}"))?;

        match values.as_slice() {
            &[left, top, right, bottom] => Ok(Self {
                left,
                top,
                right,
                bottom,
            }),
            _ => Err(format!(
                "viewbox needs 4 coordinates, got {}",
                values.len()
            )),
        }
    }
}

/// Optional search filters
///
/// Only filters that are set end up in the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraParams {
    /// Preferred area to search in ("left,top,right,bottom" or a table)
    #[serde(default, deserialize_with = "viewbox_from_text_or_table")]
    pub viewbox: Option<ViewBox>,

    /// Restrict results to the view box
    #[serde(default)]
    pub bounded: Option<bool>,

    /// Level of detail for reverse geocoding (0-18)
    #[serde(default)]
    pub zoom: Option<u8>,

    /// House number and street name
    #[serde(default)]
    pub street: Option<String>,

    /// City name
    #[serde(default)]
    pub city: Option<String>,

    /// County name
    #[serde(default)]
    pub county: Option<String>,

    /// State name
    #[serde(default)]
    pub state: Option<String>,

    /// Country name
    #[serde(default)]
    pub country: Option<String>,

    /// Postal code
    #[serde(default)]
    pub postalcode: Option<String>,
}

impl ExtraParams {
    /// Build filters from free-form name/value pairs
    ///
    /// Unknown names and unparseable values are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut extra = Self::default();
        for (name, value) in pairs {
            let name = name.as_ref();
            let value = value.as_ref();
            if let Err(reason) = extra.set(name, value) {
                warn!(param = %name, %reason, "Ignoring extra parameter");
            }
        }
        extra
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "viewbox" => self.viewbox = Some(value.parse()?),
            "bounded" => self.bounded = Some(parse_flag(value)?),
            "zoom" => {
                self.zoom = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|e| format!("Invalid zoom: {e}"))?,
                );
            },
            "street" => self.street = Some(value.to_string()),
            "city" => self.city = Some(value.to_string()),
            "county" => self.county = Some(value.to_string()),
            "state" => self.state = Some(value.to_string()),
            "country" => self.country = Some(value.to_string()),
            "postalcode" => self.postalcode = Some(value.to_string()),
            _ => return Err("unknown parameter".to_string()),
        }
        Ok(())
    }

    /// Wire name/value pairs of the filters that are set
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(viewbox) = self.viewbox {
            pairs.push(("viewbox", viewbox.to_string()));
        }
        if let Some(bounded) = self.bounded {
            pairs.push(("bounded", flag(bounded)));
        }
        if let Some(zoom) = self.zoom {
            pairs.push(("zoom", zoom.to_string()));
        }

        let text_fields = [
            ("street", &self.street),
            ("city", &self.city),
            ("county", &self.county),
            ("state", &self.state),
            ("country", &self.country),
            ("postalcode", &self.postalcode),
        ];
        for (name, value) in text_fields {
            if let Some(value) = value {
                pairs.push((name, value.clone()));
            }
        }

        pairs
    }

    /// Returns true if no filter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ViewBoxInput {
    Text(String),
    Table(ViewBox),
}

fn viewbox_from_text_or_table<'de, D>(deserializer: D) -> Result<Option<ViewBox>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ViewBoxInput>::deserialize(deserializer)? {
        Some(ViewBoxInput::Text(text)) => text.parse().map(Some).map_err(de::Error::custom),
        Some(ViewBoxInput::Table(viewbox)) => Ok(Some(viewbox)),
        None => Ok(None),
    }
}

/// Encode a boolean the way the API expects it
pub(crate) fn flag(value: bool) -> String {
    String::from(if value { "1" } else { "0" })
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("Invalid flag: {other}")),
    }
}
