//! Typed views of LocationIQ responses
//!
//! The client returns raw JSON; these types are an optional convenience
//! for callers that want structured access to the common fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of an error response
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// A single geocoding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Provider identifier of the place
    #[serde(default, deserialize_with = "string_or_number")]
    pub place_id: Option<String>,

    /// Latitude as returned by the API (decimal string)
    pub lat: String,

    /// Longitude as returned by the API (decimal string)
    pub lon: String,

    /// Full human-readable address
    #[serde(default)]
    pub display_name: Option<String>,

    /// OSM main tag (e.g. "place", "highway")
    #[serde(default)]
    pub class: Option<String>,

    /// OSM value tag (e.g. "suburb", "residential")
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Relevance score
    #[serde(default)]
    pub importance: Option<f64>,

    /// Address breakdown (only with address details enabled)
    #[serde(default)]
    pub address: BTreeMap<String, String>,

    /// South, north, west, east bounds as decimal strings
    #[serde(default)]
    pub boundingbox: Vec<String>,
}

impl Place {
    /// Deserialize a single place from a JSON object
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Parsed `(latitude, longitude)`, if both fields are valid numbers
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.trim().parse().ok()?;
        let lon = self.lon.trim().parse().ok()?;
        Some((lat, lon))
    }

    /// Short label: the display name, or the coordinates when missing
    #[must_use]
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| format!("{},{}", self.lat, self.lon))
    }
}

/// Deserialize places from a forward (array) or reverse (object) response
pub fn places_from_value(value: &Value) -> Result<Vec<Place>, serde_json::Error> {
    match value {
        Value::Array(_) => Vec::<Place>::deserialize(value),
        _ => Place::from_value(value).map(|place| vec![place]),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
