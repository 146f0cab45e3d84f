//! Rendering of geocoding responses for the terminal

use integration_locationiq::places_from_value;
use serde_json::Value;

/// Render a response as pretty JSON or as one summary line per place
///
/// Falls back to pretty JSON when the body does not look like places.
pub fn render(response: &Value, raw: bool) -> serde_json::Result<String> {
    if raw {
        return serde_json::to_string_pretty(response);
    }

    match places_from_value(response) {
        Ok(places) if places.is_empty() => Ok("No places found".to_string()),
        Ok(places) => Ok(places
            .iter()
            .enumerate()
            .map(|(i, place)| {
                let position = i + 1;
                match place.coordinates() {
                    Some((lat, lon)) => format!("{position}. {} ({lat:.6}, {lon:.6})", place.label()),
                    None => format!("{position}. {}", place.label()),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")),
        Err(_) => serde_json::to_string_pretty(response),
    }
}
