//! Per-call request parameters
//!
//! A fresh [`RequestParameters`] is assembled for every call from the
//! immutable client configuration, so nothing leaks between requests.

use std::fmt;

use serde::Serialize;

use crate::config::{LocationIqConfig, flag};

const KEY_PARAM: &str = "key";

/// Ordered query parameters of a single request
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestParameters {
    pairs: Vec<(&'static str, String)>,
}

impl RequestParameters {
    /// Parameters of a forward geocoding request
    #[must_use]
    pub fn forward(config: &LocationIqConfig, query: &str) -> Self {
        let mut params = Self::with_key(config);
        params.push("q", query);
        params.extend_defaults(config);
        params
    }

    /// Parameters of a reverse geocoding request
    #[must_use]
    pub fn reverse(config: &LocationIqConfig, latitude: f64, longitude: f64) -> Self {
        let mut params = Self::with_key(config);
        params.push("lat", latitude.to_string());
        params.push("lon", longitude.to_string());
        params.extend_defaults(config);
        params
    }

    fn with_key(config: &LocationIqConfig) -> Self {
        Self {
            pairs: vec![(KEY_PARAM, config.api_key_str().to_string())],
        }
    }

    /// Shared defaults: format, address details, limit, language and filters
    fn extend_defaults(&mut self, config: &LocationIqConfig) {
        self.push("format", config.format.as_str());
        self.push("addressdetails", flag(config.address_details));
        self.push("limit", config.limit.to_string());
        self.push("accept-language", config.language.as_str());
        self.pairs.extend(config.extra.pairs());
    }

    fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.pairs.push((name, value.into()));
    }

    /// Look up a parameter value by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parameter names in request order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(name, _)| *name)
    }

    /// Name/value pairs in request order
    #[must_use]
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Debug for RequestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.pairs {
            if *name == KEY_PARAM {
                map.entry(name, &"[REDACTED]");
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}
