//! Forward geocoding: turn a place name into coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{LookupError, Service};
use crate::types::GeoResult;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    country_code: Option<String>,
}

impl From<SearchHit> for GeoResult {
    fn from(hit: SearchHit) -> Self {
        Self {
            latitude: hit.latitude,
            longitude: hit.longitude,
            display_name: hit.name,
            country_code: hit.country_code.filter(|c| !c.is_empty()),
        }
    }
}

/// Name-search client for the geocoding service
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    client: Client,
    base_url: String,
}

impl GeocoderClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a place name to its best match.
    ///
    /// `place_name` must already be trimmed and non-empty; see `PlaceQuery`.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, place_name: &str) -> Result<GeoResult, LookupError> {
        let url = format!(
            "{}/v1/search?name={}&count=1",
            self.base_url,
            urlencoding::encode(place_name)
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::debug!("Geocoding request failed: {}", e);
            LookupError::GeocodingTransport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Geocoding returned status {}", status);
            return Err(LookupError::GeocodingTransport(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::GeocodingTransport(e.to_string()))?;

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::malformed(Service::Geocoding, e.to_string()))?;

        let place: GeoResult = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(GeoResult::from)
            .ok_or(LookupError::CityNotFound)?;

        tracing::info!(
            "Geocoded to {} ({}, {})",
            place.display_name,
            place.latitude,
            place.longitude
        );
        Ok(place)
    }
}
