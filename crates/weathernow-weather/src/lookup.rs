//! The lookup pipeline: geocode a place, then fetch its current weather.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::error::LookupError;
use crate::forecast::ForecastClient;
use crate::geocode::GeocoderClient;
use crate::types::{LookupReport, PlaceQuery};

/// Build the HTTP client shared by both services.
///
/// `timeout` of `None` keeps reqwest's default.
pub fn build_http_client(
    timeout: Option<Duration>,
    user_agent: &str,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Stateless geocode-then-forecast pipeline
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    geocoder: GeocoderClient,
    forecast: ForecastClient,
}

impl WeatherLookup {
    pub fn new(geocoder: GeocoderClient, forecast: ForecastClient) -> Self {
        Self { geocoder, forecast }
    }

    /// Both base URLs served by one HTTP client
    pub fn with_client(client: Client, geocoding_url: &str, forecast_url: &str) -> Self {
        Self::new(
            GeocoderClient::new(client.clone(), geocoding_url),
            ForecastClient::new(client, forecast_url),
        )
    }

    /// Run both calls in order. The forecast is never requested when geocoding fails.
    #[instrument(skip_all, fields(query = %query), level = "info")]
    pub async fn run(&self, query: &PlaceQuery) -> Result<LookupReport, LookupError> {
        let place = self.geocoder.resolve(query.as_str()).await?;
        let conditions = self
            .forecast
            .fetch_current(place.latitude, place.longitude)
            .await?;

        Ok(LookupReport { place, conditions })
    }
}
