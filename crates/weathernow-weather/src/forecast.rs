//! Current conditions from the Open-Meteo forecast API.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{LookupError, Service};
use crate::types::CurrentConditions;

/// Timestamp layouts the forecast service uses for `time`
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<RawCurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct RawCurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: i32,
    time: String,
}

impl TryFrom<RawCurrentWeather> for CurrentConditions {
    type Error = LookupError;

    fn try_from(raw: RawCurrentWeather) -> Result<Self, Self::Error> {
        for (field, value) in [
            ("temperature", raw.temperature),
            ("windspeed", raw.windspeed),
            ("winddirection", raw.winddirection),
        ] {
            if !value.is_finite() {
                return Err(LookupError::malformed(
                    Service::Forecast,
                    format!("{} is not a finite number", field),
                ));
            }
        }

        let observed_at = parse_time(&raw.time).ok_or_else(|| {
            LookupError::malformed(Service::Forecast, format!("unrecognized time {:?}", raw.time))
        })?;

        Ok(Self {
            temperature_c: raw.temperature,
            wind_speed_kmh: raw.windspeed,
            wind_direction_deg: normalize_direction(raw.winddirection),
            condition_code: raw.weathercode,
            observed_at,
        })
    }
}

fn parse_time(time: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
}

/// Round to whole degrees within 0..=359
fn normalize_direction(degrees: f64) -> u16 {
    degrees.round().rem_euclid(360.0) as u16 % 360
}

/// Client for the current-conditions endpoint
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the current conditions at a coordinate.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, LookupError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.base_url, latitude, longitude
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::debug!("Forecast request failed: {}", e);
            LookupError::ForecastTransport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Forecast returned status {}", status);
            return Err(LookupError::ForecastTransport(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::ForecastTransport(e.to_string()))?;

        parse_current(&body)
    }
}

fn parse_current(body: &str) -> Result<CurrentConditions, LookupError> {
    let parsed: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::malformed(Service::Forecast, e.to_string()))?;

    let raw = parsed
        .current_weather
        .ok_or_else(|| LookupError::malformed(Service::Forecast, "missing current_weather"))?;

    CurrentConditions::try_from(raw)
}
