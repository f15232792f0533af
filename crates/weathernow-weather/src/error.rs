//! Lookup error types.

use thiserror::Error;

/// Which upstream service produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Geocoding,
    Forecast,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Geocoding => f.write_str("geocoding"),
            Service::Forecast => f.write_str("forecast"),
        }
    }
}

pub const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Geocoding failed: {0}")]
    GeocodingTransport(String),

    #[error("City not found")]
    CityNotFound,

    #[error("Weather fetch failed: {0}")]
    ForecastTransport(String),

    #[error("Malformed {service} response: {detail}")]
    MalformedResponse { service: Service, detail: String },

    #[error("{}", .0.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Unknown(Option<String>),
}

impl LookupError {
    pub fn malformed(service: Service, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            service,
            detail: detail.into(),
        }
    }

    /// Message shown to the user when a lookup fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::GeocodingTransport(_) => "Geocoding failed".to_string(),
            Self::CityNotFound => "City not found".to_string(),
            Self::ForecastTransport(_) => "Weather fetch failed".to_string(),
            Self::MalformedResponse { service, .. } => {
                format!("Received an unexpected response from the {} service", service)
            }
            Self::Unknown(Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            Self::Unknown(_) => FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Convert a failed lookup task into an error, keeping any panic message.
    pub fn from_join(err: tokio::task::JoinError) -> Self {
        if !err.is_panic() {
            return Self::Unknown(None);
        }
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned());
        Self::Unknown(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            LookupError::GeocodingTransport("503".into()).user_message(),
            "Geocoding failed"
        );
        assert_eq!(LookupError::CityNotFound.user_message(), "City not found");
        assert_eq!(
            LookupError::ForecastTransport("connection refused".into()).user_message(),
            "Weather fetch failed"
        );
        assert!(LookupError::malformed(Service::Forecast, "missing current_weather")
            .user_message()
            .contains("forecast"));
    }

    #[test]
    fn test_unknown_falls_back_to_generic_message() {
        assert_eq!(LookupError::Unknown(None).user_message(), FALLBACK_MESSAGE);
        assert_eq!(LookupError::Unknown(Some("  ".into())).user_message(), FALLBACK_MESSAGE);
        assert_eq!(LookupError::Unknown(Some("boom".into())).user_message(), "boom");
        assert_eq!(LookupError::Unknown(None).to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = LookupError::GeocodingTransport("HTTP 502 Bad Gateway".into());
        assert!(err.to_string().contains("502"));
        assert!(!err.user_message().contains("502"));
    }

    #[tokio::test]
    async fn test_from_join_keeps_panic_message() {
        let handle = tokio::spawn(async { panic!("forecast exploded") });
        let err = handle.await.unwrap_err();
        let lookup_err = LookupError::from_join(err);
        assert_eq!(lookup_err.user_message(), "forecast exploded");
    }
}
