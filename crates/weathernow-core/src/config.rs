use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

/// One problem found in a config, keyed by its dotted TOML path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

/// Findings from [`Config::validate`]. Only `errors` stop startup.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(ConfigIssue {
            field,
            message: message.into(),
        });
    }

    fn caution(&mut self, field: &'static str, message: impl Into<String>) {
        self.warnings.push(ConfigIssue {
            field,
            message: message.into(),
        });
    }

    /// Every error as `field: message`, joined with `; `
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Place-name search endpoint
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Current-conditions endpoint
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_forecast_url")]
    pub base_url: String,
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout. Unset leaves the HTTP client's own default in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("weathernow/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Timeout override, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise. Nothing is ever written.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// [`Config::load`], then refuse to start on any validation error.
    ///
    /// Warnings are logged and handed back with the config.
    pub fn load_validated(
        explicit: Option<&Path>,
    ) -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load(explicit)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        check_endpoint(&mut result, "geocoding.base_url", &self.geocoding.base_url);
        check_endpoint(&mut result, "forecast.base_url", &self.forecast.base_url);

        match self.http.timeout_secs {
            Some(0) => result.reject("http.timeout_secs", "Timeout must be greater than 0"),
            Some(secs) if secs > 300 => result.caution(
                "http.timeout_secs",
                "Timeout is unusually long (>300 seconds)",
            ),
            _ => {}
        }

        if self.http.user_agent.trim().is_empty() {
            result.caution("http.user_agent", "Empty User-Agent may be rejected by the API");
        }

        result
    }

    /// Get the default path of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weathernow").join("config.toml"))
    }
}

/// Service base URLs must be absolute http(s) URLs with a host
fn check_endpoint(result: &mut ValidationResult, field: &'static str, raw: &str) {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            result.reject(field, format!("Invalid URL: {}", e));
            return;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        result.reject(
            field,
            format!("URL must use http or https scheme, got: {}", url.scheme()),
        );
    }
    if url.host().is_none() {
        result.reject(field, "URL must have a host");
    }
    if url.port() == Some(0) {
        result.reject(field, "Port cannot be 0");
    }
}
