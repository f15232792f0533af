pub mod config;
pub mod error;

pub use config::{
    Config, ConfigIssue, ForecastConfig, GeocodingConfig, HttpConfig, ValidationResult,
};
pub use error::{AppError, ConfigError, NetworkError};

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output with `verbose`. Logs go to stderr; stdout belongs to the weather card.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("weathernow core initialized");
    Ok(())
}
