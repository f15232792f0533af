mod cli;
mod render;
mod session;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use weathernow_core::{AppError, Config, NetworkError};
use weathernow_weather::{build_http_client, LookupController, WeatherLookup};

use crate::cli::Args;
use crate::session::Outcome;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args: Args = argh::from_env();

    weathernow_core::init(args.verbose)?;

    let controller = match build_controller(&args) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    match args.one_shot_query() {
        Some(query) => match session::run_once(&controller, &query, args.json).await? {
            Outcome::Success(text) => {
                println!("{}", text);
                Ok(ExitCode::SUCCESS)
            }
            Outcome::Failed(message) => {
                eprintln!("{}", message);
                Ok(ExitCode::FAILURE)
            }
            Outcome::Idle => {
                println!("{}", render::IDLE_PROMPT);
                Ok(ExitCode::SUCCESS)
            }
        },
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run_interactive(Arc::new(controller), stdin, tokio::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_controller(args: &Args) -> Result<LookupController, AppError> {
    let (config, _validation) = Config::load_validated(args.config.as_deref())?;

    let client = build_http_client(config.http.timeout(), &config.http.user_agent)
        .map_err(NetworkError::from)?;

    tracing::debug!(
        "Using geocoding at {} and forecast at {}",
        config.geocoding.base_url,
        config.forecast.base_url
    );

    let lookup = WeatherLookup::with_client(
        client,
        &config.geocoding.base_url,
        &config.forecast.base_url,
    );
    Ok(LookupController::new(lookup))
}
