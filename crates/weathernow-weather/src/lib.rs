//! Current-weather lookup for weathernow
//!
//! Resolves a place name through the Open-Meteo geocoding API, then fetches
//! current conditions from the Open-Meteo forecast API.

pub mod condition;
pub mod controller;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod lookup;
pub mod state;
pub mod types;

pub use condition::{describe, ConditionDescriptor};
pub use controller::{LookupController, LookupTicket};
pub use error::{LookupError, Service};
pub use forecast::ForecastClient;
pub use geocode::GeocoderClient;
pub use lookup::{build_http_client, WeatherLookup};
pub use state::LookupState;
pub use types::*;
