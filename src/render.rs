//! Terminal presentation of the lookup state.

use weathernow_weather::{GeoResult, LookupReport, LookupState};

pub const LOADING: &str = "Loading…";
pub const IDLE_PROMPT: &str = "Search any city to see current weather.";

/// Display-ready fields of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub icon: String,
    pub temperature: String,
    pub place: String,
    pub observed: String,
    pub condition: String,
    pub wind: String,
    pub direction: String,
}

impl WeatherCard {
    pub fn from_report(report: &LookupReport) -> Self {
        let descriptor = report.descriptor();
        let conditions = &report.conditions;

        Self {
            icon: descriptor.icon.to_string(),
            temperature: format_temperature(conditions.temperature_c),
            place: format_place(&report.place),
            observed: conditions.observed_at.format("%Y-%m-%d %H:%M").to_string(),
            condition: descriptor.label.to_string(),
            wind: format!("{} km/h", format_number(conditions.wind_speed_kmh)),
            direction: format!("{}°", conditions.wind_direction_deg),
        }
    }
}

impl std::fmt::Display for WeatherCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}  {}", self.icon, self.temperature)?;
        writeln!(f, "{}", self.place)?;
        writeln!(f, "🕒 {}", self.observed)?;
        writeln!(f, "{:<10} {}", "Condition", self.condition)?;
        writeln!(f, "{:<10} {}", "Wind", self.wind)?;
        write!(f, "{:<10} {}", "Direction", self.direction)
    }
}

/// Render whichever state the lookup is in
pub fn render(state: &LookupState) -> String {
    match state {
        LookupState::Idle => IDLE_PROMPT.to_string(),
        LookupState::Loading { .. } => LOADING.to_string(),
        LookupState::Failed(message) => message.clone(),
        LookupState::Success(report) => WeatherCard::from_report(report).to_string(),
    }
}

/// Nearest whole degree, ties toward +∞ (-0.5 shows as 0, 2.5 as 3)
fn format_temperature(celsius: f64) -> String {
    let rounded = (celsius + 0.5).floor() as i64;
    format!("{}°C", rounded)
}

fn format_place(place: &GeoResult) -> String {
    match place.country_code.as_deref() {
        Some(code) => format!("{} • {}", place.display_name, code),
        None => place.display_name.clone(),
    }
}

/// Whole numbers without a trailing `.0`, everything else as received
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
