use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::condition::{describe, ConditionDescriptor};

/// A place name ready to be geocoded: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// First geocoding match for a place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub country_code: Option<String>,
}

/// Current weather conditions at a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    /// Always within 0..=359
    pub wind_direction_deg: u16,
    /// WMO weather interpretation code
    pub condition_code: i32,
    /// Observation wall-clock time as reported by the forecast service
    pub observed_at: NaiveDateTime,
}

impl CurrentConditions {
    pub fn descriptor(&self) -> ConditionDescriptor {
        describe(self.condition_code)
    }
}

/// Everything a successful lookup produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupReport {
    pub place: GeoResult,
    pub conditions: CurrentConditions,
}

impl LookupReport {
    pub fn descriptor(&self) -> ConditionDescriptor {
        self.conditions.descriptor()
    }
}
