//! WMO weather code lookup.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

/// Icon and label for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionDescriptor {
    pub icon: &'static str,
    pub label: &'static str,
}

impl ConditionDescriptor {
    const fn new(icon: &'static str, label: &'static str) -> Self {
        Self { icon, label }
    }
}

/// Returned for any code outside the table
pub const FALLBACK: ConditionDescriptor = ConditionDescriptor::new("🌥", "Weather");

/// Describe a WMO weather code. Unknown codes get `FALLBACK`.
pub fn describe(code: i32) -> ConditionDescriptor {
    match code {
        0 => ConditionDescriptor::new("☀", "Clear sky"),
        1 => ConditionDescriptor::new("🌤", "Mainly clear"),
        2 => ConditionDescriptor::new("⛅", "Partly cloudy"),
        3 => ConditionDescriptor::new("☁", "Overcast"),
        45 => ConditionDescriptor::new("🌫", "Fog"),
        48 => ConditionDescriptor::new("🌫", "Depositing rime fog"),
        51 => ConditionDescriptor::new("🌦", "Light drizzle"),
        53 => ConditionDescriptor::new("🌦", "Moderate drizzle"),
        55 => ConditionDescriptor::new("🌦", "Dense drizzle"),
        61 => ConditionDescriptor::new("🌧", "Slight rain"),
        63 => ConditionDescriptor::new("🌧", "Moderate rain"),
        65 => ConditionDescriptor::new("🌧", "Heavy rain"),
        71 => ConditionDescriptor::new("🌨", "Slight snow"),
        73 => ConditionDescriptor::new("🌨", "Moderate snow"),
        75 => ConditionDescriptor::new("🌨", "Heavy snow"),
        77 => ConditionDescriptor::new("❄", "Snow grains"),
        80 => ConditionDescriptor::new("🌦", "Rain showers"),
        81 => ConditionDescriptor::new("🌧", "Rain showers"),
        82 => ConditionDescriptor::new("⛈", "Violent rain showers"),
        85 => ConditionDescriptor::new("🌨", "Snow showers"),
        86 => ConditionDescriptor::new("🌨", "Heavy snow showers"),
        95 => ConditionDescriptor::new("⛈", "Thunderstorm"),
        96 => ConditionDescriptor::new("⛈", "Thunderstorm w/ hail"),
        99 => ConditionDescriptor::new("⛈", "Thunderstorm w/ heavy hail"),
        _ => FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_sky() {
        assert_eq!(describe(0), ConditionDescriptor::new("☀", "Clear sky"));
    }

    #[test]
    fn test_overcast() {
        assert_eq!(describe(3).label, "Overcast");
        assert_eq!(describe(3).icon, "☁");
    }

    #[test]
    fn test_thunderstorm() {
        assert_eq!(describe(95), ConditionDescriptor::new("⛈", "Thunderstorm"));
        assert_eq!(describe(99).label, "Thunderstorm w/ heavy hail");
    }

    #[test]
    fn test_rain_showers_share_label() {
        assert_eq!(describe(80).label, describe(81).label);
        assert_ne!(describe(80).icon, describe(81).icon);
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        for code in [12, 200, -1, 4, 56, 66, i32::MAX, i32::MIN] {
            assert_eq!(describe(code), FALLBACK, "code {code}");
        }
        assert_eq!(FALLBACK.label, "Weather");
    }

    #[test]
    fn test_every_known_code_is_distinct_from_fallback() {
        let known = [
            0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95,
            96, 99,
        ];
        for code in known {
            assert_ne!(describe(code), FALLBACK, "code {code}");
        }
    }
}
