use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Measurement units requested from the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

/// Geographic position captured once from the geolocation service.
///
/// Both components are rounded to 2 decimal digits at capture, which keeps
/// the display and the query parameters stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Capture a raw fix, applying the 2-decimal rounding.
    pub fn capture(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: round2(latitude),
            longitude: round2(longitude),
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// A resolved search, consumed exactly once to build a weather target.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Coordinate search, produced by selecting an autocomplete suggestion.
    ByCoordinates { lat: f64, lon: f64 },
    /// Free-text search, produced by submitting the raw input.
    ByName { text: String },
}

impl SearchQuery {
    pub fn from_position(position: Coordinates) -> Self {
        SearchQuery::ByCoordinates {
            lat: position.latitude,
            lon: position.longitude,
        }
    }
}

/// A candidate place returned by geocoding autocomplete.
///
/// Suggestions are ephemeral: the list lives only while one dropdown is
/// open and is replaced wholesale on each refetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl CitySuggestion {
    /// Display label shown in the dropdown and kept after selection.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Weather condition as reported by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    /// Icon code, e.g. "01d". Passed through to the theme resolver.
    pub icon: String,
}

/// The fetched weather payload. Immutable once received; a successful
/// fetch wholly replaces the previous snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub condition: WeatherCondition,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub wind_direction_deg: u16,
    pub visibility_m: u32,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_rounds_to_two_decimals() {
        let pos = Coordinates::capture(40.4168213, -3.7037902);
        assert_eq!(pos.latitude, 40.42);
        assert_eq!(pos.longitude, -3.70);
    }

    #[test]
    fn capture_is_stable_for_already_rounded_input() {
        let pos = Coordinates::capture(51.51, -0.13);
        assert_eq!(pos.latitude, 51.51);
        assert_eq!(pos.longitude, -0.13);
    }

    #[test]
    fn query_from_position_preserves_captured_values() {
        let pos = Coordinates::capture(40.41, -3.70);
        let query = SearchQuery::from_position(pos);
        assert_eq!(
            query,
            SearchQuery::ByCoordinates {
                lat: 40.41,
                lon: -3.70
            }
        );
    }

    #[test]
    fn suggestion_label_joins_name_and_country() {
        let suggestion = CitySuggestion {
            name: "London".to_string(),
            country: "GB".to_string(),
            state: None,
            lat: 51.51,
            lon: -0.13,
        };
        assert_eq!(suggestion.label(), "London, GB");
    }
}
