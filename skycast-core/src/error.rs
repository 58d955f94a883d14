//! Per-concern error types.
//!
//! Every failure here degrades to a renderable state; nothing is fatal to
//! the process. Geolocation and weather errors surface in the combined
//! dashboard view, suggestion errors collapse to an empty dropdown.

use thiserror::Error;

/// Geolocation failures. Terminal: the provider does not retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocateError {
    #[error("geolocation is disabled in configuration")]
    Unsupported,

    #[error("geolocation service refused the lookup: {0}")]
    Denied(String),

    #[error("geolocation request timed out")]
    Timeout,

    #[error("geolocation service unreachable: {0}")]
    Unavailable(String),
}

/// Weather fetch failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("weather request failed with status {status}")]
    Http { status: u16 },

    #[error("weather request failed: {0}")]
    Transport(String),

    #[error("failed to decode weather payload: {0}")]
    Decode(String),
}

/// Suggestion fetch failures. Swallowed at the controller boundary and
/// presented as "no suggestions found", never as a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    #[error("suggestion request failed with status {status}")]
    Http { status: u16 },

    #[error("suggestion request failed: {0}")]
    Transport(String),
}

/// Combined, user-visible failure for the dashboard view.
///
/// Geolocation takes precedence when both concerns have failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Geolocate(#[from] GeolocateError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl ViewError {
    /// Message suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            ViewError::Geolocate(GeolocateError::Unsupported) => {
                "Location lookup is disabled. Search for a city instead.".to_string()
            }
            ViewError::Geolocate(GeolocateError::Denied(_)) => {
                "Your location could not be determined. Search for a city instead.".to_string()
            }
            ViewError::Geolocate(GeolocateError::Timeout) => {
                "Location lookup timed out. Search for a city instead.".to_string()
            }
            ViewError::Geolocate(GeolocateError::Unavailable(_)) => {
                "Location service unreachable. Check your connection.".to_string()
            }
            ViewError::Weather(WeatherError::Http { status: 404 }) => {
                "No weather data for that place. Check the city name.".to_string()
            }
            ViewError::Weather(WeatherError::Http { status: 401 }) => {
                "The weather service rejected the API key. Run `skycast configure`.".to_string()
            }
            ViewError::Weather(WeatherError::Http { status }) => {
                format!("Weather service error (status {status}). Try again later.")
            }
            ViewError::Weather(WeatherError::Transport(_)) => {
                "Could not reach the weather service. Check your connection.".to_string()
            }
            ViewError::Weather(WeatherError::Decode(_)) => {
                "The weather service returned an unexpected payload.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_error_wraps_both_concerns() {
        let geo: ViewError = GeolocateError::Timeout.into();
        assert!(matches!(geo, ViewError::Geolocate(GeolocateError::Timeout)));

        let weather: ViewError = WeatherError::Http { status: 502 }.into();
        assert!(matches!(
            weather,
            ViewError::Weather(WeatherError::Http { status: 502 })
        ));
    }

    #[test]
    fn user_messages_are_actionable() {
        let err: ViewError = GeolocateError::Denied("quota".into()).into();
        assert!(err.user_message().contains("Search for a city"));

        let err: ViewError = WeatherError::Http { status: 401 }.into();
        assert!(err.user_message().contains("configure"));

        let err: ViewError = WeatherError::Http { status: 404 }.into();
        assert!(err.user_message().contains("city name"));
    }

    #[test]
    fn display_carries_the_status() {
        let err = WeatherError::Http { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
