//! Location search: weather-target construction and geocoding autocomplete.
//!
//! `weather_target` is pure and deterministic; only `suggestions` touches
//! the network. The API key is injected at construction and never read
//! from ambient state.

use reqwest::Client;

use crate::error::SuggestError;
use crate::model::{CitySuggestion, SearchQuery, Units};

const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Autocomplete on short fragments is noise; the service does not even
/// issue the request below this many characters.
const MIN_QUERY_CHARS: usize = 2;

/// Bounded lookup: the dropdown never shows more than this many matches.
const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct SearchService {
    api_key: String,
    units: Units,
    http: Client,
    weather_url: String,
    geocoding_url: String,
}

impl SearchService {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            units,
            http: Client::new(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_urls(
        api_key: String,
        units: Units,
        weather_url: &str,
        geocoding_url: &str,
    ) -> Self {
        Self {
            api_key,
            units,
            http: Client::new(),
            weather_url: weather_url.to_string(),
            geocoding_url: geocoding_url.to_string(),
        }
    }

    /// Build the weather fetch target for a resolved query. Pure, no I/O.
    ///
    /// Coordinates pass through exactly as resolved; free text is URL
    /// encoded and decodes back to the original.
    pub fn weather_target(&self, query: &SearchQuery) -> String {
        match query {
            SearchQuery::ByCoordinates { lat, lon } => format!(
                "{}?lat={lat}&lon={lon}&appid={}&units={}",
                self.weather_url,
                self.api_key,
                self.units.as_str()
            ),
            SearchQuery::ByName { text } => format!(
                "{}?q={}&appid={}&units={}",
                self.weather_url,
                urlencoding::encode(text),
                self.api_key,
                self.units.as_str()
            ),
        }
    }

    /// Fetch up to [`SUGGESTION_LIMIT`] city suggestions for `text`.
    ///
    /// Inputs shorter than [`MIN_QUERY_CHARS`] return an empty list without
    /// a network call. Errors are returned to the caller, who is expected
    /// to degrade to an empty dropdown rather than fail the view.
    pub async fn suggestions(&self, text: &str) -> Result<Vec<CitySuggestion>, SuggestError> {
        if text.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}?q={}&limit={}&appid={}",
            self.geocoding_url,
            urlencoding::encode(text),
            SUGGESTION_LIMIT,
            self.api_key
        );

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SuggestError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(SuggestError::Http {
                status: status.as_u16(),
            });
        }

        let suggestions: Vec<CitySuggestion> = res
            .json()
            .await
            .map_err(|e| SuggestError::Transport(e.to_string()))?;

        tracing::debug!(query = %text, count = suggestions.len(), "geocoding suggestions fetched");

        Ok(suggestions)
    }
}
