use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::error::WeatherError;
use crate::model::{WeatherCondition, WeatherSnapshot};

use super::WeatherProvider;

#[derive(Debug, Clone, Default)]
pub struct OpenWeatherProvider {
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    /// Meters; the endpoint omits it when unlimited.
    #[serde(default)]
    visibility: u32,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| WeatherCondition {
                main: w.main,
                description: w.description,
                icon: w.icon,
            })
            .unwrap_or_else(|| WeatherCondition {
                main: "Unknown".to_string(),
                description: "Unknown".to_string(),
                icon: String::new(),
            });

        WeatherSnapshot {
            location_name: self.name,
            condition,
            temperature: self.main.temp,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity_pct: self.main.humidity,
            wind_speed: self.wind.speed,
            wind_direction_deg: self.wind.deg,
            visibility_m: self.visibility,
            fetched_at: Utc::now(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, target: &str) -> Result<WeatherSnapshot, WeatherError> {
        let res = self
            .http
            .get(target)
            .send()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %truncate_body(&body),
                "weather request rejected");
            return Err(WeatherError::Http {
                status: status.as_u16(),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(body = %truncate_body(&body), "weather payload did not decode");
            WeatherError::Decode(e.to_string())
        })?;

        Ok(parsed.into_snapshot())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
