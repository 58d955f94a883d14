use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::WeatherError;
use crate::model::WeatherSnapshot;

pub mod openweather;

/// Seam between the orchestrator and the weather endpoint.
///
/// The target is a fully built URL (see [`crate::search::SearchService`]);
/// the provider only performs the fetch and decodes the payload. Tests
/// substitute a scripted implementation here.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, target: &str) -> Result<WeatherSnapshot, WeatherError>;
}
