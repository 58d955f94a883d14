//! Core library for the `skycast` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - One-shot geolocation with a bounded wait
//! - City search: weather-target construction and autocomplete suggestions
//! - The search-input state machine
//! - The orchestrator merging geolocation, search, and the weather fetch
//!   into one loading/error/data view model
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod geolocate;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod search;

pub use config::Config;
pub use controller::{SearchBox, SearchEffect, SearchState};
pub use error::{GeolocateError, SuggestError, ViewError, WeatherError};
pub use geolocate::Geolocator;
pub use model::{CitySuggestion, Coordinates, SearchQuery, Units, WeatherSnapshot};
pub use orchestrator::{DashboardView, GeoState, WeatherOrchestrator};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use search::SearchService;
