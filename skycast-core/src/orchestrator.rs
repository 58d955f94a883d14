//! The merge point of the dashboard.
//!
//! Three asynchronous lifecycles feed this component: the one-shot
//! geolocation fix, resolved search queries, and the weather fetch itself.
//! The orchestrator folds them into one `{weather, is_loading, error}`
//! view. It performs no I/O of its own: drivers report events, ask for a
//! fetch plan, run it through the [`WeatherProvider`] seam, and feed the
//! completion back. Completions carry a generation so one that was
//! superseded mid-flight is a no-op instead of a state corruption.

use crate::error::{GeolocateError, ViewError, WeatherError};
use crate::model::{Coordinates, SearchQuery, WeatherSnapshot};
use crate::provider::WeatherProvider;
use crate::search::SearchService;

/// Geolocation as seen by the orchestrator. Moves out of `Pending` exactly
/// once.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoState {
    Pending,
    Ready(Coordinates),
    Failed(GeolocateError),
}

/// A fetch the orchestrator decided to run. The generation ties the
/// eventual completion back to this decision.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFetch {
    pub generation: u64,
    pub target: String,
}

/// Everything the presentation layer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub weather: Option<WeatherSnapshot>,
    /// Human-readable place label from the last search, when one exists.
    pub location_label: Option<String>,
    pub is_loading: bool,
    pub error: Option<ViewError>,
}

pub struct WeatherOrchestrator {
    search: SearchService,
    provider: Box<dyn WeatherProvider>,
    geo: GeoState,
    /// Once set, always authoritative over geolocation.
    active_query: Option<SearchQuery>,
    location_label: Option<String>,
    snapshot: Option<WeatherSnapshot>,
    fetching: bool,
    weather_error: Option<WeatherError>,
    generation: u64,
}

impl std::fmt::Debug for WeatherOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherOrchestrator")
            .field("geo", &self.geo)
            .field("active_query", &self.active_query)
            .field("fetching", &self.fetching)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl WeatherOrchestrator {
    pub fn new(search: SearchService, provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            search,
            provider,
            geo: GeoState::Pending,
            active_query: None,
            location_label: None,
            snapshot: None,
            fetching: false,
            weather_error: None,
            generation: 0,
        }
    }

    /// The one-shot geolocation finished, either way. Terminal.
    pub fn geolocation_resolved(&mut self, result: Result<Coordinates, GeolocateError>) {
        self.geo = match result {
            Ok(position) => GeoState::Ready(position),
            Err(e) => {
                tracing::debug!(error = %e, "geolocation failed; search remains available");
                GeoState::Failed(e)
            }
        };
    }

    /// A search resolved upstream. From this point geolocation is only
    /// history: it never influences the fetch target again.
    pub fn query_resolved(&mut self, query: SearchQuery, label: String) {
        self.active_query = Some(query);
        self.location_label = Some(label);
    }

    /// Decide the next fetch, re-evaluated after every input change.
    ///
    /// Precedence: a resolved query is authoritative; otherwise the
    /// geolocated position once it is ready. A pending fix defers, a
    /// failed fix with no query stays idle (the view carries the error).
    pub fn plan_fetch(&mut self) -> Option<PlannedFetch> {
        let query = match (&self.active_query, &self.geo) {
            (Some(query), _) => query.clone(),
            (None, GeoState::Ready(position)) => SearchQuery::from_position(*position),
            (None, GeoState::Pending) | (None, GeoState::Failed(_)) => return None,
        };

        let target = self.search.weather_target(&query);
        self.generation += 1;
        self.fetching = true;
        self.weather_error = None;

        tracing::debug!(generation = self.generation, ?query, "planning weather fetch");

        Some(PlannedFetch {
            generation: self.generation,
            target,
        })
    }

    /// A weather fetch completed. Applies only if it is still the newest
    /// plan; a superseded completion is discarded.
    pub fn fetch_resolved(
        &mut self,
        generation: u64,
        result: Result<WeatherSnapshot, WeatherError>,
    ) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding superseded weather fetch"
            );
            return;
        }

        self.fetching = false;
        match result {
            Ok(snapshot) => {
                // Wholesale replacement; snapshots are never merged.
                self.snapshot = Some(snapshot);
                self.weather_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "weather fetch failed");
                self.weather_error = Some(e);
            }
        }
    }

    /// Plan and run one fetch to completion through the provider seam.
    pub async fn run_fetch(&mut self) {
        let Some(plan) = self.plan_fetch() else {
            return;
        };
        let result = self.provider.fetch(&plan.target).await;
        self.fetch_resolved(plan.generation, result);
    }

    /// The combined view model: loading is the OR of the geolocation and
    /// fetch concerns, the error is geolocation's when present, otherwise
    /// the weather fetch's.
    pub fn view(&self) -> DashboardView {
        let geo_loading = self.geo == GeoState::Pending;
        let error = match &self.geo {
            GeoState::Failed(e) => Some(ViewError::Geolocate(e.clone())),
            _ => self.weather_error.clone().map(ViewError::Weather),
        };

        DashboardView {
            weather: self.snapshot.clone(),
            location_label: self.location_label.clone(),
            is_loading: geo_loading || self.fetching,
            error,
        }
    }
}
