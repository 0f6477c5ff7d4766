use crate::core::presentation::location_label;
use crate::domain::model::{ForecastQuery, WorkflowResult};
use crate::domain::ports::{ConfigProvider, GeocodingService, QueryStore, WeatherService};
use tracing::{debug, info, warn};

pub const GEOCODING_FAILED: &str = "Geocoding failed";
pub const WEATHER_FETCH_FAILED: &str = "Weather fetch failed";

#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub result_count: usize,
    pub language: String,
}

impl WorkflowSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            result_count: config.result_count(),
            language: config.language().to_string(),
        }
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            result_count: 5,
            language: "en".to_string(),
        }
    }
}

/// Resolves a free-text query to a location and fetches its weather.
pub struct SearchWorkflow<G, W, S> {
    geocoder: G,
    weather: W,
    store: S,
    settings: WorkflowSettings,
}

impl<G, W, S> SearchWorkflow<G, W, S>
where
    G: GeocodingService,
    W: WeatherService,
    S: QueryStore,
{
    pub fn new(geocoder: G, weather: W, store: S) -> Self {
        Self::with_settings(geocoder, weather, store, WorkflowSettings::default())
    }

    pub fn with_settings(geocoder: G, weather: W, store: S, settings: WorkflowSettings) -> Self {
        Self {
            geocoder,
            weather,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: every collaborator error becomes a [`WorkflowResult`].
    pub async fn execute(&self, query: &str) -> WorkflowResult {
        if query.trim().is_empty() {
            debug!("Ignoring empty query");
            return WorkflowResult::Ignored;
        }

        info!("Searching weather for '{}'", query);

        let candidates = match self
            .geocoder
            .search(query, self.settings.result_count, &self.settings.language)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Geocoding '{}' failed: {}", query, e);
                return WorkflowResult::TransportError(GEOCODING_FAILED.to_string());
            }
        };

        let Some(location) = candidates.into_iter().next() else {
            info!("No location found for '{}'", query);
            return WorkflowResult::NotFound;
        };

        let label = location_label(&location);
        debug!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            query, label, location.latitude, location.longitude
        );

        // Persisted even when the weather fetch below fails.
        if let Err(e) = self.store.remember_query(query).await {
            warn!("Could not persist last query '{}': {}", query, e);
        }

        let report = match self
            .weather
            .forecast(&ForecastQuery::for_location(&location))
            .await
        {
            Ok(report) => report,
            Err(e) => {
                warn!("Weather fetch for {} failed: {}", label, e);
                return WorkflowResult::TransportError(WEATHER_FETCH_FAILED.to_string());
            }
        };

        let Some(current) = report.current else {
            info!("No current conditions for {}", label);
            return WorkflowResult::NoCurrentData;
        };

        match &report.daily {
            Some(daily) => debug!("Received {} forecast days for {}", daily.len(), label),
            None => debug!("No daily forecast for {}", label),
        }

        WorkflowResult::Success {
            label,
            current,
            forecast: report.daily,
        }
    }
}
