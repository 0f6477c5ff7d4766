use crate::core::presentation;
use crate::core::workflow::SearchWorkflow;
use crate::domain::model::{DisplayUnit, WorkflowResult};
use crate::domain::ports::{GeocodingService, QueryStore, WeatherService};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Drives the workflow for one user: holds the display unit and discards
/// results of searches that were superseded before they resolved.
pub struct SearchSession<G, W, S> {
    workflow: SearchWorkflow<G, W, S>,
    generation: AtomicU64,
    unit: DisplayUnit,
}

impl<G, W, S> SearchSession<G, W, S>
where
    G: GeocodingService,
    W: WeatherService,
    S: QueryStore,
{
    pub fn new(workflow: SearchWorkflow<G, W, S>, unit: DisplayUnit) -> Self {
        Self {
            workflow,
            generation: AtomicU64::new(0),
            unit,
        }
    }

    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// `None` when there is nothing to display: the query was empty, or a
    /// newer search was dispatched while this one was in flight.
    pub async fn search(&self, query: &str) -> Option<WorkflowResult> {
        if query.trim().is_empty() {
            return None;
        }

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.workflow.execute(query).await;

        let latest = self.generation.load(Ordering::SeqCst);
        if latest != ticket {
            debug!(
                "Discarding result of search #{} for '{}' (latest is #{})",
                ticket, query, latest
            );
            return None;
        }

        Some(result)
    }

    /// Re-runs the remembered query, if any.
    pub async fn restore(&self) -> Option<WorkflowResult> {
        match self.workflow.store().last_query().await {
            Ok(Some(query)) => self.search(&query).await,
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read last query: {}", e);
                None
            }
        }
    }

    /// Switches the unit and re-runs the remembered query so temperatures
    /// re-render in the new unit.
    pub async fn set_unit(&mut self, unit: DisplayUnit) -> Option<WorkflowResult> {
        debug!("Display unit changed from {} to {}", self.unit, unit);
        self.unit = unit;
        self.restore().await
    }

    pub fn render(&self, result: &WorkflowResult) -> String {
        presentation::render(result, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryQueryStore;
    use crate::domain::model::{
        CurrentConditions, ForecastQuery, LocationCandidate, WeatherReport,
    };
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::sync::{Mutex, Notify};

    /// Geocoder that blocks queries named "slow" until released.
    #[derive(Clone, Default)]
    struct GatedGeocoder {
        gate: Arc<Notify>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl GeocodingService for GatedGeocoder {
        async fn search(
            &self,
            name: &str,
            _limit: usize,
            _language: &str,
        ) -> Result<Vec<LocationCandidate>> {
            self.calls.lock().await.push(name.to_string());
            if name == "slow" {
                self.gate.notified().await;
            }
            Ok(vec![LocationCandidate {
                name: name.to_string(),
                admin1: None,
                country: None,
                latitude: 1.0,
                longitude: 2.0,
            }])
        }
    }

    struct FixedWeather;

    #[async_trait]
    impl WeatherService for FixedWeather {
        async fn forecast(&self, _query: &ForecastQuery) -> Result<WeatherReport> {
            Ok(WeatherReport {
                current: Some(CurrentConditions {
                    timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                        .unwrap()
                        .and_hms_opt(9, 0, 0)
                        .unwrap(),
                    temperature: 10.0,
                    wind_speed: 5.0,
                    wind_direction: 90.0,
                    condition_code: 0,
                }),
                daily: None,
            })
        }
    }

    fn session(
        geocoder: GatedGeocoder,
        store: MemoryQueryStore,
    ) -> SearchSession<GatedGeocoder, FixedWeather, MemoryQueryStore> {
        SearchSession::new(
            SearchWorkflow::new(geocoder, FixedWeather, store),
            DisplayUnit::Celsius,
        )
    }

    fn label(result: &WorkflowResult) -> &str {
        match result {
            WorkflowResult::Success { label, .. } => label,
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_search_returns_result() {
        let session = session(GatedGeocoder::default(), MemoryQueryStore::new());

        let result = session.search("fast").await.unwrap();

        assert_eq!(label(&result), "fast");
        assert_eq!(session.generation(), 1);
    }

    #[tokio::test]
    async fn test_empty_query_is_not_stamped() {
        let session = session(GatedGeocoder::default(), MemoryQueryStore::new());

        assert!(session.search("  ").await.is_none());
        assert_eq!(session.generation(), 0);
    }

    #[tokio::test]
    async fn test_superseded_search_is_discarded() {
        let geocoder = GatedGeocoder::default();
        let gate = geocoder.gate.clone();
        let session = session(geocoder, MemoryQueryStore::new());

        let (slow, fast) = tokio::join!(session.search("slow"), async {
            let fast = session.search("fast").await;
            gate.notify_one();
            fast
        });

        assert!(slow.is_none());
        assert_eq!(label(&fast.unwrap()), "fast");
        assert_eq!(session.generation(), 2);
    }

    #[tokio::test]
    async fn test_restore_runs_remembered_query() {
        let geocoder = GatedGeocoder::default();
        let store = MemoryQueryStore::with_query("Lisbon");
        let session = session(geocoder.clone(), store);

        let result = session.restore().await.unwrap();

        assert_eq!(label(&result), "Lisbon");
        assert_eq!(geocoder.calls.lock().await.as_slice(), &["Lisbon".to_string()]);
    }

    #[tokio::test]
    async fn test_restore_without_remembered_query() {
        let geocoder = GatedGeocoder::default();
        let session = session(geocoder.clone(), MemoryQueryStore::new());

        assert!(session.restore().await.is_none());
        assert!(geocoder.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unit_toggle_reruns_last_query() {
        let geocoder = GatedGeocoder::default();
        let mut session = session(geocoder.clone(), MemoryQueryStore::new());

        let first = session.search("Lisbon").await.unwrap();
        assert!(session.render(&first).contains("10°C"));

        let rerun = session.set_unit(DisplayUnit::Fahrenheit).await.unwrap();

        assert_eq!(session.unit(), DisplayUnit::Fahrenheit);
        assert!(session.render(&rerun).contains("50°F"));
        assert_eq!(geocoder.calls.lock().await.len(), 2);
    }
}
