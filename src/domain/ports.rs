use crate::domain::model::{ForecastQuery, LocationCandidate, WeatherReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Candidates for `name`, best-ranked first. An empty list is not an error.
    async fn search(
        &self,
        name: &str,
        limit: usize,
        language: &str,
    ) -> Result<Vec<LocationCandidate>>;
}

#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Current conditions and daily forecast. Missing blocks are `None`, not errors.
    async fn forecast(&self, query: &ForecastQuery) -> Result<WeatherReport>;
}

/// Single-slot store for the last successfully geocoded query.
pub trait QueryStore: Send + Sync {
    fn last_query(&self) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn remember_query(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings the HTTP adapter and workflow read at startup.
pub trait ConfigProvider: Send + Sync {
    fn geocoding_url(&self) -> &str;
    fn forecast_url(&self) -> &str;
    fn language(&self) -> &str;
    fn result_count(&self) -> usize;
    fn request_timeout(&self) -> Duration;
}
