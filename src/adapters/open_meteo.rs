//! Open-Meteo geocoding and forecast endpoints. No API key required.

use crate::domain::model::{
    CurrentConditions, DailyForecastSeries, ForecastQuery, LocationCandidate, WeatherReport,
};
use crate::domain::ports::{ConfigProvider, GeocodingService, WeatherService};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::{Client, Response};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const USER_AGENT: &str = concat!("weather-lookup/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<LocationCandidate>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(deserialize_with = "deserialize_local_time")]
    time: NaiveDateTime,
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: i32,
}

/// Open-Meteo writes `null` for values it has no data for, and may drop a
/// requested column entirely.
#[derive(Debug, Deserialize)]
struct DailyData {
    #[serde(default)]
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    temperature_2m_min: Option<Vec<Option<f64>>>,
    #[serde(default)]
    weathercode: Option<Vec<Option<i32>>>,
}

/// A missing column becomes a column of blanks, one per date.
fn column_or_blank<T: Clone>(
    name: &str,
    column: Option<Vec<Option<T>>>,
    len: usize,
) -> Vec<Option<T>> {
    column.unwrap_or_else(|| {
        tracing::debug!("Daily column '{}' missing from forecast response", name);
        vec![None; len]
    })
}

/// Open-Meteo reports local times without seconds, e.g. "2024-06-01T14:00".
fn deserialize_local_time<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(serde::de::Error::custom)
}

impl From<CurrentWeather> for CurrentConditions {
    fn from(current: CurrentWeather) -> Self {
        Self {
            timestamp: current.time,
            temperature: current.temperature,
            wind_speed: current.windspeed,
            wind_direction: current.winddirection,
            condition_code: current.weathercode,
        }
    }
}

impl From<DailyData> for DailyForecastSeries {
    fn from(daily: DailyData) -> Self {
        let len = daily.time.len();
        DailyForecastSeries::from_sparse_columns(
            daily.time,
            column_or_blank("temperature_2m_max", daily.temperature_2m_max, len),
            column_or_blank("temperature_2m_min", daily.temperature_2m_min, len),
            column_or_blank("weathercode", daily.weathercode, len),
        )
    }
}

/// HTTP client for both Open-Meteo services.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_endpoints(
            config.geocoding_url(),
            config.forecast_url(),
            config.request_timeout(),
        )
    }

    pub fn with_endpoints(
        geocoding_url: &str,
        forecast_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            geocoding_url: geocoding_url.to_string(),
            forecast_url: forecast_url.to_string(),
        })
    }

    fn check_status(service: &'static str, response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("{} response status: {}", service, status);
        if status.is_success() {
            Ok(response)
        } else {
            Err(LookupError::HttpStatus { service, status })
        }
    }
}

#[async_trait]
impl GeocodingService for OpenMeteoClient {
    async fn search(
        &self,
        name: &str,
        limit: usize,
        language: &str,
    ) -> Result<Vec<LocationCandidate>> {
        tracing::debug!("Geocoding '{}' via {}", name, self.geocoding_url);

        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("name", name.to_string()),
                ("count", limit.to_string()),
                ("language", language.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?;

        let body: GeocodingResponse = Self::check_status("geocoding", response)?.json().await?;
        let candidates = body.results.unwrap_or_default();

        tracing::debug!("Geocoding '{}' returned {} candidates", name, candidates.len());
        Ok(candidates)
    }
}

#[async_trait]
impl WeatherService for OpenMeteoClient {
    async fn forecast(&self, query: &ForecastQuery) -> Result<WeatherReport> {
        tracing::debug!(
            "Fetching forecast for ({:.4}, {:.4}) via {}",
            query.latitude,
            query.longitude,
            self.forecast_url
        );

        let mut params = vec![
            ("latitude", query.latitude.to_string()),
            ("longitude", query.longitude.to_string()),
            ("current_weather", query.current.to_string()),
            ("timezone", query.timezone.clone()),
        ];
        if !query.daily.is_empty() {
            params.push(("daily", query.daily_param()));
        }

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&params)
            .send()
            .await?;

        let body: ForecastResponse = Self::check_status("forecast", response)?.json().await?;

        Ok(WeatherReport {
            current: body.current_weather.map(CurrentConditions::from),
            daily: body.daily.map(DailyForecastSeries::from),
        })
    }
}
