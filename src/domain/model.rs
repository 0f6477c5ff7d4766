use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A place returned by the geocoder, best-ranked first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Local time at the location, as reported by the provider.
    pub timestamp: NaiveDateTime,
    /// Always Celsius.
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub condition_code: i32,
}

/// One row of a [`DailyForecastSeries`]. The provider may leave any value
/// of a row blank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub condition_code: Option<i32>,
}

/// Daily forecast as parallel, index-aligned columns of equal length.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DailyForecastSeries {
    dates: Vec<NaiveDate>,
    max_temperatures: Vec<Option<f64>>,
    min_temperatures: Vec<Option<f64>>,
    condition_codes: Vec<Option<i32>>,
}

impl DailyForecastSeries {
    /// Builds a series from fully populated columns.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        max_temperatures: Vec<f64>,
        min_temperatures: Vec<f64>,
        condition_codes: Vec<i32>,
    ) -> Self {
        Self::from_sparse_columns(
            dates,
            max_temperatures.into_iter().map(Some).collect(),
            min_temperatures.into_iter().map(Some).collect(),
            condition_codes.into_iter().map(Some).collect(),
        )
    }

    /// Builds a series from provider columns whose cells may be blank.
    /// Columns of unequal length are truncated to the shortest one so rows
    /// stay aligned.
    pub fn from_sparse_columns(
        mut dates: Vec<NaiveDate>,
        mut max_temperatures: Vec<Option<f64>>,
        mut min_temperatures: Vec<Option<f64>>,
        mut condition_codes: Vec<Option<i32>>,
    ) -> Self {
        let len = dates
            .len()
            .min(max_temperatures.len())
            .min(min_temperatures.len())
            .min(condition_codes.len());

        if [
            dates.len(),
            max_temperatures.len(),
            min_temperatures.len(),
            condition_codes.len(),
        ]
        .iter()
        .any(|&l| l != len)
        {
            tracing::warn!(
                "Daily forecast columns differ in length (dates={}, max={}, min={}, codes={}); truncating to {}",
                dates.len(),
                max_temperatures.len(),
                min_temperatures.len(),
                condition_codes.len(),
                len
            );
        }

        dates.truncate(len);
        max_temperatures.truncate(len);
        min_temperatures.truncate(len);
        condition_codes.truncate(len);

        Self {
            dates,
            max_temperatures,
            min_temperatures,
            condition_codes,
        }
    }

    /// Number of forecast days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// An empty series is valid and means "no forecast".
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn max_temperatures(&self) -> &[Option<f64>] {
        &self.max_temperatures
    }

    pub fn min_temperatures(&self) -> &[Option<f64>] {
        &self.min_temperatures
    }

    pub fn condition_codes(&self) -> &[Option<i32>] {
        &self.condition_codes
    }

    /// The row at `index`, or `None` past the end.
    pub fn day(&self, index: usize) -> Option<ForecastDay> {
        Some(ForecastDay {
            date: *self.dates.get(index)?,
            max_temperature: *self.max_temperatures.get(index)?,
            min_temperature: *self.min_temperatures.get(index)?,
            condition_code: *self.condition_codes.get(index)?,
        })
    }

    /// Rows in date order.
    pub fn days(&self) -> impl Iterator<Item = ForecastDay> + '_ {
        (0..self.len()).filter_map(move |i| self.day(i))
    }
}

/// Unit used when rendering temperatures. Data is always Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl DisplayUnit {
    /// Suffix appended to rendered temperatures.
    pub fn symbol(&self) -> &'static str {
        match self {
            DisplayUnit::Celsius => "°C",
            DisplayUnit::Fahrenheit => "°F",
        }
    }
}

impl FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" => Ok(DisplayUnit::Celsius),
            "f" | "fahrenheit" => Ok(DisplayUnit::Fahrenheit),
            other => Err(format!("unknown temperature unit '{}'", other)),
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayUnit::Celsius => write!(f, "celsius"),
            DisplayUnit::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

/// Daily variables that can be requested from the forecast service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyField {
    TemperatureMax,
    TemperatureMin,
    WeatherCode,
}

impl DailyField {
    /// Variable name as the forecast service spells it.
    pub fn api_name(&self) -> &'static str {
        match self {
            DailyField::TemperatureMax => "temperature_2m_max",
            DailyField::TemperatureMin => "temperature_2m_min",
            DailyField::WeatherCode => "weathercode",
        }
    }
}

/// Request for the forecast service.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub current: bool,
    pub daily: Vec<DailyField>,
    pub timezone: String,
}

impl ForecastQuery {
    /// Current conditions plus daily max/min/condition in the location's timezone.
    pub fn for_location(location: &LocationCandidate) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            current: true,
            daily: vec![
                DailyField::TemperatureMax,
                DailyField::TemperatureMin,
                DailyField::WeatherCode,
            ],
            timezone: "auto".to_string(),
        }
    }

    /// Comma-separated value for the `daily` request parameter.
    pub fn daily_param(&self) -> String {
        self.daily
            .iter()
            .map(DailyField::api_name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Both blocks are optional; their absence is not an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherReport {
    pub current: Option<CurrentConditions>,
    pub daily: Option<DailyForecastSeries>,
}

/// Outcome of one search. Every failure mode is a variant, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// Empty query; nothing was looked up.
    Ignored,
    TransportError(String),
    NotFound,
    NoCurrentData,
    Success {
        label: String,
        current: CurrentConditions,
        forecast: Option<DailyForecastSeries>,
    },
}

impl WorkflowResult {
    /// True when current conditions were found for the query.
    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowResult::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_series_keeps_columns_aligned() {
        let series = DailyForecastSeries::from_columns(
            vec![date(1), date(2)],
            vec![21.0, 23.5],
            vec![12.0, 14.1],
            vec![0, 61],
        );

        assert_eq!(series.len(), 2);
        let second = series.day(1).unwrap();
        assert_eq!(second.date, date(2));
        assert_eq!(second.max_temperature, Some(23.5));
        assert_eq!(second.min_temperature, Some(14.1));
        assert_eq!(second.condition_code, Some(61));
        assert!(series.day(2).is_none());
    }

    #[test]
    fn test_series_truncates_to_shortest_column() {
        let series = DailyForecastSeries::from_columns(
            vec![date(1), date(2), date(3)],
            vec![21.0, 23.5, 19.0],
            vec![12.0],
            vec![0, 61, 3],
        );

        assert_eq!(series.len(), 1);
        assert_eq!(series.max_temperatures(), &[Some(21.0)]);
        assert_eq!(series.condition_codes(), &[Some(0)]);
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = DailyForecastSeries::from_columns(vec![], vec![], vec![], vec![]);
        assert!(series.is_empty());
        assert_eq!(series.days().count(), 0);
    }

    #[test]
    fn test_sparse_series_keeps_blank_cells() {
        let series = DailyForecastSeries::from_sparse_columns(
            vec![date(1), date(2)],
            vec![Some(24.0), None],
            vec![Some(13.0), Some(12.5)],
            vec![Some(3), None],
        );

        assert_eq!(series.len(), 2);
        let second = series.day(1).unwrap();
        assert_eq!(second.max_temperature, None);
        assert_eq!(second.min_temperature, Some(12.5));
        assert_eq!(second.condition_code, None);
    }

    #[test]
    fn test_display_unit_parsing() {
        assert_eq!("celsius".parse::<DisplayUnit>(), Ok(DisplayUnit::Celsius));
        assert_eq!("F".parse::<DisplayUnit>(), Ok(DisplayUnit::Fahrenheit));
        assert!("kelvin".parse::<DisplayUnit>().is_err());
    }

    #[test]
    fn test_forecast_query_for_location() {
        let location = LocationCandidate {
            name: "Oslo".to_string(),
            admin1: None,
            country: Some("Norway".to_string()),
            latitude: 59.91,
            longitude: 10.75,
        };

        let query = ForecastQuery::for_location(&location);
        assert!(query.current);
        assert_eq!(query.timezone, "auto");
        assert_eq!(
            query.daily_param(),
            "temperature_2m_max,temperature_2m_min,weathercode"
        );
    }
}
