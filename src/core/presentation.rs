use crate::domain::conditions::{describe_condition, UNKNOWN_CONDITION};
use crate::domain::model::{
    CurrentConditions, DailyForecastSeries, DisplayUnit, LocationCandidate, WorkflowResult,
};

pub const SEARCHING_MESSAGE: &str = "Searching...";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Try a different search.";
pub const NO_CURRENT_DATA_MESSAGE: &str = "No current weather available for this location.";
pub const NO_FORECAST_MESSAGE: &str = "No forecast data.";
/// Shown in place of a temperature the provider left blank.
pub const MISSING_TEMPERATURE: &str = "--";

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Converts first, then rounds half toward +inf.
pub fn format_temperature(celsius: f64, unit: DisplayUnit) -> String {
    let value = match unit {
        DisplayUnit::Celsius => celsius,
        DisplayUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };
    format!("{}{}", round_half_up(value), unit.symbol())
}

/// Nearest integer, ties toward +inf, never `-0`.
fn round_half_up(value: f64) -> f64 {
    let mut rounded = value.round();
    // f64::round sends negative ties away from zero.
    if rounded - value == -0.5 {
        rounded += 1.0;
    }
    rounded + 0.0
}

fn format_reading(celsius: Option<f64>, unit: DisplayUnit) -> String {
    celsius.map_or_else(
        || MISSING_TEMPERATURE.to_string(),
        |c| format_temperature(c, unit),
    )
}

/// "Name, Region, Country" with absent or blank parts left out.
pub fn location_label(candidate: &LocationCandidate) -> String {
    std::iter::once(Some(candidate.name.as_str()))
        .chain([candidate.admin1.as_deref(), candidate.country.as_deref()])
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Current-conditions block: icon and label, update time, description,
/// temperature and wind.
pub fn render_current(label: &str, current: &CurrentConditions, unit: DisplayUnit) -> String {
    let condition = describe_condition(current.condition_code);
    [
        format!("{}  {}", condition.icon, label),
        format!("Updated: {}", current.timestamp.format("%Y-%m-%dT%H:%M")),
        condition.description.to_string(),
        format_temperature(current.temperature, unit),
        format!("Wind {} {}°", current.wind_speed, current.wind_direction),
    ]
    .join("\n")
}

pub fn render_forecast(forecast: Option<&DailyForecastSeries>, unit: DisplayUnit) -> String {
    let Some(series) = forecast.filter(|series| !series.is_empty()) else {
        return NO_FORECAST_MESSAGE.to_string();
    };

    series
        .days()
        .map(|day| {
            let condition = day
                .condition_code
                .map_or(UNKNOWN_CONDITION, describe_condition);
            format!(
                "{}  {}  {} / {}  {}",
                day.date.format("%Y-%m-%d"),
                condition.icon,
                format_reading(day.max_temperature, unit),
                format_reading(day.min_temperature, unit),
                condition.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text for any workflow outcome. [`WorkflowResult::Ignored`] renders as nothing.
pub fn render(result: &WorkflowResult, unit: DisplayUnit) -> String {
    match result {
        WorkflowResult::Ignored => String::new(),
        WorkflowResult::NotFound => NOT_FOUND_MESSAGE.to_string(),
        WorkflowResult::NoCurrentData => NO_CURRENT_DATA_MESSAGE.to_string(),
        WorkflowResult::TransportError(message) => {
            format!("An error occurred while fetching weather ({}).", message)
        }
        WorkflowResult::Success {
            label,
            current,
            forecast,
        } => format!(
            "{}\n\n{}",
            render_current(label, current, unit),
            render_forecast(forecast.as_ref(), unit)
        ),
    }
}
