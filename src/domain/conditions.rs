//! WMO weather interpretation codes as reported by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionDescriptor {
    pub description: &'static str,
    pub icon: &'static str,
}

pub const UNKNOWN_CONDITION: ConditionDescriptor = ConditionDescriptor {
    description: "Unknown",
    icon: "❓",
};

const fn descriptor(description: &'static str, icon: &'static str) -> ConditionDescriptor {
    ConditionDescriptor { description, icon }
}

pub const CONDITIONS: &[(i32, ConditionDescriptor)] = &[
    (0, descriptor("Clear", "☀️")),
    (1, descriptor("Mainly clear", "🌤️")),
    (2, descriptor("Partly cloudy", "⛅")),
    (3, descriptor("Overcast", "☁️")),
    (45, descriptor("Fog", "🌫️")),
    (48, descriptor("Depositing rime fog", "🌫️")),
    (51, descriptor("Light drizzle", "🌦️")),
    (53, descriptor("Moderate drizzle", "🌦️")),
    (55, descriptor("Dense drizzle", "🌧️")),
    (56, descriptor("Light freezing drizzle", "🧊🌧️")),
    (57, descriptor("Dense freezing drizzle", "🧊🌧️")),
    (61, descriptor("Slight rain", "🌧️")),
    (63, descriptor("Moderate rain", "🌧️")),
    (65, descriptor("Heavy rain", "⛈️")),
    (66, descriptor("Light freezing rain", "🧊🌧️")),
    (67, descriptor("Heavy freezing rain", "🧊🌧️")),
    (71, descriptor("Slight snow fall", "🌨️")),
    (73, descriptor("Moderate snow fall", "🌨️")),
    (75, descriptor("Heavy snow fall", "❄️")),
    (77, descriptor("Snow grains", "❄️")),
    (80, descriptor("Slight rain showers", "🌧️")),
    (81, descriptor("Moderate rain showers", "🌧️")),
    (82, descriptor("Violent rain showers", "⛈️")),
    (85, descriptor("Slight snow showers", "🌨️")),
    (86, descriptor("Heavy snow showers", "❄️")),
    (95, descriptor("Thunderstorm", "⛈️")),
    (96, descriptor("Thunderstorm with slight hail", "⛈️🧊")),
    (99, descriptor("Thunderstorm with heavy hail", "⛈️🧊")),
];

/// Total over all integers: unlisted codes yield [`UNKNOWN_CONDITION`].
pub fn describe_condition(code: i32) -> ConditionDescriptor {
    CONDITIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, d)| *d)
        .unwrap_or(UNKNOWN_CONDITION)
}
