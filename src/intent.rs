//! Maps voice intents and their unit slot onto metric requests.

use crate::response::{Metric, MetricRequest, TemperatureUnit};

pub const LAUNCH_PROMPT: &str = "You can ask me for the current temperature, relative humidity, \
barometric pressure, or carbon dioxide concentration. What value would you like to know?";

/// Spoken when the pipeline fails; the cause only goes to the log.
pub const UNAVAILABLE: &str = "Sorry, I could not get that value right now.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Launch,
    Metric(MetricRequest),
}

/// Accepts `temperature`, `TemperatureIntent`, `co2` and so on, ignoring case.
pub fn parse(name: Option<&str>, unit: Option<&str>) -> Intent {
    let name = match name {
        Some(name) => name.trim().to_lowercase(),
        None => return Intent::Launch,
    };
    let name = name.strip_suffix("intent").unwrap_or(name.as_str());

    let metric = match name {
        "" | "launch" | "help" | "healthyhome" => return Intent::Launch,
        "temperature" => return Intent::Metric(MetricRequest::temperature(parse_unit(unit))),
        "humidity" => Metric::Humidity,
        "pressure" => Metric::Pressure,
        "co2" => Metric::Co2,
        _ => Metric::Unknown,
    };
    Intent::Metric(MetricRequest::new(metric))
}

/// Only an explicit "Fahrenheit" switches units.
pub fn parse_unit(unit: Option<&str>) -> TemperatureUnit {
    match unit {
        Some(unit) if unit.trim().eq_ignore_ascii_case("fahrenheit") => TemperatureUnit::Fahrenheit,
        _ => TemperatureUnit::Celsius,
    }
}
