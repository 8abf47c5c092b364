use crate::telemetry::DeviceSnapshot;

pub const UNKNOWN_VALUE: &str = "Sorry, this value is unknown.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
    Co2,
    /// Anything the caller asked for that is not one of the readings above.
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricRequest {
    pub metric: Metric,
    /// Only read for [`Metric::Temperature`].
    pub unit: TemperatureUnit,
}

impl MetricRequest {
    pub fn new(metric: Metric) -> Self {
        MetricRequest {
            metric,
            unit: TemperatureUnit::default(),
        }
    }

    pub fn temperature(unit: TemperatureUnit) -> Self {
        MetricRequest {
            metric: Metric::Temperature,
            unit,
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Renders the requested reading as a spoken sentence. Never fails.
pub fn format(snapshot: &DeviceSnapshot, request: &MetricRequest) -> String {
    match request.metric {
        Metric::Temperature => match request.unit {
            TemperatureUnit::Celsius => format!(
                "The current temperature is {} degrees Celsius.",
                snapshot.temperature
            ),
            TemperatureUnit::Fahrenheit => format!(
                "The current temperature is {} degrees Fahrenheit.",
                celsius_to_fahrenheit(snapshot.temperature)
            ),
        },
        Metric::Humidity => format!(
            "The current relative humidity is {} percent.",
            snapshot.humidity
        ),
        Metric::Pressure => format!("The current pressure is {} millibar.", snapshot.pressure),
        Metric::Co2 => format!(
            "The current CO2 concentration is {} parts per million.",
            snapshot.co2
        ),
        Metric::Unknown => String::from(UNKNOWN_VALUE),
    }
}
