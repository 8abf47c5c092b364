use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

/// Body of a `gethomecoachsdata` response, reduced to what is read.
#[derive(Deserialize, Debug)]
pub struct HomeCoachResponse {
    pub body: HomeCoachBody,
}

#[derive(Deserialize, Debug)]
pub struct HomeCoachBody {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Deserialize, Debug)]
pub struct Device {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub dashboard_data: Option<DashboardData>,
}

/// Readings are kept as raw JSON so each field can be validated by name.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardData {
    pub temperature: Option<Value>,
    pub humidity: Option<Value>,
    pub pressure: Option<Value>,
    #[serde(rename = "CO2")]
    pub co2: Option<Value>,
}

/// Current readings of one Healthy Home Coach.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceSnapshot {
    pub device_id: String,
    /// °C
    pub temperature: f64,
    /// %RH
    pub humidity: f64,
    /// mbar
    pub pressure: f64,
    /// ppm
    pub co2: f64,
}

impl HomeCoachResponse {
    /// Takes the first listed device; `requested_id` names it when the API omits `_id`.
    pub fn into_snapshot(self, requested_id: &str) -> Result<DeviceSnapshot, FetchError> {
        let device = self
            .body
            .devices
            .into_iter()
            .next()
            .ok_or(FetchError::NoDevices)?;
        let dashboard = device
            .dashboard_data
            .ok_or(FetchError::MissingField("dashboard_data"))?;

        Ok(DeviceSnapshot {
            device_id: device.id.unwrap_or_else(|| requested_id.to_string()),
            temperature: number("Temperature", dashboard.temperature)?,
            humidity: number("Humidity", dashboard.humidity)?,
            pressure: number("Pressure", dashboard.pressure)?,
            co2: number("CO2", dashboard.co2)?,
        })
    }
}

fn number(name: &'static str, value: Option<Value>) -> Result<f64, FetchError> {
    value
        .as_ref()
        .and_then(Value::as_f64)
        .ok_or(FetchError::MissingField(name))
}
