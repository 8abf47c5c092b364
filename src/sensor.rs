use log::{debug, info};
use std::time::Duration;

use crate::{
    error::FetchError,
    telemetry::{DeviceSnapshot, HomeCoachResponse},
};

pub const DATA_URL: &str = "https://api.netatmo.com/api/gethomecoachsdata";

/// Fetches the current dashboard of one Healthy Home Coach.
pub struct SensorDataClient {
    http: reqwest::Client,
    data_url: String,
    timeout: Duration,
}

impl SensorDataClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::with_url(DATA_URL, timeout)
    }

    pub(crate) fn with_url(data_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(SensorDataClient {
            http,
            data_url: data_url.to_string(),
            timeout,
        })
    }

    pub async fn fetch_snapshot(
        &self,
        token: &str,
        device_id: &str,
    ) -> Result<DeviceSnapshot, FetchError> {
        if token.is_empty() {
            return Err(FetchError::EmptyToken);
        }

        debug!("fetching dashboard of {}", device_id);
        // values are percent-encoded, so a MAC id goes out as 70%3Aee%3A..
        let response = self
            .http
            .get(&self.data_url)
            .query(&[("access_token", token), ("device_id", device_id)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: HomeCoachResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        let snapshot = parsed.into_snapshot(device_id)?;
        info!("snapshot received: {:?}", snapshot);

        Ok(snapshot)
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            // the request url carries the access token
            FetchError::Transport(e.without_url().to_string())
        }
    }
}
