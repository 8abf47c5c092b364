use log::{debug, info};

use crate::{
    auth::AuthClient,
    config::{Config, Credentials},
    error::{AuthError, FetchError, PipelineError},
    response::{self, MetricRequest},
    sensor::SensorDataClient,
    telemetry::DeviceSnapshot,
};

pub trait TokenSource {
    async fn fetch_token(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

pub trait SnapshotSource {
    async fn fetch_snapshot(
        &self,
        token: &str,
        device_id: &str,
    ) -> Result<DeviceSnapshot, FetchError>;
}

impl TokenSource for AuthClient {
    async fn fetch_token(&self, credentials: &Credentials) -> Result<String, AuthError> {
        AuthClient::fetch_token(self, credentials).await
    }
}

impl SnapshotSource for SensorDataClient {
    async fn fetch_snapshot(
        &self,
        token: &str,
        device_id: &str,
    ) -> Result<DeviceSnapshot, FetchError> {
        SensorDataClient::fetch_snapshot(self, token, device_id).await
    }
}

/// Token, then snapshot, then sentence. Nothing is kept between calls.
pub struct Pipeline<A, S> {
    credentials: Credentials,
    device_id: String,
    auth: A,
    sensor: S,
}

impl Pipeline<AuthClient, SensorDataClient> {
    pub fn from_config(config: Config) -> Result<Self, PipelineError> {
        let auth = AuthClient::new(config.timeout)?;
        let sensor = SensorDataClient::new(config.timeout)?;
        Ok(Pipeline::new(config.credentials, config.device_id, auth, sensor))
    }
}

impl<A: TokenSource, S: SnapshotSource> Pipeline<A, S> {
    pub fn new(credentials: Credentials, device_id: String, auth: A, sensor: S) -> Self {
        Pipeline {
            credentials,
            device_id,
            auth,
            sensor,
        }
    }

    pub async fn get_metric_sentence(
        &self,
        request: &MetricRequest,
    ) -> Result<String, PipelineError> {
        debug!("pipeline started for {:?}", request);
        let token = self.auth.fetch_token(&self.credentials).await?;
        let snapshot = self.sensor.fetch_snapshot(&token, &self.device_id).await?;

        let sentence = response::format(&snapshot, request);
        info!("Response: {}", sentence);
        Ok(sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{Metric, TemperatureUnit};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedToken(Option<&'static str>);

    impl TokenSource for FixedToken {
        async fn fetch_token(&self, _: &Credentials) -> Result<String, AuthError> {
            self.0.map(String::from).ok_or(AuthError::MissingToken)
        }
    }

    struct FixedSnapshot {
        snapshot: Option<DeviceSnapshot>,
        calls: AtomicUsize,
        seen_token: std::sync::Mutex<Option<String>>,
    }

    impl FixedSnapshot {
        fn new(snapshot: Option<DeviceSnapshot>) -> Self {
            FixedSnapshot {
                snapshot,
                calls: AtomicUsize::new(0),
                seen_token: std::sync::Mutex::new(None),
            }
        }
    }

    impl SnapshotSource for FixedSnapshot {
        async fn fetch_snapshot(
            &self,
            token: &str,
            _: &str,
        ) -> Result<DeviceSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_token.lock().unwrap() = Some(token.to_string());
            self.snapshot.clone().ok_or(FetchError::NoDevices)
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            client_id: String::from("id"),
            client_secret: String::from("secret"),
            username: String::from("user"),
            password: String::from("pass"),
            scope: String::from(crate::auth::SCOPE),
        }
    }

    fn snapshot() -> DeviceSnapshot {
        DeviceSnapshot {
            device_id: String::from("dev1"),
            temperature: 0.0,
            humidity: 40.0,
            pressure: 1013.0,
            co2: 450.0,
        }
    }

    fn pipeline(
        token: Option<&'static str>,
        snapshot: Option<DeviceSnapshot>,
    ) -> Pipeline<FixedToken, FixedSnapshot> {
        Pipeline::new(
            credentials(),
            String::from("dev1"),
            FixedToken(token),
            FixedSnapshot::new(snapshot),
        )
    }

    #[tokio::test]
    async fn co2_sentence_end_to_end() {
        let pipeline = pipeline(Some("T"), Some(snapshot()));
        let sentence = pipeline
            .get_metric_sentence(&MetricRequest::new(Metric::Co2))
            .await
            .unwrap();

        assert_eq!(sentence, "The current CO2 concentration is 450 parts per million.");
        assert_eq!(pipeline.sensor.seen_token.lock().unwrap().as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn fahrenheit_end_to_end() {
        let pipeline = pipeline(Some("T"), Some(snapshot()));
        let sentence = pipeline
            .get_metric_sentence(&MetricRequest::temperature(TemperatureUnit::Fahrenheit))
            .await
            .unwrap();
        assert_eq!(sentence, "The current temperature is 32 degrees Fahrenheit.");
    }

    #[tokio::test]
    async fn auth_failure_skips_fetch() {
        let pipeline = pipeline(None, Some(snapshot()));
        let err = pipeline
            .get_metric_sentence(&MetricRequest::new(Metric::Co2))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Auth(AuthError::MissingToken)));
        assert_eq!(pipeline.sensor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_is_surfaced() {
        let pipeline = pipeline(Some("T"), None);
        let err = pipeline
            .get_metric_sentence(&MetricRequest::new(Metric::Humidity))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(FetchError::NoDevices)));
        assert_eq!(err.category(), "fetch");
    }

    #[tokio::test]
    async fn each_call_fetches_anew() {
        let pipeline = pipeline(Some("T"), Some(snapshot()));
        let request = MetricRequest::new(Metric::Pressure);
        pipeline.get_metric_sentence(&request).await.unwrap();
        pipeline.get_metric_sentence(&request).await.unwrap();
        assert_eq!(pipeline.sensor.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn real_clients_against_stubs() {
        use crate::stub::Stub;
        use std::time::Duration;

        let token = Stub::serve(200, r#"{"access_token":"T"}"#).await;
        let data = Stub::serve(
            200,
            r#"{"body":{"devices":[{"dashboard_data":
                {"Temperature":21.5,"Humidity":40,"Pressure":1013,"CO2":450}}]}}"#,
        )
        .await;

        let pipeline = Pipeline::new(
            credentials(),
            String::from("dev1"),
            AuthClient::with_url(&token.url, Duration::from_secs(5)).unwrap(),
            SensorDataClient::with_url(&data.url, Duration::from_secs(5)).unwrap(),
        );
        let sentence = pipeline
            .get_metric_sentence(&MetricRequest::temperature(TemperatureUnit::Celsius))
            .await
            .unwrap();

        assert_eq!(sentence, "The current temperature is 21.5 degrees Celsius.");
        assert!(data.request().await.contains("access_token=T"));
    }
}
