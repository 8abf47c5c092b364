use serde::Deserialize;
use std::{env, fs, path::Path, time::Duration};

use crate::{auth::SCOPE, error::ConfigError};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Password-grant credentials for the token endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub scope: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub credentials: Credentials,
    pub device_id: String,
    pub timeout: Duration,
}

/// Layout of the `config.json` file used by the voice front end.
#[derive(Deserialize, Debug)]
struct ConfigFile {
    #[serde(rename = "NetatmoClientID")]
    client_id: Option<String>,
    #[serde(rename = "NetatmoClientSecret")]
    client_secret: Option<String>,
    #[serde(rename = "NetatmoUsername")]
    username: Option<String>,
    #[serde(rename = "NetatmoPassword")]
    password: Option<String>,
    #[serde(rename = "NetatmoDeviceID")]
    device_id: Option<String>,
    #[serde(rename = "NetatmoTimeoutSecs")]
    timeout_secs: Option<u64>,
}

impl Config {
    /// Reads the `NETATMO_*` variables, after `.env` has been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("NETATMO_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Invalid {
                    var: "NETATMO_TIMEOUT_SECS",
                    reason: e.to_string(),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self::build(
            required("NETATMO_CLIENT_ID", lookup("NETATMO_CLIENT_ID"))?,
            required("NETATMO_CLIENT_SECRET", lookup("NETATMO_CLIENT_SECRET"))?,
            required("NETATMO_USERNAME", lookup("NETATMO_USERNAME"))?,
            required("NETATMO_PASSWORD", lookup("NETATMO_PASSWORD"))?,
            required("NETATMO_DEVICE_ID", lookup("NETATMO_DEVICE_ID"))?,
            timeout_secs,
        )
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::File(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(raw).map_err(|e| ConfigError::File(e.to_string()))?;

        Self::build(
            required("NetatmoClientID", file.client_id)?,
            required("NetatmoClientSecret", file.client_secret)?,
            required("NetatmoUsername", file.username)?,
            required("NetatmoPassword", file.password)?,
            required("NetatmoDeviceID", file.device_id)?,
            file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    fn build(
        client_id: String,
        client_secret: String,
        username: String,
        password: String,
        device_id: String,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "timeout",
                reason: String::from("must be at least one second"),
            });
        }

        Ok(Config {
            credentials: Credentials {
                client_id,
                client_secret,
                username,
                password,
                scope: String::from(SCOPE),
            },
            device_id: device_id.trim().to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Secrets are passed on exactly as given; blank-only values count as empty.
fn required(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    let value = value.ok_or(ConfigError::Missing(name))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(value)
}
