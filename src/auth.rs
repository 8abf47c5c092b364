use log::{debug, info};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

use crate::{config::Credentials, error::AuthError};

pub const TOKEN_URL: &str = "https://api.netatmo.com/oauth2/token";
pub const SCOPE: &str = "read_homecoach";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchanges stored credentials for a bearer token, one attempt per call.
pub struct AuthClient {
    http: reqwest::Client,
    token_url: String,
    timeout: Duration,
}

impl AuthClient {
    pub fn new(timeout: Duration) -> Result<Self, AuthError> {
        Self::with_url(TOKEN_URL, timeout)
    }

    pub(crate) fn with_url(token_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        Ok(AuthClient {
            http,
            token_url: token_url.to_string(),
            timeout,
        })
    }

    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let form = [
            ("grant_type", "password"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("scope", credentials.scope.as_str()),
        ];

        let mut request = self
            .http
            .post(&self.token_url)
            .form(&form)
            .build()
            .map_err(|e| self.transport_error(e))?;
        // reqwest sets the content type without a charset
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        debug!("requesting token for {}", credentials.username);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Malformed(e.to_string()))?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => {
                info!("access token received ({} chars)", token.len());
                Ok(token)
            }
            _ => Err(AuthError::MissingToken),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> AuthError {
        if e.is_timeout() {
            AuthError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            AuthError::Transport(e.without_url().to_string())
        }
    }
}
