use thiserror::Error;

/// Failures while exchanging credentials for an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint unreachable: {0}")]
    Transport(String),

    #[error("token request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("token response is not valid JSON: {0}")]
    Malformed(String),

    #[error("token response has no access_token")]
    MissingToken,
}

/// Failures while fetching the device snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("data endpoint unreachable: {0}")]
    Transport(String),

    #[error("data request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("data endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("data response is not valid JSON: {0}")]
    Malformed(String),

    #[error("data response lists no devices")]
    NoDevices,

    #[error("dashboard_data is missing numeric field {0}")]
    MissingField(&'static str),

    #[error("access token is empty")]
    EmptyToken,
}

/// Missing or invalid settings, detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not specified")]
    Missing(&'static str),

    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("cannot read config file: {0}")]
    File(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Short tag for logs; never spoken to the user.
    pub fn category(&self) -> &'static str {
        match self {
            PipelineError::Auth(_) => "auth",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Config(_) => "config",
        }
    }
}
