//! Provider error types

use thiserror::Error;

/// Errors returned by a [`WeatherProvider`](crate::WeatherProvider)
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider returned {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The response body did not match the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The client could not be configured
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

/// Copyable classification of a [`ProviderError`]
///
/// Actions must be `Clone`, which `reqwest::Error` is not, so results carry the
/// kind and the full error only goes to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Status(u16),
    Malformed,
    Config,
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Request(_) => ErrorKind::Network,
            ProviderError::Status { status, .. } => ErrorKind::Status(*status),
            ProviderError::Malformed(_) => ErrorKind::Malformed,
            ProviderError::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Status(code) => write!(f, "status {}", code),
            ErrorKind::Malformed => write!(f, "malformed"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}
