//! Internal error types for drugtox-reqwest.
//!
//! Transport failures are kept detailed here and normalized into the
//! closed [`drugtox_core::ErrorKind`] set at the crate boundary, with a
//! message that is safe to show to API clients.

use drugtox_core::ErrorKind;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for drugtox-reqwest operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Internal error type for drugtox-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The upstream answered with a non-success status.
    #[error("Unexpected status {status}: {message}")]
    Status { status: StatusCode, message: String },
    /// The upstream answered successfully but without usable content.
    #[error("Empty reply")]
    EmptyReply,
    /// Client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Normalizes this error into the shared taxonomy.
    ///
    /// `service` names the upstream in the client-facing message,
    /// e.g. "AI service" or "Predictor".
    pub fn into_core(self, kind: ErrorKind, service: &str) -> drugtox_core::Error {
        let message = match &self {
            Self::Reqwest(e) if e.is_timeout() => format!("{service} request timed out"),
            Self::Reqwest(e) if e.is_connect() => format!("{service} is unreachable"),
            Self::Reqwest(e) if e.is_decode() => format!("{service} returned an unreadable reply"),
            Self::Reqwest(_) => format!("{service} request failed"),
            Self::Serde(_) => format!("{service} returned an unreadable reply"),
            Self::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    format!("{service} rejected the credentials")
                }
                StatusCode::TOO_MANY_REQUESTS => format!("{service} is rate limiting requests"),
                status => format!("{service} returned status {}", status.as_u16()),
            },
            Self::EmptyReply => format!("{service} returned an empty reply"),
            Self::Config(message) => {
                return drugtox_core::Error::configuration()
                    .with_message(message.clone())
                    .with_source(self);
            }
        };

        drugtox_core::Error::new(kind)
            .with_message(message)
            .with_source(self)
    }
}
