//! Common error type definitions.
//!
//! Every collaborator failure (predictor, LLM transport, malformed replies)
//! is normalized into one [`ErrorKind`] from a small closed set plus a
//! message that is safe to show to API clients. The original failure, if
//! any, is kept as the error [`source`](std::error::Error::source) for logs.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in drugtox operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The caller supplied a missing or malformed value.
    InvalidInput,
    /// The toxicity predictor was never constructed.
    PredictorUnavailable,
    /// The predictor was reached but reported an error.
    PredictionFailed,
    /// The LLM client is absent or the remote call failed.
    AiServiceUnavailable,
    /// The vision call could not be completed.
    VisionUnavailable,
    /// Startup configuration is invalid.
    Configuration,
}

impl ErrorKind {
    /// Returns a message that is safe to show to API clients.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::PredictorUnavailable => "Predictor not initialized",
            Self::PredictionFailed => "Prediction failed",
            Self::AiServiceUnavailable => "AI service not available",
            Self::VisionUnavailable => "Vision analysis unavailable",
            Self::Configuration => "Invalid configuration",
        }
    }
}

/// A structured error type for drugtox operations.
#[derive(Debug, Error)]
#[error("{}: {}", kind.as_ref(), self.user_message())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional user-safe error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Adds an already boxed source error to this error.
    pub fn with_boxed_source(mut self, source: BoxedError) -> Self {
        self.source = Some(source);
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new predictor unavailable error.
    pub fn predictor_unavailable() -> Self {
        Self::new(ErrorKind::PredictorUnavailable)
    }

    /// Creates a new prediction failed error.
    pub fn prediction_failed() -> Self {
        Self::new(ErrorKind::PredictionFailed)
    }

    /// Creates a new AI service unavailable error.
    pub fn ai_unavailable() -> Self {
        Self::new(ErrorKind::AiServiceUnavailable)
    }

    /// Creates a new vision unavailable error.
    pub fn vision_unavailable() -> Self {
        Self::new(ErrorKind::VisionUnavailable)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns the message to show to API clients.
    ///
    /// Falls back to the kind's default message when none was attached.
    pub fn user_message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.kind.default_message())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
