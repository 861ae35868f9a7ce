//! Handler error type and the closed set of kinds it can carry.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// The error type returned by handlers.
///
/// The [`ErrorKind`] fixes the status code and the `kind` field of the body;
/// `message` replaces the kind's default text and `context` adds detail.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl<'a> Error<'a> {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            context: None,
        }
    }

    #[inline]
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[inline]
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Builds the JSON body this error renders as.
    pub fn to_response(&self) -> ErrorResponse<'_> {
        let mut response: ErrorResponse<'_> = self.kind.response();

        if let Some(message) = self.message.as_deref() {
            response = response.with_message(message);
        }

        if let Some(context) = self.context.as_deref() {
            response = response.with_context(context);
        }

        response
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.to_response();
        write!(f, "{} ({}): {}", response.kind, response.status.as_u16(), response.error)?;

        match response.context {
            Some(context) => write!(f, " ({context})"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Handler result, failing with an [`Error`].
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every error kind the API answers with.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed body, form or parameters (400).
    BadRequest,
    /// Missing path segment (400).
    MissingPathParam,
    /// Missing or empty SMILES, message or image (400).
    InvalidInput,
    /// No route matches (404).
    NotFound,

    /// Unexpected failure, panics and timeouts (500).
    InternalServerError,
    /// The predictor was never constructed (500).
    PredictorUnavailable,
    /// The predictor rejected this molecule (500).
    PredictionFailed,
    /// The language model could not answer (503).
    AiServiceUnavailable,
    /// The vision model returned no text (503).
    VisionUnavailable,
}

impl ErrorKind {
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the body served when no message overrides the default.
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingPathParam => ErrorResponse::MISSING_PATH_PARAM,
            Self::InvalidInput => ErrorResponse::INVALID_INPUT,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::PredictorUnavailable => ErrorResponse::PREDICTOR_UNAVAILABLE,
            Self::PredictionFailed => ErrorResponse::PREDICTION_FAILED,
            Self::AiServiceUnavailable => ErrorResponse::AI_SERVICE_UNAVAILABLE,
            Self::VisionUnavailable => ErrorResponse::VISION_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.response().kind)
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}
