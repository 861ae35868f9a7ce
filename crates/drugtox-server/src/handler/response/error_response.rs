use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body.
///
/// `error` is the client-facing message and `kind` a stable identifier that
/// callers can match on.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// User-friendly error message safe for client display
    pub error: Cow<'a, str>,
    /// Stable error kind identifier
    pub kind: Cow<'a, str>,
    /// Additional detail about what was wrong with the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const INVALID_INPUT: Self =
        Self::new("invalid_input", "Invalid input", StatusCode::BAD_REQUEST);
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "Invalid request: missing required parameters",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Endpoint not found", StatusCode::NOT_FOUND);

    // 5xx Server Errors
    pub const AI_SERVICE_UNAVAILABLE: Self = Self::new(
        "ai_service_unavailable",
        "AI service not available",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const PREDICTION_FAILED: Self = Self::new(
        "prediction_failed",
        "Prediction failed",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const PREDICTOR_UNAVAILABLE: Self = Self::new(
        "predictor_unavailable",
        "Predictor not initialized",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const VISION_UNAVAILABLE: Self = Self::new(
        "vision_unavailable",
        "Vision analysis unavailable",
        StatusCode::SERVICE_UNAVAILABLE,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(kind: &'a str, error: &'a str, status: StatusCode) -> Self {
        Self {
            error: Cow::Borrowed(error),
            kind: Cow::Borrowed(kind),
            context: None,
            status,
        }
    }

    /// Replaces the client-facing message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.error = message.into();
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
