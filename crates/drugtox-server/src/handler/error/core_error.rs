//! Domain error to HTTP error conversion.

use drugtox_core::ErrorKind as CoreErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for domain error conversions.
const TRACING_TARGET: &str = "drugtox_server::handler::error";

impl From<drugtox_core::Error> for HttpError<'static> {
    fn from(error: drugtox_core::Error) -> Self {
        let kind = match error.kind() {
            CoreErrorKind::InvalidInput => ErrorKind::InvalidInput,
            CoreErrorKind::PredictorUnavailable => ErrorKind::PredictorUnavailable,
            CoreErrorKind::PredictionFailed => ErrorKind::PredictionFailed,
            CoreErrorKind::AiServiceUnavailable => ErrorKind::AiServiceUnavailable,
            CoreErrorKind::VisionUnavailable => ErrorKind::VisionUnavailable,
            CoreErrorKind::Configuration => ErrorKind::InternalServerError,
        };

        if kind.status_code().is_server_error() {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                error_kind = error.kind_str(),
                "Request failed"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                error_kind = error.kind_str(),
                "Request rejected"
            );
        }

        kind.with_message(error.user_message().to_owned())
    }
}
