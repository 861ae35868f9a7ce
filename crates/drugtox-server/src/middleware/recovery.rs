//! Recovery middleware for panics, timeouts and service errors.

use std::any::Any;
use std::future::ready;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

/// Tracing target for panic and timeout recovery.
const TRACING_TARGET: &str = "drugtox_server::middleware::recovery";

/// Default request timeout in seconds, above the 60 second vision timeout.
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Request timeout for the recovery middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run before it is answered with a 500.
    ///
    /// Keep it above the slowest outbound call.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::with_timeout_secs(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl RecoveryConfig {
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            request_timeout: secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Answers handler panics and requests running past
    /// [`RecoveryConfig::request_timeout`] with a JSON 500.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;

    /// Same as [`with_recovery`] with the default 90 second timeout.
    ///
    /// [`with_recovery`]: RouterRecoveryExt::with_recovery
    fn with_default_recovery(self) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        // Outermost first: the error handler must see the timeout's error.
        let layers = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(middleware_error_response))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::new(config.request_timeout()));

        self.layer(layers)
    }

    fn with_default_recovery(self) -> Self {
        self.with_recovery(&RecoveryConfig::default())
    }
}

fn middleware_error_response(err: BoxError) -> BoxFuture<'static, Response> {
    let error = if err.is::<Elapsed>() {
        tracing::warn!(target: TRACING_TARGET, "Request exceeded the configured timeout");
        ErrorKind::InternalServerError
            .with_message("Request timeout")
            .with_context("The request took too long and was cancelled; AI calls may be slow, retry later")
    } else {
        tracing::error!(target: TRACING_TARGET, error = %err, "Middleware failed");
        ErrorKind::InternalServerError.with_context(err.to_string())
    };

    ready(error.into_response()).boxed()
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    if let Some(error) = payload.downcast_ref::<Error<'static>>() {
        tracing::error!(target: TRACING_TARGET, error = %error, "Handler panicked with an error");
        return error.clone().into_response();
    }

    let detail = match (payload.downcast_ref::<String>(), payload.downcast_ref::<&str>()) {
        (Some(message), _) => message.as_str(),
        (None, Some(message)) => *message,
        (None, None) => "non-string panic payload",
    };

    tracing::error!(target: TRACING_TARGET, panic = %detail, "Handler panicked");
    ErrorKind::InternalServerError
        .with_message("An unexpected panic occurred")
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;
    use serde_json::Value;

    use super::*;

    #[tokio::test]
    async fn panic_becomes_json_500() -> anyhow::Result<()> {
        async fn boom() -> &'static str {
            panic!("handler exploded")
        }

        let app: Router = Router::new().route("/boom", get(boom));
        let server = TestServer::new(app.with_default_recovery())?;

        let response = server.get("/boom").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.json::<Value>();
        assert_eq!(body["kind"], "internal_server_error");
        assert_eq!(body["error"], "An unexpected panic occurred");
        Ok(())
    }

    #[tokio::test]
    async fn slow_request_times_out() -> anyhow::Result<()> {
        async fn slow() -> &'static str {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }

        let app: Router = Router::new().route("/slow", get(slow));
        let server = TestServer::new(app.with_recovery(&RecoveryConfig::with_timeout_secs(0)))?;

        let response = server.get("/slow").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["error"], "Request timeout");
        Ok(())
    }
}
