//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! ```rust
//! use drugtox_core::PredictorService;
//! use drugtox_server::handler::routes;
//! use drugtox_server::service::{ServiceConfig, ServiceState};
//! use drugtox_test::MockPredictor;
//!
//! let state = ServiceState::new(
//!     ServiceConfig::default(),
//!     Some(PredictorService::new(MockPredictor::default())),
//!     None,
//! );
//!
//! let app: axum::Router = routes(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod assistant;
mod error;
mod index;
mod monitors;
mod predictions;
mod request;
mod response;
mod vision;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::*;
pub use crate::handler::response::*;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every route, the JSON 404 fallback, and the
/// state applied.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(index::routes())
        .merge(monitors::routes())
        .merge(predictions::routes())
        .merge(assistant::routes())
        .merge(vision::routes())
        .fallback(handler)
        .with_state(state)
}
