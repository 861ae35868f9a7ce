//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Security: CORS, compression, body limits.
//! - Observability: request ids, request spans, sensitive header redaction.
//! - Recovery: panics and timeouts answered with JSON errors.
//!
//! ```rust,no_run
//! use axum::Router;
//! use drugtox_server::middleware::{
//!     RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt};
