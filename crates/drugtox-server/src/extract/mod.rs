//! Request extractors with JSON error responses.
//!
//! Drop-in replacements for the axum extractors of the same name whose
//! rejections are converted into the handler [`Error`] type, so malformed
//! requests are answered with the same `{error, kind}` body as every other
//! failure.
//!
//! [`Error`]: crate::handler::Error

pub mod reject;

pub use crate::extract::reject::{Json, Multipart, Path};
