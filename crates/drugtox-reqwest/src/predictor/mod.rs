//! Remote toxicity predictor.

mod client;
mod config;

pub use client::{RemotePredictor, TRACING_TARGET};
pub use config::{DEFAULT_PREDICTOR_TIMEOUT, DEFAULT_PREDICTOR_URL, PredictorConfig};
