//! Reqwest-based HTTP client implementations for drugtox services.
//!
//! This crate provides reqwest-based implementations of the provider traits
//! in `drugtox-core`: [`GroqClient`] for chat and vision completions and
//! [`RemotePredictor`] for toxicity predictions.
//!
//! # Example
//!
//! ```rust,ignore
//! use drugtox_reqwest::{GroqClient, GroqConfig, PredictorConfig, RemotePredictor};
//!
//! let completion = GroqClient::new(GroqConfig::with_api_key(key))?.into_service();
//! let predictor = RemotePredictor::connect(PredictorConfig::default())
//!     .await?
//!     .into_service();
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod http;

pub mod groq;
pub mod predictor;

pub use crate::error::{Error, Result};
pub use crate::groq::{GroqClient, GroqConfig};
pub use crate::predictor::{PredictorConfig, RemotePredictor};
