#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod health;

pub mod completion;
pub mod predictor;
pub mod types;

pub use crate::completion::{CompletionProvider, CompletionService};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::health::{ServiceHealth, ServiceStatus};
pub use crate::predictor::{PredictorService, ToxicityPredictor};
