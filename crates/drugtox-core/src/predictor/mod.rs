//! Toxicity predictor abstraction.
//!
//! A predictor scores a molecule descriptor against a fixed set of toxicity
//! endpoints. Implementations may call out to a remote model server or be
//! deterministic test doubles; the rest of the service only sees
//! [`PredictorService`].

mod service;

pub use service::PredictorService;

use crate::Result;
use crate::types::{MoleculeQuery, PredictionResult};

/// Tracing target for predictor operations.
pub const TRACING_TARGET: &str = "drugtox_core::predictor";

/// A toxicity prediction backend.
#[async_trait::async_trait]
pub trait ToxicityPredictor: Send + Sync {
    /// Returns the ids of the endpoints this predictor scores.
    fn endpoints(&self) -> Vec<String>;

    /// Scores the molecule against every endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::PredictionFailed`](crate::ErrorKind::PredictionFailed)
    /// when the model rejects the molecule or cannot be reached.
    async fn predict(&self, query: &MoleculeQuery) -> Result<PredictionResult>;
}
