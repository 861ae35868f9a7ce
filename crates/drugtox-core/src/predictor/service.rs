use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{TRACING_TARGET, ToxicityPredictor};
use crate::Result;
use crate::types::{MoleculeQuery, PredictionResult};

/// Predictor wrapper with observability.
///
/// The inner predictor is wrapped in `Arc` for cheap cloning into request
/// handlers.
#[derive(Clone)]
pub struct PredictorService {
    inner: Arc<dyn ToxicityPredictor>,
}

impl PredictorService {
    /// Wraps a predictor.
    pub fn new<P>(predictor: P) -> Self
    where
        P: ToxicityPredictor + 'static,
    {
        Self {
            inner: Arc::new(predictor),
        }
    }

    /// Returns the endpoint ids the predictor scores.
    pub fn endpoints(&self) -> Vec<String> {
        self.inner.endpoints()
    }

    /// Scores a molecule, logging timing and outcome.
    pub async fn predict(&self, query: &MoleculeQuery) -> Result<PredictionResult> {
        let start = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            smiles = %query,
            "Running toxicity prediction"
        );

        let result = self.inner.predict(query).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(prediction) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    endpoints = prediction.endpoints.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Toxicity prediction completed"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Toxicity prediction failed"
                );
            }
        }

        result
    }
}

impl fmt::Debug for PredictorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictorService")
            .field("endpoints", &self.inner.endpoints().len())
            .finish_non_exhaustive()
    }
}
