//! Mock toxicity predictor.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "config")]
use clap::Args;
use drugtox_core::types::{EndpointScore, MoleculeQuery, PredictionResult, TOX21_ENDPOINTS};
use drugtox_core::{Error, Result, ToxicityPredictor};
use serde::{Deserialize, Serialize};

/// Configuration for the mock predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MockPredictorConfig {
    /// Probability at or above which an endpoint is labelled toxic.
    #[cfg_attr(
        feature = "config",
        arg(long = "mock-toxic-threshold", env = "MOCK_TOXIC_THRESHOLD", default_value_t = 0.5)
    )]
    pub toxic_threshold: f64,
}

impl Default for MockPredictorConfig {
    fn default() -> Self {
        Self {
            toxic_threshold: 0.5,
        }
    }
}

/// Predictor whose scores are a pure function of the descriptor.
///
/// Scoring the same descriptor twice always yields the same result.
#[derive(Debug, Clone)]
pub struct MockPredictor {
    config: MockPredictorConfig,
    endpoints: Vec<String>,
    labels: (String, String),
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::new(MockPredictorConfig::default())
    }
}

impl MockPredictor {
    /// Creates a predictor scoring the Tox21 endpoints.
    pub fn new(config: MockPredictorConfig) -> Self {
        Self {
            config,
            endpoints: TOX21_ENDPOINTS.iter().map(|&id| id.to_owned()).collect(),
            labels: ("Toxic".to_owned(), "Non-toxic".to_owned()),
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Restricts scoring to the given endpoints.
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the class labels reported above and below the threshold.
    pub fn with_labels(mut self, toxic: impl Into<String>, non_toxic: impl Into<String>) -> Self {
        self.labels = (toxic.into(), non_toxic.into());
        self
    }

    /// Makes every prediction fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Returns how many predictions were requested.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn score(&self, smiles: &str, endpoint: &str) -> EndpointScore {
        // FNV-1a over descriptor and endpoint id.
        let hash = smiles
            .bytes()
            .chain([0])
            .chain(endpoint.bytes())
            .fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
                (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
            });

        let probability = (hash % 1000) as f64 / 1000.0;
        let prediction = if probability >= self.config.toxic_threshold {
            &self.labels.0
        } else {
            &self.labels.1
        };

        EndpointScore {
            probability,
            prediction: prediction.clone(),
            confidence: 0.5 + (probability - 0.5).abs(),
        }
    }
}

#[async_trait::async_trait]
impl ToxicityPredictor for MockPredictor {
    fn endpoints(&self) -> Vec<String> {
        self.endpoints.clone()
    }

    async fn predict(&self, query: &MoleculeQuery) -> Result<PredictionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(Error::prediction_failed().with_message(message.clone()));
        }

        let endpoints = self
            .endpoints
            .iter()
            .map(|id| (id.clone(), self.score(query.as_str(), id)))
            .collect();

        Ok(PredictionResult { endpoints })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scores_are_deterministic() -> Result<()> {
        let predictor = MockPredictor::default();
        let query = MoleculeQuery::parse(Some("c1ccccc1"))?;

        let first = predictor.predict(&query).await?;
        let second = predictor.predict(&query).await?;

        assert_eq!(first, second);
        assert_eq!(first.endpoints.len(), TOX21_ENDPOINTS.len());
        assert_eq!(predictor.calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn scores_stay_in_range() -> Result<()> {
        let predictor = MockPredictor::default();
        let query = MoleculeQuery::parse(Some("CC(=O)OC1=CC=CC=C1C(=O)O"))?;

        for score in predictor.predict(&query).await?.endpoints.values() {
            assert!((0.0..=1.0).contains(&score.probability));
            assert!((0.5..=1.0).contains(&score.confidence));
        }
        Ok(())
    }

    #[tokio::test]
    async fn custom_labels_are_reported() -> Result<()> {
        let predictor = MockPredictor::new(MockPredictorConfig {
            toxic_threshold: 0.0,
        })
        .with_labels("Active", "Inactive");
        let query = MoleculeQuery::parse(Some("CCO"))?;

        for score in predictor.predict(&query).await?.endpoints.values() {
            assert_eq!(score.prediction, "Active");
        }
        Ok(())
    }

    #[tokio::test]
    async fn failing_predictor_reports_message() -> Result<()> {
        let predictor = MockPredictor::failing("model crashed");
        let query = MoleculeQuery::parse(Some("CCO"))?;

        let error = predictor.predict(&query).await.unwrap_err();
        assert_eq!(error.user_message(), "model crashed");
        Ok(())
    }
}
