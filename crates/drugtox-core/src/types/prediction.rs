//! Toxicity prediction results and their per-request summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Score reported by a predictor for a single toxicity endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointScore {
    /// Probability of the toxic class in `[0, 1]`.
    pub probability: f64,
    /// Class label as reported by the predictor (e.g. `"Toxic"`).
    pub prediction: String,
    /// Predictor confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Raw predictor output: one score per endpoint id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Scores keyed by endpoint id.
    pub endpoints: BTreeMap<String, EndpointScore>,
}

/// Binary toxicity class, with `Unknown` for labels the predictor did not
/// express in a recognized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PredictedClass {
    Toxic,
    NonToxic,
    Unknown,
}

impl PredictedClass {
    /// Interprets a predictor label.
    ///
    /// Matching ignores case, whitespace, and `-`/`_` separators, so
    /// `"Non-toxic"`, `"non_toxic"` and `"NonToxic"` are equivalent.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "toxic" | "active" | "1" => Self::Toxic,
            "nontoxic" | "inactive" | "0" => Self::NonToxic,
            _ => Self::Unknown,
        }
    }
}

/// Per-endpoint prediction as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointPrediction {
    /// Endpoint id, e.g. `NR-AR` or `SR-p53`.
    pub endpoint_id: String,
    /// Probability of the toxic class, unmodified from the predictor.
    pub probability: f64,
    /// Interpreted class.
    pub predicted_class: PredictedClass,
    /// Predictor confidence, unmodified from the predictor.
    pub confidence: f64,
}

impl EndpointPrediction {
    /// Reshapes a raw predictor score, preserving id and numeric fields.
    pub fn from_score(endpoint_id: impl Into<String>, score: &EndpointScore) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            probability: score.probability,
            predicted_class: PredictedClass::from_label(&score.prediction),
            confidence: score.confidence,
        }
    }

    /// Returns whether this endpoint was classified as toxic.
    pub fn is_toxic(&self) -> bool {
        self.predicted_class == PredictedClass::Toxic
    }
}

impl PredictionResult {
    /// Reshapes every endpoint into an [`EndpointPrediction`], ordered by id.
    pub fn to_endpoint_predictions(&self) -> Vec<EndpointPrediction> {
        self.endpoints
            .iter()
            .map(|(id, score)| EndpointPrediction::from_score(id, score))
            .collect()
    }
}

/// Overall toxicity assessment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallAssessment {
    #[serde(rename = "Low toxicity risk")]
    Low,
    #[serde(rename = "Moderate toxicity risk")]
    Moderate,
    #[serde(rename = "High toxicity risk")]
    High,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl OverallAssessment {
    /// Returns the human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low toxicity risk",
            Self::Moderate => "Moderate toxicity risk",
            Self::High => "High toxicity risk",
            Self::Unknown => "Unknown",
        }
    }

    fn from_counts(toxic: usize, total: usize) -> Self {
        match (toxic, total) {
            (_, 0) => Self::Unknown,
            (0, _) => Self::Low,
            (toxic, total) if toxic * 2 < total => Self::Moderate,
            _ => Self::High,
        }
    }
}

/// Aggregate view over one request's endpoint predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSummary {
    pub total_endpoints: usize,
    pub toxic_endpoints: usize,
    pub toxic_endpoint_ids: Vec<String>,
    pub max_probability: f64,
    pub overall_assessment: OverallAssessment,
}

impl PredictionSummary {
    /// Derives the summary from endpoint predictions.
    pub fn from_predictions(predictions: &[EndpointPrediction]) -> Self {
        let toxic_endpoint_ids: Vec<String> = predictions
            .iter()
            .filter(|p| p.is_toxic())
            .map(|p| p.endpoint_id.clone())
            .collect();

        let max_probability = predictions
            .iter()
            .map(|p| p.probability)
            .fold(0.0_f64, f64::max);

        Self {
            total_endpoints: predictions.len(),
            toxic_endpoints: toxic_endpoint_ids.len(),
            overall_assessment: OverallAssessment::from_counts(
                toxic_endpoint_ids.len(),
                predictions.len(),
            ),
            toxic_endpoint_ids,
            max_probability,
        }
    }
}
