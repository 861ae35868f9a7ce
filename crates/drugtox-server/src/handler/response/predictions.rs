//! Prediction response types.

use std::collections::BTreeMap;

use drugtox_core::types::{
    AnalysisNarrative, EndpointPrediction, PredictedClass, PredictionSummary,
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::service::PredictionReport;

/// Per-endpoint entry of a prediction response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
    /// Probability of the toxic class, as reported by the predictor.
    pub probability: f64,
    /// Interpreted class, consistent with the summary counts.
    pub prediction: PredictedClass,
    /// Predictor confidence, as reported by the predictor.
    pub confidence: f64,
}

impl From<&EndpointPrediction> for EndpointResult {
    fn from(prediction: &EndpointPrediction) -> Self {
        Self {
            probability: prediction.probability,
            prediction: prediction.predicted_class,
            confidence: prediction.confidence,
        }
    }
}

/// Response body of `POST /api/predict`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub success: bool,
    pub smiles: String,
    pub timestamp: Timestamp,
    /// Interpreted predictions keyed by endpoint id.
    pub endpoints: BTreeMap<String, EndpointResult>,
    pub summary: PredictionSummary,
    /// Absent when narratives are disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AnalysisNarrative>,
}

impl From<PredictionReport> for Prediction {
    fn from(report: PredictionReport) -> Self {
        let endpoints = report
            .predictions
            .iter()
            .map(|p| (p.endpoint_id.clone(), EndpointResult::from(p)))
            .collect();

        Self {
            success: true,
            smiles: report.query.into_inner(),
            timestamp: report.completed_at,
            endpoints,
            summary: report.summary,
            ai_analysis: report.narrative,
        }
    }
}
