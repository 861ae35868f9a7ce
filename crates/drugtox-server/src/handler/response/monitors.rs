//! Monitor response types.

use std::collections::BTreeMap;

use drugtox_core::{ServiceHealth, ServiceStatus};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Readiness report returned by `GET /api/health`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// `healthy` when every collaborator is available, `degraded` otherwise.
    pub status: ServiceStatus,
    pub predictor_loaded: bool,
    pub ai_available: bool,
    pub timestamp: Timestamp,
}

impl From<ServiceHealth> for HealthStatus {
    fn from(health: ServiceHealth) -> Self {
        Self {
            status: health.status(),
            predictor_loaded: health.predictor_ready,
            ai_available: health.ai_ready,
            timestamp: health.checked_at,
        }
    }
}

/// Endpoint ids the predictor scores.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointList {
    pub endpoints: Vec<String>,
    pub count: usize,
}

impl From<Vec<String>> for EndpointList {
    fn from(endpoints: Vec<String>) -> Self {
        Self {
            count: endpoints.len(),
            endpoints,
        }
    }
}

/// Published accuracy figures of the deployed model.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStats {
    /// Validation accuracy per endpoint.
    pub model_accuracy: BTreeMap<String, f64>,
    /// Always zero; predictions are not counted.
    pub total_predictions: u64,
    pub average_accuracy: f64,
    pub model_version: String,
    pub last_updated: Timestamp,
}
