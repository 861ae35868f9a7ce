//! Service readiness and model metadata handlers.

use std::collections::BTreeMap;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use jiff::Timestamp;

use super::response::{EndpointList, HealthStatus, ModelStats};
use crate::extract::Json;
use crate::handler::Result;
use crate::service::{PredictionOrchestrator, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "drugtox_server::handler::monitors";

/// Published validation accuracy of the deployed model.
const MODEL_ACCURACY: [(&str, f64); 5] = [
    ("NR-AR-LBD", 0.839),
    ("NR-AhR", 0.834),
    ("SR-MMP", 0.808),
    ("NR-ER-LBD", 0.757),
    ("NR-AR", 0.729),
];

const AVERAGE_ACCURACY: f64 = 0.793;
const MODEL_VERSION: &str = "1.0.0";

/// Reports readiness. Never fails and performs no I/O.
#[tracing::instrument(skip_all)]
async fn health_status(State(state): State<ServiceState>) -> Json<HealthStatus> {
    let response = HealthStatus::from(state.health());

    tracing::debug!(
        target: TRACING_TARGET,
        predictor_loaded = response.predictor_loaded,
        ai_available = response.ai_available,
        "Health status requested"
    );

    Json(response)
}

/// Lists the endpoint ids the predictor scores.
#[tracing::instrument(skip_all)]
async fn list_endpoints(
    State(orchestrator): State<PredictionOrchestrator>,
) -> Result<Json<EndpointList>> {
    let endpoints = orchestrator.endpoints()?;
    Ok(Json(EndpointList::from(endpoints)))
}

/// Returns the static accuracy table of the deployed model.
#[tracing::instrument(skip_all)]
async fn model_stats(
    State(orchestrator): State<PredictionOrchestrator>,
) -> Result<Json<ModelStats>> {
    orchestrator.predictor()?;

    let model_accuracy: BTreeMap<_, _> = MODEL_ACCURACY
        .into_iter()
        .map(|(endpoint, accuracy)| (endpoint.to_owned(), accuracy))
        .collect();

    Ok(Json(ModelStats {
        model_accuracy,
        total_predictions: 0,
        average_accuracy: AVERAGE_ACCURACY,
        model_version: MODEL_VERSION.to_owned(),
        last_updated: Timestamp::now(),
    }))
}

/// Returns a [`Router`] with all monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/health", get(health_status))
        .route("/api/endpoints", get(list_endpoints))
        .route("/api/stats", get(model_stats))
}
