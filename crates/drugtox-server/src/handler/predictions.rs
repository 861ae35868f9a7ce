//! Toxicity prediction handlers.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use super::request::PredictToxicity;
use super::response::Prediction;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::{PredictionOrchestrator, ServiceState};

/// Tracing target for prediction operations.
const TRACING_TARGET: &str = "drugtox_server::handler::predictions";

/// Scores one molecule across every endpoint the predictor knows.
#[tracing::instrument(skip_all)]
async fn predict_toxicity(
    State(orchestrator): State<PredictionOrchestrator>,
    Json(request): Json<PredictToxicity>,
) -> Result<Json<Prediction>> {
    let report = orchestrator.predict(request.smiles.as_deref()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        endpoints = report.summary.total_endpoints,
        toxic = report.summary.toxic_endpoints,
        narrative = report.narrative.is_some(),
        "Prediction completed"
    );

    Ok(Json(Prediction::from(report)))
}

/// Returns a [`Router`] with all prediction routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/api/predict", post(predict_toxicity))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use drugtox_core::types::{
        NarrativeSource, OverallAssessment, PredictedClass, TOX21_ENDPOINTS,
    };
    use drugtox_test::{MockCompletionProvider, MockPredictor, MockPredictorConfig};
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{
        create_degraded_test_server, create_test_server_with_router, create_test_server_with_state,
    };
    use crate::service::ServiceConfig;

    #[tokio::test]
    async fn empty_smiles_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server.post("/api/predict").json(&json!({"smiles": ""})).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Empty SMILES string");
        assert_eq!(body["kind"], "invalid_input");
        Ok(())
    }

    #[tokio::test]
    async fn missing_smiles_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server.post("/api/predict").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "SMILES string required");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server
            .post("/api/predict")
            .text("{\"smiles\": ")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "bad_request");
        Ok(())
    }

    #[tokio::test]
    async fn prediction_has_every_endpoint() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server
            .post("/api/predict")
            .json(&json!({"smiles": "CCO"}))
            .await;
        response.assert_status_ok();

        let prediction = response.json::<Prediction>();
        assert!(prediction.success);
        assert_eq!(prediction.smiles, "CCO");
        assert_eq!(prediction.endpoints.len(), TOX21_ENDPOINTS.len());
        assert_eq!(prediction.summary.total_endpoints, TOX21_ENDPOINTS.len());
        assert_ne!(prediction.summary.overall_assessment, OverallAssessment::Unknown);

        let narrative = prediction.ai_analysis.expect("narrative is enabled by default");
        assert_eq!(narrative.source, NarrativeSource::Model);
        Ok(())
    }

    #[tokio::test]
    async fn endpoint_scores_keep_wire_shape() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let body = server
            .post("/api/predict")
            .json(&json!({"smiles": "c1ccccc1"}))
            .await
            .json::<Value>();

        let score = &body["endpoints"]["SR-p53"];
        assert!(score["probability"].is_f64());
        assert!(score["confidence"].is_f64());
        assert!(score["prediction"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn endpoint_classes_match_summary() -> anyhow::Result<()> {
        let predictor = MockPredictor::new(MockPredictorConfig {
            toxic_threshold: 0.0,
        })
        .with_labels("Active", "Inactive");
        let state = ServiceState::new(
            ServiceConfig::default(),
            Some(drugtox_core::PredictorService::new(predictor)),
            Some(drugtox_core::CompletionService::new(
                MockCompletionProvider::replying("unused"),
            )),
        );
        let server = create_test_server_with_state(routes(), state)?;

        let response = server
            .post("/api/predict")
            .json(&json!({"smiles": "CCO"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["endpoints"]["NR-AR"]["prediction"], "toxic");

        let prediction = response.json::<Prediction>();
        assert!(
            prediction
                .endpoints
                .values()
                .all(|e| e.prediction == PredictedClass::Toxic)
        );
        assert_eq!(prediction.summary.toxic_endpoints, prediction.endpoints.len());
        Ok(())
    }

    #[tokio::test]
    async fn predictor_failure_is_reported() -> anyhow::Result<()> {
        let state = ServiceState::new(
            ServiceConfig::default(),
            Some(drugtox_core::PredictorService::new(MockPredictor::failing(
                "Invalid SMILES string",
            ))),
            Some(drugtox_core::CompletionService::new(
                MockCompletionProvider::replying("unused"),
            )),
        );
        let server = create_test_server_with_state(routes(), state)?;

        let response = server
            .post("/api/predict")
            .json(&json!({"smiles": "not-a-molecule"}))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Invalid SMILES string");
        assert_eq!(body["kind"], "prediction_failed");
        Ok(())
    }

    #[tokio::test]
    async fn missing_predictor_is_reported() -> anyhow::Result<()> {
        let server = create_degraded_test_server()?;

        let response = server
            .post("/api/predict")
            .json(&json!({"smiles": "CCO"}))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["kind"], "predictor_unavailable");
        Ok(())
    }

    #[tokio::test]
    async fn ai_failure_falls_back() -> anyhow::Result<()> {
        let state = ServiceState::new(
            ServiceConfig::default(),
            Some(drugtox_core::PredictorService::new(MockPredictor::default())),
            Some(drugtox_core::CompletionService::new(
                MockCompletionProvider::unavailable(),
            )),
        );
        let server = create_test_server_with_state(routes(), state)?;

        let prediction = server
            .post("/api/predict")
            .json(&json!({"smiles": "CCO"}))
            .await
            .json::<Prediction>();

        let narrative = prediction.ai_analysis.expect("narrative is enabled by default");
        assert_eq!(narrative.source, NarrativeSource::Fallback);
        assert!(narrative.fallback_rule.is_some());
        Ok(())
    }
}
