//! AI assistant handlers: chat, endpoint explanations and structural
//! modification suggestions.
//!
//! Chat always answers with 200; AI failures are reported through the
//! `success` and `source` fields instead of the status code.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use drugtox_core::types::{MoleculeQuery, NarrativeSource};
use jiff::Timestamp;

use super::request::{AskAssistant, SuggestModifications};
use super::response::{AssistantReply, EndpointExplanation, ModificationSuggestions};
use crate::extract::{Json, Path};
use crate::handler::Result;
use crate::service::{AiGateway, ServiceConfig, ServiceState};

/// Tracing target for assistant operations.
const TRACING_TARGET: &str = "drugtox_server::handler::assistant";

/// Reply to a request without a message field.
const MISSING_MESSAGE: &str = "Please provide a message to continue our conversation.";

/// Reply to a blank message.
const EMPTY_MESSAGE: &str = "Please ask me a question about chemistry, biology, or toxicology!";

fn prompt_reply(text: &str) -> AssistantReply {
    AssistantReply {
        response: text.to_owned(),
        timestamp: Timestamp::now(),
        success: false,
        source: NarrativeSource::Fallback,
    }
}

/// Answers a free-form chemistry or biology question.
#[tracing::instrument(skip_all)]
async fn chat(
    State(gateway): State<AiGateway>,
    State(config): State<ServiceConfig>,
    request: Option<Json<AskAssistant>>,
) -> Json<AssistantReply> {
    let Some(message) = request.and_then(|Json(request)| request.message) else {
        return Json(prompt_reply(MISSING_MESSAGE));
    };

    let message = message.trim();
    if message.is_empty() {
        return Json(prompt_reply(EMPTY_MESSAGE));
    }

    if config.verbose_request_logging {
        tracing::info!(target: TRACING_TARGET, message = %message, "Chat message received");
    }

    let narrative = gateway.chat(message, config.chat_max_tokens).await;

    tracing::debug!(
        target: TRACING_TARGET,
        source = ?narrative.source,
        fallback_rule = narrative.fallback_rule.as_deref().unwrap_or_default(),
        "Chat answered"
    );

    Json(AssistantReply::from(narrative))
}

/// Explains one toxicity endpoint. Fails with 503 when the model cannot
/// answer.
#[tracing::instrument(skip_all, fields(endpoint_id = %endpoint_id))]
async fn explain_endpoint(
    State(gateway): State<AiGateway>,
    Path(endpoint_id): Path<String>,
) -> Result<Json<EndpointExplanation>> {
    let explanation = gateway.explain_endpoint(&endpoint_id).await?;

    Ok(Json(EndpointExplanation {
        endpoint_id,
        explanation,
        timestamp: Timestamp::now(),
    }))
}

/// Suggests structural modifications for a molecule.
#[tracing::instrument(skip_all)]
async fn suggest_modifications(
    State(gateway): State<AiGateway>,
    Json(request): Json<SuggestModifications>,
) -> Result<Json<ModificationSuggestions>> {
    let query = MoleculeQuery::parse(request.smiles.as_deref())?;
    let suggestions = gateway
        .suggest_modifications(query.as_str(), &request.toxic_endpoints)
        .await;

    Ok(Json(ModificationSuggestions {
        smiles: query.into_inner(),
        suggestions,
        timestamp: Timestamp::now(),
    }))
}

/// Returns a [`Router`] with all assistant routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/ai/chat", post(chat))
        .route("/api/ai/explain/{endpoint_id}", get(explain_endpoint))
        .route("/api/ai/suggest", post(suggest_modifications))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use drugtox_core::CompletionService;
    use drugtox_test::{MockCompletionProvider, MockPredictor};
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{
        create_degraded_test_server, create_test_server_with_router, create_test_server_with_state,
    };

    fn failing_ai_state() -> ServiceState {
        ServiceState::new(
            ServiceConfig::default(),
            Some(drugtox_core::PredictorService::new(MockPredictor::default())),
            Some(CompletionService::new(MockCompletionProvider::unavailable())),
        )
    }

    #[tokio::test]
    async fn chat_returns_model_reply() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server
            .post("/api/ai/chat")
            .json(&json!({"message": "What is a SMILES string?"}))
            .await;
        response.assert_status_ok();

        let reply = response.json::<AssistantReply>();
        assert!(reply.success);
        assert_eq!(reply.source, NarrativeSource::Model);
        assert!(!reply.response.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn chat_failure_is_still_ok() -> anyhow::Result<()> {
        let server = create_test_server_with_state(routes(), failing_ai_state())?;

        let response = server
            .post("/api/ai/chat")
            .json(&json!({"message": "hello"}))
            .await;
        response.assert_status_ok();

        let reply = response.json::<AssistantReply>();
        assert!(!reply.success);
        assert_eq!(reply.source, NarrativeSource::Fallback);
        assert!(reply.response.contains("help") || reply.response.contains("assist"));
        Ok(())
    }

    #[tokio::test]
    async fn chat_without_ai_client_is_still_ok() -> anyhow::Result<()> {
        let server = create_degraded_test_server()?;

        let response = server
            .post("/api/ai/chat")
            .json(&json!({"message": "What is benzene?"}))
            .await;
        response.assert_status_ok();
        assert!(response.json::<AssistantReply>().response.contains("What is benzene?"));
        Ok(())
    }

    #[tokio::test]
    async fn blank_or_missing_message_prompts_for_input() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server.post("/api/ai/chat").json(&json!({"message": "  "})).await;
        response.assert_status_ok();
        let reply = response.json::<AssistantReply>();
        assert!(!reply.success);
        assert_eq!(reply.response, EMPTY_MESSAGE);

        let response = server.post("/api/ai/chat").json(&json!({})).await;
        response.assert_status_ok();
        assert_eq!(response.json::<AssistantReply>().response, MISSING_MESSAGE);

        let response = server.post("/api/ai/chat").await;
        response.assert_status_ok();
        assert_eq!(response.json::<AssistantReply>().response, MISSING_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn explain_returns_model_text() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server.get("/api/ai/explain/SR-p53").await;
        response.assert_status_ok();

        let explanation = response.json::<EndpointExplanation>();
        assert_eq!(explanation.endpoint_id, "SR-p53");
        assert!(!explanation.explanation.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn explain_surfaces_ai_failure() -> anyhow::Result<()> {
        let server = create_test_server_with_state(routes(), failing_ai_state())?;

        let response = server.get("/api/ai/explain/NR-AR").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["kind"], "ai_service_unavailable");
        Ok(())
    }

    #[tokio::test]
    async fn suggest_validates_smiles() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server
            .post("/api/ai/suggest")
            .json(&json!({"smiles": "", "toxicEndpoints": ["SR-p53"]}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Empty SMILES string");
        Ok(())
    }

    #[tokio::test]
    async fn suggest_falls_back_without_failing() -> anyhow::Result<()> {
        let server = create_test_server_with_state(routes(), failing_ai_state())?;

        let response = server
            .post("/api/ai/suggest")
            .json(&json!({"smiles": " CCO ", "toxicEndpoints": ["SR-p53"]}))
            .await;
        response.assert_status_ok();

        let suggestions = response.json::<ModificationSuggestions>();
        assert_eq!(suggestions.smiles, "CCO");
        assert_eq!(suggestions.suggestions.source, NarrativeSource::Fallback);
        Ok(())
    }
}
