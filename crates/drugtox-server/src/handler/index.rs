//! API index handler.

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use super::response::ApiIndex;
use crate::extract::Json;
use crate::service::{AiGateway, ServiceState};

const API_NAME: &str = "DrugTox-AI API";
const API_VERSION: &str = "2.0.0";
const API_DESCRIPTION: &str = "Advanced molecular toxicity prediction with AI analysis";

const ENDPOINTS: [(&str, &str); 8] = [
    ("health", "/api/health"),
    ("predict", "/api/predict"),
    ("endpoints", "/api/endpoints"),
    ("stats", "/api/stats"),
    ("ai_chat", "/api/ai/chat"),
    ("ai_explain", "/api/ai/explain/{endpoint_id}"),
    ("ai_suggest", "/api/ai/suggest"),
    ("vision_analyze", "/api/vision/analyze"),
];

const FEATURES: [&str; 5] = [
    "Molecular toxicity prediction across Tox21 endpoints",
    "AI-generated analysis of prediction results",
    "Chemistry and toxicology assistant",
    "Structural modification suggestions",
    "Medicine label ingredient extraction",
];

/// Describes the API. Never fails.
async fn api_index(State(gateway): State<AiGateway>) -> Json<ApiIndex> {
    Json(ApiIndex {
        name: API_NAME.to_owned(),
        version: API_VERSION.to_owned(),
        description: API_DESCRIPTION.to_owned(),
        endpoints: ENDPOINTS
            .into_iter()
            .map(|(name, path)| (name.to_owned(), path.to_owned()))
            .collect(),
        features: FEATURES.into_iter().map(str::to_owned).collect(),
        status: "operational".to_owned(),
        ai_enabled: gateway.is_available(),
    })
}

/// Returns a [`Router`] with the index route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/", get(api_index))
}
