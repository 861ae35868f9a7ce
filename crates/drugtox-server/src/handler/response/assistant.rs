//! Assistant response types.

use drugtox_core::types::{AnalysisNarrative, NarrativeSource};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response body of `POST /api/ai/chat`.
///
/// `success` is false whenever the text did not come from the model.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub response: String,
    pub timestamp: Timestamp,
    pub success: bool,
    pub source: NarrativeSource,
}

impl From<AnalysisNarrative> for AssistantReply {
    fn from(narrative: AnalysisNarrative) -> Self {
        Self {
            success: narrative.is_model(),
            source: narrative.source,
            timestamp: narrative.generated_at,
            response: narrative.text,
        }
    }
}

/// Response body of `GET /api/ai/explain/{endpoint_id}`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointExplanation {
    pub endpoint_id: String,
    pub explanation: String,
    pub timestamp: Timestamp,
}

/// Response body of `POST /api/ai/suggest`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationSuggestions {
    pub smiles: String,
    pub suggestions: AnalysisNarrative,
    pub timestamp: Timestamp,
}
