//! Assistant request types.

use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/ai/chat`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskAssistant {
    pub message: Option<String>,
}

/// Request payload for `POST /api/ai/suggest`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestModifications {
    /// SMILES descriptor of the molecule to modify.
    pub smiles: Option<String>,
    /// Endpoints the molecule was predicted toxic for.
    #[serde(default)]
    pub toxic_endpoints: Vec<String>,
}
