//! API index response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response body of `GET /`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIndex {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Route templates keyed by a short name.
    pub endpoints: BTreeMap<String, String>,
    pub features: Vec<String>,
    pub status: String,
    pub ai_enabled: bool,
}
