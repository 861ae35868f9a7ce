//! Prediction request types.

use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/predict`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictToxicity {
    /// SMILES descriptor of the molecule.
    pub smiles: Option<String>,
}
