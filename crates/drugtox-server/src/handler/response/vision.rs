//! Vision response types.

use drugtox_core::types::VisionExtractionResult;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response body of `POST /api/vision/analyze`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelAnalysis {
    pub success: bool,
    pub image_name: String,
    pub analysis: VisionExtractionResult,
    /// The model's complete reply.
    pub raw_response: String,
    pub timestamp: Timestamp,
}

impl LabelAnalysis {
    /// Wraps an extraction result for the named image.
    pub fn new(image_name: impl Into<String>, analysis: VisionExtractionResult) -> Self {
        Self {
            success: true,
            image_name: image_name.into(),
            raw_response: analysis.raw_text.clone(),
            analysis,
            timestamp: Timestamp::now(),
        }
    }
}
