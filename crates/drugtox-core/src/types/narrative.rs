//! Analysis narratives attached to prediction responses, model-written or rule-based fallback.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Where the narrative text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSource {
    /// Produced by the remote language model.
    Model,
    /// Synthesized locally by the fallback table.
    Fallback,
}

/// Natural-language text attached to a response.
///
/// A fallback narrative always names the rule that produced it, so callers
/// can tell canned text from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisNarrative {
    pub text: String,
    pub source: NarrativeSource,
    pub generated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_rule: Option<String>,
}

impl AnalysisNarrative {
    /// Wraps model output.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: NarrativeSource::Model,
            generated_at: Timestamp::now(),
            fallback_rule: None,
        }
    }

    /// Wraps canned text produced by the named fallback rule.
    pub fn fallback(text: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: NarrativeSource::Fallback,
            generated_at: Timestamp::now(),
            fallback_rule: Some(rule.into()),
        }
    }

    /// Returns whether the text came from the model.
    pub fn is_model(&self) -> bool {
        self.source == NarrativeSource::Model
    }
}
