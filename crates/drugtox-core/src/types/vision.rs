//! Structured data extracted from medicine label photographs.

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Self-reported confidence of a vision extraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    /// Interprets a free-form confidence label; anything unrecognized is
    /// treated as [`Confidence::Low`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" | "moderate" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Ingredient data extracted from a label image.
///
/// `raw_text` always carries the model's complete reply, whether or not a
/// structured object could be recovered from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionExtractionResult {
    pub primary_ingredient: String,
    pub ingredients: Vec<String>,
    pub smiles: Vec<String>,
    pub formulas: Vec<String>,
    pub quantities: Vec<String>,
    pub insights: String,
    pub confidence: Confidence,
    pub raw_text: String,
}

impl VisionExtractionResult {
    /// Builds a low-confidence placeholder that keeps the whole reply as
    /// both insights and raw text.
    pub fn placeholder(primary_ingredient: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        Self {
            primary_ingredient: primary_ingredient.into(),
            ingredients: Vec::new(),
            smiles: Vec::new(),
            formulas: Vec::new(),
            quantities: Vec::new(),
            insights: raw_text.clone(),
            confidence: Confidence::Low,
            raw_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_labels() {
        assert_eq!(Confidence::from_label(" HIGH "), Confidence::High);
        assert_eq!(Confidence::from_label("medium"), Confidence::Medium);
        assert_eq!(Confidence::from_label("very sure"), Confidence::Low);
    }

    #[test]
    fn placeholder_keeps_reply() {
        let result = VisionExtractionResult::placeholder("Unable to identify", "no json here");
        assert_eq!(result.insights, "no json here");
        assert_eq!(result.raw_text, "no json here");
        assert!(result.ingredients.is_empty());
        assert_eq!(result.confidence, Confidence::Low);
    }
}
