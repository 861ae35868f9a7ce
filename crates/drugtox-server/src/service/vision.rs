//! Ingredient extraction from medicine label photographs.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use drugtox_core::completion::VisionRequest;
use drugtox_core::types::{Confidence, VisionExtractionResult};
use drugtox_core::{CompletionService, Error, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::prompts;

/// Tracing target for vision extraction.
const TRACING_TARGET: &str = "drugtox_server::service::vision";

/// Placeholder ingredient when the reply holds no JSON object.
pub const UNIDENTIFIED: &str = "Unable to identify";

/// Placeholder ingredient when the reply holds a malformed JSON object.
pub const PARSING_ERROR: &str = "Parsing error";

/// First `{` through last `}`, across lines.
static JSON_REGION: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").ok());

/// Schema the vision model is asked to produce. Every field is optional so
/// partial objects still parse, and scalar fields accept any JSON scalar.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LabelFields {
    #[serde(deserialize_with = "lenient_text")]
    primary_ingredient: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    ingredients: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    smiles: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    formulas: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    quantities: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    insights: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    confidence: Option<String>,
}

/// Renders a JSON scalar as text. `null` yields nothing.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Accepts a string, number, boolean or `null`.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// Accepts an array of scalars, a lone scalar, or `null`.
fn lenient_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_text).collect(),
        single => value_text(single).into_iter().collect(),
    };

    Ok(items)
}

/// Runs label images through the vision model.
#[derive(Debug, Clone)]
pub struct VisionLabelExtractor {
    completion: Option<CompletionService>,
}

impl VisionLabelExtractor {
    /// Creates an extractor over an optional completion client.
    pub fn new(completion: Option<CompletionService>) -> Self {
        Self { completion }
    }

    /// Returns whether a completion client was constructed.
    pub fn is_available(&self) -> bool {
        self.completion.is_some()
    }

    /// Extracts ingredient data from one image.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`] for an empty image and
    /// [`ErrorKind::VisionUnavailable`] when no reply text was received.
    /// An unparseable reply is not an error; it yields a low-confidence
    /// placeholder.
    ///
    /// [`ErrorKind::InvalidInput`]: drugtox_core::ErrorKind::InvalidInput
    /// [`ErrorKind::VisionUnavailable`]: drugtox_core::ErrorKind::VisionUnavailable
    #[tracing::instrument(skip(self, image), fields(bytes = image.len()))]
    pub async fn extract(&self, image: &[u8], image_name: &str) -> Result<VisionExtractionResult> {
        if image.is_empty() {
            return Err(Error::invalid_input().with_message("Image file is empty"));
        }

        let Some(completion) = &self.completion else {
            return Err(Error::vision_unavailable());
        };

        let image_url = format!(
            "data:{};base64,{}",
            mime_from_name(image_name),
            STANDARD.encode(image)
        );
        let request = VisionRequest::new(
            prompts::VISION_INSTRUCTION,
            image_url,
            prompts::VISION_OPTIONS,
        );

        let reply = completion.vision(&request).await.map_err(|e| {
            tracing::warn!(target: TRACING_TARGET, error = %e, "Vision call failed");
            Error::vision_unavailable().with_source(e)
        })?;

        if reply.trim().is_empty() {
            return Err(Error::vision_unavailable().with_message("Vision model returned no text"));
        }

        Ok(parse_reply(reply))
    }
}

/// Recovers the structured result from a vision reply. Never fails.
pub fn parse_reply(reply: String) -> VisionExtractionResult {
    let Some(region) = JSON_REGION.as_ref().and_then(|re| re.find(&reply)) else {
        tracing::debug!(target: TRACING_TARGET, "No JSON object in vision reply");
        return VisionExtractionResult::placeholder(UNIDENTIFIED, reply);
    };

    let fields = match serde_json::from_str::<LabelFields>(region.as_str()) {
        Ok(fields) => fields,
        Err(error) => {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                "Malformed JSON object in vision reply"
            );
            return VisionExtractionResult::placeholder(PARSING_ERROR, reply);
        }
    };

    VisionExtractionResult {
        primary_ingredient: fields
            .primary_ingredient
            .unwrap_or_else(|| UNIDENTIFIED.to_owned()),
        ingredients: fields.ingredients,
        smiles: fields.smiles,
        formulas: fields.formulas,
        quantities: fields.quantities,
        insights: fields.insights.unwrap_or_default(),
        confidence: fields
            .confidence
            .as_deref()
            .map(Confidence::from_label)
            .unwrap_or_default(),
        raw_text: reply,
    }
}

/// Picks the image mime type from the file extension.
fn mime_from_name(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use drugtox_core::ErrorKind;
    use drugtox_test::{MockCompletionProvider, MockReply};

    use super::*;

    #[test]
    fn parses_embedded_object() {
        let reply = "Here you go:\n```json\n{\"primary_ingredient\": \"Paracetamol\", \
                     \"ingredients\": [\"Paracetamol\"], \"quantities\": [\"500 mg\"], \
                     \"confidence\": \"High\"}\n```";
        let result = parse_reply(reply.to_owned());

        assert_eq!(result.primary_ingredient, "Paracetamol");
        assert_eq!(result.quantities, ["500 mg"]);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.raw_text, reply);
    }

    #[test]
    fn missing_object_yields_placeholder() {
        let reply = "I cannot read this label.";
        let result = parse_reply(reply.to_owned());

        assert_eq!(result.primary_ingredient, UNIDENTIFIED);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.ingredients.is_empty());
        assert_eq!(result.insights, reply);
        assert_eq!(result.raw_text, reply);
    }

    #[test]
    fn unbalanced_braces_yield_placeholder() {
        for reply in ["{\"primary_ingredient\": \"Ibuprofen\"", "} oops {", "{ {\"a\": 1}"] {
            let result = parse_reply(reply.to_owned());
            assert_eq!(result.confidence, Confidence::Low);
            assert_eq!(result.raw_text, reply);
        }
    }

    #[test]
    fn malformed_object_is_a_parsing_error() {
        let reply = "{\"primary_ingredient\": Ibuprofen}";
        let result = parse_reply(reply.to_owned());
        assert_eq!(result.primary_ingredient, PARSING_ERROR);
        assert_eq!(result.insights, reply);
    }

    #[test]
    fn null_lists_are_empty() {
        let reply = "{\"primary_ingredient\": \"Ibuprofen\", \"smiles\": null, \
                     \"formulas\": null, \"insights\": null, \"confidence\": \"Medium\"}";
        let result = parse_reply(reply.to_owned());

        assert_eq!(result.primary_ingredient, "Ibuprofen");
        assert!(result.smiles.is_empty());
        assert!(result.formulas.is_empty());
        assert!(result.insights.is_empty());
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn numeric_entries_become_text() {
        let reply = "{\"primary_ingredient\": \"Ibuprofen\", \"quantities\": [200, \"400 mg\"], \
                     \"ingredients\": \"Ibuprofen\"}";
        let result = parse_reply(reply.to_owned());

        assert_eq!(result.primary_ingredient, "Ibuprofen");
        assert_eq!(result.quantities, ["200", "400 mg"]);
        assert_eq!(result.ingredients, ["Ibuprofen"]);
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_from_name("label.PNG"), "image/png");
        assert_eq!(mime_from_name("label.webp"), "image/webp");
        assert_eq!(mime_from_name("label"), "image/jpeg");
        assert_eq!(mime_from_name("label.jpeg"), "image/jpeg");
    }

    #[tokio::test]
    async fn empty_image_is_rejected() {
        let extractor = VisionLabelExtractor::new(None);
        let error = extractor.extract(&[], "label.jpg").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn missing_client_is_unavailable() {
        let extractor = VisionLabelExtractor::new(None);
        let error = extractor.extract(b"\xff\xd8", "label.jpg").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::VisionUnavailable);
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let provider =
            MockCompletionProvider::replying("unused").with_vision_reply(MockReply::Unavailable);
        let extractor = VisionLabelExtractor::new(Some(CompletionService::new(provider)));

        let error = extractor.extract(b"\xff\xd8", "label.jpg").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::VisionUnavailable);
    }

    #[tokio::test]
    async fn reply_is_parsed() {
        let provider = MockCompletionProvider::replying(
            "{\"primary_ingredient\": \"Aspirin\", \"smiles\": [\"CC(=O)OC1=CC=CC=C1C(=O)O\"]}",
        );
        let extractor = VisionLabelExtractor::new(Some(CompletionService::new(provider.clone())));

        let result = extractor.extract(b"\x89PNG", "label.png").await.unwrap();
        assert_eq!(result.primary_ingredient, "Aspirin");
        assert_eq!(result.smiles.len(), 1);
        assert_eq!(provider.vision_calls(), 1);
    }
}
