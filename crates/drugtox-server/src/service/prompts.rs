//! Prompt builders for every AI call the service makes.
//!
//! Each builder returns exactly one system persona followed by one user
//! message.

use drugtox_core::completion::CompletionOptions;
use drugtox_core::types::{ChatMessage, EndpointPrediction, PredictionSummary};

const ANALYST_PERSONA: &str = "You are an expert chemoinformatics AI specializing in toxicology \
    and drug safety. Provide concise, scientific analysis of molecular toxicity predictions.";

const TOXICOLOGIST_PERSONA: &str =
    "You are an expert in toxicology. Explain toxicity endpoints clearly and concisely.";

const MEDICINAL_CHEMIST_PERSONA: &str = "You are a medicinal chemist AI expert in \
    structure-activity relationships and toxicity reduction.";

const ASSISTANT_PERSONA: &str = "You are ChemBio Assistant, an expert AI in chemistry, biology, \
    and toxicology. Provide accurate and educational responses about molecular science, drug \
    discovery, toxicology, and related topics. Keep responses concise and informative.";

/// Instruction sent with every label image.
pub const VISION_INSTRUCTION: &str = r#"Analyze this medicine label image and extract the following information in JSON format:
{
  "primary_ingredient": "main active ingredient",
  "ingredients": ["list of all ingredients"],
  "smiles": ["SMILES notation if identifiable"],
  "formulas": ["chemical formulas"],
  "quantities": ["dosages and amounts"],
  "insights": "additional observations",
  "confidence": "high/medium/low"
}
Focus on active pharmaceutical ingredients and ignore excipients like colors and preservatives."#;

/// Sampling for prediction narratives.
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;
/// Sampling and budget for endpoint explanations.
pub const EXPLAIN_OPTIONS: CompletionOptions = CompletionOptions::new(0.2, 200);
/// Sampling and budget for modification suggestions.
pub const SUGGEST_OPTIONS: CompletionOptions = CompletionOptions::new(0.4, 600);
/// Sampling for assistant chat.
pub const CHAT_TEMPERATURE: f32 = 0.7;
/// Sampling and budget for label extraction.
pub const VISION_OPTIONS: CompletionOptions = CompletionOptions::new(1.0, 1024);

/// Builds the prediction narrative prompt.
pub fn analyze_molecule(
    smiles: &str,
    predictions: &[EndpointPrediction],
    summary: &PredictionSummary,
) -> Vec<ChatMessage> {
    let results = predictions
        .iter()
        .map(|p| {
            format!(
                "- {}: {} (Probability: {:.2}, Confidence: {:.2})",
                p.endpoint_id, p.predicted_class, p.probability, p.confidence
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "Analyze this molecular toxicity prediction:\n\n\
         Molecule SMILES: {smiles}\n\n\
         Results:\n{results}\n\n\
         Overall: {} ({} of {} endpoints toxic)\n\n\
         Provide a brief analysis covering:\n\
         1. Overall safety assessment\n\
         2. Key concerns (if any)\n\
         3. Confidence in predictions\n\n\
         Keep it under 200 words and scientific but accessible.",
        summary.overall_assessment.label(),
        summary.toxic_endpoints,
        summary.total_endpoints,
    );

    ChatMessage::conversation(ANALYST_PERSONA, user)
}

/// Builds the endpoint explanation prompt.
pub fn explain_endpoint(endpoint_id: &str) -> Vec<ChatMessage> {
    let user = format!(
        "Explain the toxicity endpoint \"{endpoint_id}\" in 100-150 words. Include:\n\
         1. What biological system it affects\n\
         2. Why it's important for drug safety\n\
         3. What happens when activated\n\n\
         Make it scientific but understandable."
    );

    ChatMessage::conversation(TOXICOLOGIST_PERSONA, user)
}

/// Builds the structural modification prompt.
pub fn suggest_modifications(smiles: &str, toxic_endpoints: &[String]) -> Vec<ChatMessage> {
    let endpoints = if toxic_endpoints.is_empty() {
        "none reported".to_owned()
    } else {
        toxic_endpoints.join(", ")
    };

    let user = format!(
        "The molecule with SMILES \"{smiles}\" shows toxicity in these endpoints: {endpoints}\n\n\
         Suggest structural modifications that could:\n\
         1. Reduce toxicity in the problematic endpoints\n\
         2. Maintain or improve desired biological activity\n\
         3. Follow medicinal chemistry best practices\n\
         4. Consider drug-like properties (Lipinski's Rule of Five)\n\n\
         Provide specific, actionable suggestions with scientific rationale."
    );

    ChatMessage::conversation(MEDICINAL_CHEMIST_PERSONA, user)
}

/// Builds the assistant chat prompt.
pub fn chat(message: &str) -> Vec<ChatMessage> {
    ChatMessage::conversation(ASSISTANT_PERSONA, message)
}

#[cfg(test)]
mod tests {
    use drugtox_core::types::{EndpointScore, PredictionResult, Role};

    use super::*;

    fn predictions() -> Vec<EndpointPrediction> {
        let mut result = PredictionResult::default();
        result.endpoints.insert(
            "SR-p53".to_owned(),
            EndpointScore {
                probability: 0.81,
                prediction: "Toxic".to_owned(),
                confidence: 0.62,
            },
        );
        result.to_endpoint_predictions()
    }

    #[test]
    fn every_prompt_has_one_system_message() {
        let predictions = predictions();
        let summary = PredictionSummary::from_predictions(&predictions);

        let prompts = [
            analyze_molecule("CCO", &predictions, &summary),
            explain_endpoint("SR-p53"),
            suggest_modifications("CCO", &["SR-p53".to_owned()]),
            chat("hello"),
        ];

        for messages in prompts {
            let system = messages.iter().filter(|m| m.role == Role::System).count();
            assert_eq!(system, 1);
            assert_eq!(messages[0].role, Role::System);
            assert_eq!(messages.last().map(|m| m.role), Some(Role::User));
        }
    }

    #[test]
    fn analysis_prompt_lists_endpoints() {
        let predictions = predictions();
        let summary = PredictionSummary::from_predictions(&predictions);
        let messages = analyze_molecule("CCO", &predictions, &summary);

        assert!(messages[1].content.contains("SR-p53: toxic (Probability: 0.81"));
        assert!(messages[1].content.contains("High toxicity risk"));
    }

    #[test]
    fn options_are_valid() {
        for options in [EXPLAIN_OPTIONS, SUGGEST_OPTIONS, VISION_OPTIONS] {
            assert!(options.validate().is_ok());
        }
    }
}
