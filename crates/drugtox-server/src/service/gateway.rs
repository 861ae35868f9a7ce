//! Single point of contact with the language model.
//!
//! [`AiGateway::complete`] never fails: any problem with the call is
//! absorbed into a fallback narrative. [`AiGateway::try_complete`] surfaces
//! the failure instead, for flows that must report it.

use std::fmt;
use std::sync::Arc;

use drugtox_core::completion::{ChatRequest, CompletionOptions};
use drugtox_core::types::{
    AnalysisNarrative, ChatMessage, EndpointPrediction, PredictionSummary, last_user_content,
};
use drugtox_core::{CompletionService, Error, Result};

use super::fallback::FallbackTable;
use super::prompts;

/// Tracing target for AI gateway operations.
const TRACING_TARGET: &str = "drugtox_server::service::gateway";

/// Owns the completion client handle and the fallback table.
#[derive(Clone)]
pub struct AiGateway {
    completion: Option<CompletionService>,
    fallback: Arc<FallbackTable>,
}

impl fmt::Debug for AiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiGateway")
            .field("completion", &self.completion)
            .field("fallback_rules", &self.fallback.rules().len())
            .finish()
    }
}

impl AiGateway {
    /// Creates a gateway over an optional completion client.
    pub fn new(completion: Option<CompletionService>) -> Self {
        Self {
            completion,
            fallback: Arc::new(FallbackTable::default()),
        }
    }

    /// Creates a gateway that always answers from the fallback table.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    /// Replaces the fallback table.
    pub fn with_fallback(mut self, fallback: FallbackTable) -> Self {
        self.fallback = Arc::new(fallback);
        self
    }

    /// Returns whether a completion client was constructed.
    pub fn is_available(&self) -> bool {
        self.completion.is_some()
    }

    /// Runs one completion and reports any failure.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AiServiceUnavailable`] when no client exists, the
    /// request is invalid, the call fails, or the reply is blank.
    ///
    /// [`ErrorKind::AiServiceUnavailable`]: drugtox_core::ErrorKind::AiServiceUnavailable
    pub async fn try_complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String> {
        let Some(completion) = &self.completion else {
            return Err(Error::ai_unavailable());
        };

        if messages.is_empty() {
            return Err(Error::ai_unavailable().with_message("No messages to complete"));
        }

        options
            .validate()
            .map_err(|e| Error::ai_unavailable().with_message(e.user_message().to_owned()))?;

        let text = completion.chat(&ChatRequest::new(messages, options)).await?;
        if text.trim().is_empty() {
            return Err(Error::ai_unavailable().with_message("AI service returned an empty reply"));
        }

        Ok(text)
    }

    /// Runs one completion, substituting a fallback narrative on failure.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> AnalysisNarrative {
        // The request takes ownership of the messages.
        let last_user = last_user_content(&messages).map(ChatMessage::user);

        match self.try_complete(messages, options).await {
            Ok(text) => AnalysisNarrative::model(text),
            Err(error) => {
                let narrative = self.fallback.respond(last_user.as_slice());
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    fallback_rule = narrative.fallback_rule.as_deref().unwrap_or_default(),
                    "Completion failed, using fallback"
                );
                narrative
            }
        }
    }

    /// Produces the narrative attached to a prediction.
    #[tracing::instrument(skip_all, fields(smiles = %smiles))]
    pub async fn analyze_molecule(
        &self,
        smiles: &str,
        predictions: &[EndpointPrediction],
        summary: &PredictionSummary,
        max_tokens: u32,
    ) -> AnalysisNarrative {
        let messages = prompts::analyze_molecule(smiles, predictions, summary);
        let options = CompletionOptions::new(prompts::ANALYSIS_TEMPERATURE, max_tokens);
        self.complete(messages, options).await
    }

    /// Explains one toxicity endpoint.
    ///
    /// # Errors
    ///
    /// Fails whenever the model cannot answer; no fallback text is used.
    #[tracing::instrument(skip(self))]
    pub async fn explain_endpoint(&self, endpoint_id: &str) -> Result<String> {
        let messages = prompts::explain_endpoint(endpoint_id);
        self.try_complete(messages, prompts::EXPLAIN_OPTIONS).await
    }

    /// Suggests structural modifications that may reduce toxicity.
    #[tracing::instrument(skip_all, fields(smiles = %smiles, endpoints = toxic_endpoints.len()))]
    pub async fn suggest_modifications(
        &self,
        smiles: &str,
        toxic_endpoints: &[String],
    ) -> AnalysisNarrative {
        let messages = prompts::suggest_modifications(smiles, toxic_endpoints);
        self.complete(messages, prompts::SUGGEST_OPTIONS).await
    }

    /// Answers a free-form assistant question.
    #[tracing::instrument(skip_all)]
    pub async fn chat(&self, message: &str, max_tokens: u32) -> AnalysisNarrative {
        let messages = prompts::chat(message);
        let options = CompletionOptions::new(prompts::CHAT_TEMPERATURE, max_tokens);
        self.complete(messages, options).await
    }
}
