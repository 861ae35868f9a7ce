use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{ChatRequest, CompletionProvider, TRACING_TARGET, VisionRequest};
use crate::Result;

/// Completion provider wrapper with observability.
///
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct CompletionService {
    inner: Arc<dyn CompletionProvider>,
}

impl CompletionService {
    /// Wraps a provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: CompletionProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Returns the chat model name.
    pub fn chat_model(&self) -> &str {
        self.inner.chat_model()
    }

    /// Returns the vision model name.
    pub fn vision_model(&self) -> &str {
        self.inner.vision_model()
    }

    /// Runs a chat completion.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let start = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            model = self.inner.chat_model(),
            messages = request.messages.len(),
            temperature = request.options.temperature,
            max_tokens = request.options.max_tokens,
            "Requesting chat completion"
        );

        let result = self.inner.chat(request).await;
        log_outcome(&result, start, "chat");
        result
    }

    /// Runs a vision completion.
    pub async fn vision(&self, request: &VisionRequest) -> Result<String> {
        let start = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            model = self.inner.vision_model(),
            image_url_len = request.image_url.len(),
            "Requesting vision completion"
        );

        let result = self.inner.vision(request).await;
        log_outcome(&result, start, "vision");
        result
    }
}

fn log_outcome(result: &Result<String>, start: Instant, call: &'static str) {
    let elapsed = start.elapsed();
    match result {
        Ok(text) => {
            tracing::debug!(
                target: TRACING_TARGET,
                call,
                reply_len = text.len(),
                elapsed_ms = elapsed.as_millis(),
                "Completion successful"
            );
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                call,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Completion failed"
            );
        }
    }
}

impl fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionService")
            .field("chat_model", &self.inner.chat_model())
            .field("vision_model", &self.inner.vision_model())
            .finish_non_exhaustive()
    }
}
