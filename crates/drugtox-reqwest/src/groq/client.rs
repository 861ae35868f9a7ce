//! Reqwest-based client for the Groq chat completions API.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use drugtox_core::completion::{ChatRequest, CompletionOptions, VisionRequest};
use drugtox_core::{CompletionProvider, CompletionService, ErrorKind};
use reqwest::Client;
use url::Url;

use super::GroqConfig;
use super::wire::{CompletionBody, CompletionResponse, WireMessage};
use crate::error::{Error, Result};
use crate::http;

/// Tracing target for Groq client operations.
pub const TRACING_TARGET: &str = "drugtox_reqwest::groq";

/// Name used for the upstream in client-facing error messages.
const SERVICE_NAME: &str = "AI service";

struct GroqClientInner {
    http: Client,
    endpoint: Url,
    api_key: String,
    config: GroqConfig,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
///
/// Cloning is cheap; all clones share one connection pool.
///
/// # Examples
///
/// ```rust,ignore
/// use drugtox_reqwest::{GroqClient, GroqConfig};
///
/// let client = GroqClient::new(GroqConfig::with_api_key(key))?;
/// let service = client.into_service();
/// ```
#[derive(Clone)]
pub struct GroqClient {
    inner: Arc<GroqClientInner>,
}

impl fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl GroqClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`] when the API key is missing or
    /// blank, the base URL is invalid, or the HTTP client cannot be built.
    pub fn new(config: GroqConfig) -> drugtox_core::Result<Self> {
        Self::try_new(config).map_err(|e| e.into_core(ErrorKind::Configuration, SERVICE_NAME))
    }

    fn try_new(config: GroqConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| Error::Config("GROQ_API_KEY is not set".to_owned()))?
            .to_owned();

        let endpoint = http::join_url(&config.base_url, "chat/completions")?;
        let timeout = config
            .effective_timeout()
            .max(config.effective_vision_timeout());
        let http = http::build_client(timeout)?;

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            chat_model = %config.chat_model,
            vision_model = %config.vision_model,
            "Groq client created"
        );

        let inner = GroqClientInner {
            http,
            endpoint,
            api_key,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GroqConfig {
        &self.inner.config
    }

    /// Converts this client into a [`CompletionService`].
    pub fn into_service(self) -> CompletionService {
        CompletionService::new(self)
    }

    async fn complete(
        &self,
        model: &str,
        messages: Vec<WireMessage<'_>>,
        options: &CompletionOptions,
        default_timeout: Duration,
    ) -> Result<String> {
        let body = CompletionBody {
            model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream: false,
        };

        let timeout = options.timeout.unwrap_or(default_timeout);

        tracing::trace!(
            target: TRACING_TARGET,
            model,
            timeout_ms = timeout.as_millis(),
            "Sending completion request"
        );

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .bearer_auth(&self.inner.api_key)
            .json(&body)
            .timeout(timeout)
            .send()
            .await?;

        let response = http::ensure_success(response).await.inspect_err(|e| {
            tracing::warn!(target: TRACING_TARGET, error = %e, "Completion rejected");
        })?;

        let reply: CompletionResponse = response.json().await?;
        reply.into_text().ok_or(Error::EmptyReply)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for GroqClient {
    fn chat_model(&self) -> &str {
        &self.inner.config.chat_model
    }

    fn vision_model(&self) -> &str {
        &self.inner.config.vision_model
    }

    async fn chat(&self, request: &ChatRequest) -> drugtox_core::Result<String> {
        let messages = request.messages.iter().map(WireMessage::from).collect();
        self.complete(
            &self.inner.config.chat_model,
            messages,
            &request.options,
            self.inner.config.effective_timeout(),
        )
        .await
        .map_err(|e| e.into_core(ErrorKind::AiServiceUnavailable, SERVICE_NAME))
    }

    async fn vision(&self, request: &VisionRequest) -> drugtox_core::Result<String> {
        let messages = vec![WireMessage::user_with_image(
            &request.instruction,
            &request.image_url,
        )];
        self.complete(
            &self.inner.config.vision_model,
            messages,
            &request.options,
            self.inner.config.effective_vision_timeout(),
        )
        .await
        .map_err(|e| e.into_core(ErrorKind::AiServiceUnavailable, SERVICE_NAME))
    }
}
