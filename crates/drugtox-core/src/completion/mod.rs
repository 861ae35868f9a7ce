//! Language model completion abstraction.
//!
//! Covers the two call shapes the service needs from a remote LLM: plain
//! chat completions and single-image vision completions. Providers return
//! the reply text only; interpretation (fallbacks, JSON recovery) happens
//! in the server's service layer.

mod options;
mod service;

pub use options::CompletionOptions;
pub use service::CompletionService;

use crate::Result;
use crate::types::ChatMessage;

/// Tracing target for completion operations.
pub const TRACING_TARGET: &str = "drugtox_core::completion";

/// A chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>, options: CompletionOptions) -> Self {
        Self { messages, options }
    }
}

/// A vision completion request carrying one image.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequest {
    /// Text instruction sent alongside the image.
    pub instruction: String,
    /// Image as a `data:` URL.
    pub image_url: String,
    pub options: CompletionOptions,
}

impl VisionRequest {
    pub fn new(
        instruction: impl Into<String>,
        image_url: impl Into<String>,
        options: CompletionOptions,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            image_url: image_url.into(),
            options,
        }
    }
}

/// A remote language model.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the model used for chat completions.
    fn chat_model(&self) -> &str;

    /// Returns the model used for vision completions.
    fn vision_model(&self) -> &str;

    /// Runs a chat completion and returns the reply text.
    ///
    /// # Errors
    ///
    /// Any transport, authentication, timeout or decoding failure is
    /// reported as [`ErrorKind::AiServiceUnavailable`](crate::ErrorKind::AiServiceUnavailable).
    async fn chat(&self, request: &ChatRequest) -> Result<String>;

    /// Runs a vision completion and returns the reply text.
    ///
    /// # Errors
    ///
    /// Failures are reported as [`ErrorKind::AiServiceUnavailable`](crate::ErrorKind::AiServiceUnavailable);
    /// callers decide how to surface them.
    async fn vision(&self, request: &VisionRequest) -> Result<String>;
}
