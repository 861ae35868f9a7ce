//! Mock completion provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use drugtox_core::completion::{ChatRequest, VisionRequest};
use drugtox_core::types::ChatMessage;
use drugtox_core::{CompletionProvider, Error, Result};

/// What the mock answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Reply with this text.
    Text(String),
    /// Fail as if the upstream were unreachable.
    Unavailable,
}

#[derive(Debug, Default)]
struct Recorded {
    chat_calls: AtomicUsize,
    vision_calls: AtomicUsize,
    last_messages: Mutex<Vec<ChatMessage>>,
}

/// Completion provider with scripted replies.
///
/// Clones share call counters, so a test can keep one clone as a handle
/// after moving another into a service.
#[derive(Debug, Clone)]
pub struct MockCompletionProvider {
    chat_reply: MockReply,
    vision_reply: MockReply,
    recorded: Arc<Recorded>,
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::replying("Mock completion")
    }
}

impl MockCompletionProvider {
    /// Replies to chat and vision requests with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            chat_reply: MockReply::Text(text.clone()),
            vision_reply: MockReply::Text(text),
            recorded: Arc::default(),
        }
    }

    /// Fails every request.
    pub fn unavailable() -> Self {
        Self {
            chat_reply: MockReply::Unavailable,
            vision_reply: MockReply::Unavailable,
            recorded: Arc::default(),
        }
    }

    /// Overrides the vision reply.
    pub fn with_vision_reply(mut self, reply: MockReply) -> Self {
        self.vision_reply = reply;
        self
    }

    /// Returns how many chat completions were requested.
    pub fn chat_calls(&self) -> usize {
        self.recorded.chat_calls.load(Ordering::SeqCst)
    }

    /// Returns how many vision completions were requested.
    pub fn vision_calls(&self) -> usize {
        self.recorded.vision_calls.load(Ordering::SeqCst)
    }

    /// Returns the messages of the most recent chat request.
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.recorded
            .last_messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    fn answer(reply: &MockReply) -> Result<String> {
        match reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Unavailable => {
                Err(Error::ai_unavailable().with_message("AI service is unreachable"))
            }
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn chat_model(&self) -> &str {
        "mock-chat"
    }

    fn vision_model(&self) -> &str {
        "mock-vision"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String> {
        self.recorded.chat_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.recorded.last_messages.lock() {
            last.clone_from(&request.messages);
        }
        Self::answer(&self.chat_reply)
    }

    async fn vision(&self, _request: &VisionRequest) -> Result<String> {
        self.recorded.vision_calls.fetch_add(1, Ordering::SeqCst);
        Self::answer(&self.vision_reply)
    }
}

#[cfg(test)]
mod tests {
    use drugtox_core::completion::CompletionOptions;

    use super::*;

    #[tokio::test]
    async fn clones_share_counters() -> Result<()> {
        let provider = MockCompletionProvider::replying("hi");
        let handle = provider.clone();

        let request = ChatRequest::new(
            ChatMessage::conversation("persona", "hello"),
            CompletionOptions::default(),
        );
        assert_eq!(provider.chat(&request).await?, "hi");
        assert_eq!(handle.chat_calls(), 1);
        assert_eq!(handle.last_messages().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_fails() {
        let provider = MockCompletionProvider::unavailable();
        let request = ChatRequest::new(vec![], CompletionOptions::default());
        assert!(provider.chat(&request).await.is_err());
    }
}
