//! Chat messages exchanged with completion providers.

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Builds the two-message conversation every prompt uses: exactly one
    /// system persona followed by the caller's user message.
    pub fn conversation(persona: impl Into<String>, user: impl Into<String>) -> Vec<Self> {
        vec![Self::system(persona), Self::user(user)]
    }
}

/// Returns the content of the most recent user message, if any.
pub fn last_user_content(messages: &[ChatMessage]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_prepends_one_system_message() {
        let messages = ChatMessage::conversation("persona", "question");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn last_user_content_skips_assistant_turns() {
        let messages = vec![
            ChatMessage::system("persona"),
            ChatMessage::user("first"),
            ChatMessage::assistant("reply"),
        ];
        assert_eq!(last_user_content(&messages), Some("first"));
        assert_eq!(last_user_content(&[]), None);
    }

    #[test]
    fn roles_serialize_lowercase() -> serde_json::Result<()> {
        let value = serde_json::to_value(ChatMessage::user("hi"))?;
        assert_eq!(value["role"], "user");
        Ok(())
    }
}
