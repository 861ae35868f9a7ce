//! OpenAI-compatible chat completion payloads.

use drugtox_core::types::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CompletionBody<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'a str,
    pub content: WireContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum WireContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageUrl<'a> {
    pub url: &'a str,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        Self {
            role: message.role.as_ref(),
            content: WireContent::Text(&message.content),
        }
    }
}

impl<'a> WireMessage<'a> {
    /// A user message with an instruction followed by one image.
    pub fn user_with_image(instruction: &'a str, image_url: &'a str) -> Self {
        Self {
            role: "user",
            content: WireContent::Parts(vec![
                ContentPart::Text { text: instruction },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: image_url },
                },
            ]),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Returns the first choice's text if it is non-blank.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn vision_message_uses_content_parts() -> serde_json::Result<()> {
        let message = WireMessage::user_with_image("read the label", "data:image/png;base64,AAAA");
        let value = serde_json::to_value(&message)?;

        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": "read the label" },
                    { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn chat_message_uses_plain_content() -> serde_json::Result<()> {
        let source = ChatMessage::system("persona");
        let value = serde_json::to_value(WireMessage::from(&source))?;
        assert_eq!(value, json!({ "role": "system", "content": "persona" }));
        Ok(())
    }

    #[test]
    fn blank_replies_are_discarded() -> serde_json::Result<()> {
        let response: CompletionResponse =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": "  " } }] }))?;
        assert!(response.into_text().is_none());

        let response: CompletionResponse = serde_json::from_value(json!({ "choices": [] }))?;
        assert!(response.into_text().is_none());
        Ok(())
    }
}
