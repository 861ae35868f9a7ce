//! Configuration for the Groq client.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default Groq OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default vision model.
pub const DEFAULT_VISION_MODEL: &str = "llama-3.2-90b-vision-preview";

/// Default timeout for chat completions: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for vision completions: 60 seconds.
pub const DEFAULT_VISION_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Groq completion client.
///
/// The API key has no default. When it is absent the client cannot be
/// constructed and the service runs its AI features in fallback mode.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct GroqConfig {
    /// Groq API key.
    #[cfg_attr(
        feature = "config",
        arg(long = "groq-api-key", env = "GROQ_API_KEY", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[cfg_attr(
        feature = "config",
        arg(long = "groq-base-url", env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    pub base_url: String,

    /// Model used for chat completions.
    #[cfg_attr(
        feature = "config",
        arg(long = "ai-model", env = "AI_MODEL", default_value = DEFAULT_CHAT_MODEL)
    )]
    pub chat_model: String,

    /// Model used for vision completions.
    #[cfg_attr(
        feature = "config",
        arg(long = "ai-vision-model", env = "AI_VISION_MODEL", default_value = DEFAULT_VISION_MODEL)
    )]
    pub vision_model: String,

    /// Timeout in seconds for chat completions.
    #[cfg_attr(
        feature = "config",
        arg(id = "ai_timeout", long = "ai-timeout", env = "AI_TIMEOUT", default_value_t = 30)
    )]
    pub timeout_secs: u64,

    /// Timeout in seconds for vision completions.
    #[cfg_attr(
        feature = "config",
        arg(id = "ai_vision_timeout", long = "ai-vision-timeout", env = "AI_VISION_TIMEOUT", default_value_t = 60)
    )]
    pub vision_timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            chat_model: DEFAULT_CHAT_MODEL.to_owned(),
            vision_model: DEFAULT_VISION_MODEL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            vision_timeout_secs: DEFAULT_VISION_TIMEOUT.as_secs(),
        }
    }
}

impl GroqConfig {
    /// Creates a default configuration with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the chat model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Returns the API key if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns the chat timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// Returns the vision timeout, using the default if zero.
    pub fn effective_vision_timeout(&self) -> Duration {
        match self.vision_timeout_secs {
            0 => DEFAULT_VISION_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }
}

impl fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("vision_model", &self.vision_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("vision_timeout_secs", &self.vision_timeout_secs)
            .finish()
    }
}
