#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default values for configuration options.
mod defaults {
    /// Token budget for the narrative attached to predictions.
    pub const ANALYSIS_MAX_TOKENS: u32 = 300;

    /// Token budget for assistant chat replies.
    pub const CHAT_MAX_TOKENS: u32 = 400;

    /// Upper bound accepted for any token budget.
    pub const MAX_TOKENS_LIMIT: u32 = 8192;
}

/// App [`state`] configuration.
///
/// Collects every behavior that differs between deployments: whether a
/// narrative is attached to predictions, how verbosely requests are logged,
/// and the token budgets of the AI calls.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Attach an AI narrative to every prediction response.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "INCLUDE_AI_ANALYSIS", default_value = "true", action = clap::ArgAction::Set)
    )]
    #[builder(default = "true")]
    pub include_ai_analysis: bool,

    /// Log request payloads and AI outcomes at info level.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "VERBOSE_REQUEST_LOGGING", default_value = "false", action = clap::ArgAction::Set)
    )]
    #[builder(default)]
    pub verbose_request_logging: bool,

    /// Token budget for prediction narratives.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "ANALYSIS_MAX_TOKENS", default_value_t = defaults::ANALYSIS_MAX_TOKENS)
    )]
    #[builder(default = "defaults::ANALYSIS_MAX_TOKENS")]
    pub analysis_max_tokens: u32,

    /// Token budget for assistant chat replies.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CHAT_MAX_TOKENS", default_value_t = defaults::CHAT_MAX_TOKENS)
    )]
    #[builder(default = "defaults::CHAT_MAX_TOKENS")]
    pub chat_max_tokens: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            include_ai_analysis: true,
            verbose_request_logging: false,
            analysis_max_tokens: defaults::ANALYSIS_MAX_TOKENS,
            chat_max_tokens: defaults::CHAT_MAX_TOKENS,
        }
    }
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        let budgets = [
            ("Analysis", builder.analysis_max_tokens),
            ("Chat", builder.chat_max_tokens),
        ];

        for (name, budget) in budgets {
            match budget {
                Some(0) => return Err(format!("{name} token budget must be greater than 0")),
                Some(tokens) if tokens > defaults::MAX_TOKENS_LIMIT => {
                    return Err(format!(
                        "{name} token budget cannot exceed {}",
                        defaults::MAX_TOKENS_LIMIT
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
