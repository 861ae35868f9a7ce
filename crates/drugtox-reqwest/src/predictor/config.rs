//! Configuration for the remote predictor client.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default predictor base URL.
pub const DEFAULT_PREDICTOR_URL: &str = "http://127.0.0.1:5001";

/// Default timeout for predictor requests: 30 seconds.
pub const DEFAULT_PREDICTOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the remote toxicity predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct PredictorConfig {
    /// Base URL of the predictor model server.
    #[cfg_attr(
        feature = "config",
        arg(id = "predictor_url", long = "predictor-url", env = "PREDICTOR_URL", default_value = DEFAULT_PREDICTOR_URL)
    )]
    pub url: String,

    /// Timeout in seconds for predictor requests.
    #[cfg_attr(
        feature = "config",
        arg(id = "predictor_timeout", long = "predictor-timeout", env = "PREDICTOR_TIMEOUT", default_value_t = 30)
    )]
    pub timeout_secs: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PREDICTOR_URL.to_owned(),
            timeout_secs: DEFAULT_PREDICTOR_TIMEOUT.as_secs(),
        }
    }
}

impl PredictorConfig {
    /// Creates a configuration pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => DEFAULT_PREDICTOR_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }
}
