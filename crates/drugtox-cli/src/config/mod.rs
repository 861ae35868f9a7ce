//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, request timeout
//! ├── service: ServiceConfig        # AI narrative, token budgets, logging
//! ├── groq: GroqConfig              # Completion API credentials and models
//! └── predictor: PredictorConfig    # Remote model server
//! ```
//!
//! With the `mock` feature the predictor group is replaced by
//! `MockPredictorConfig`. Every option can be set through a CLI argument
//! or an environment variable; use `--help` to list them.
//!
//! ```bash
//! GROQ_API_KEY=... PREDICTOR_URL=http://127.0.0.1:5001 drugtox --port 8080
//! ```

mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use drugtox_reqwest::GroqConfig;
use drugtox_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
pub use provider::{create_completion_service, create_predictor_service};
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "drugtox")]
#[command(about = "Molecular toxicity prediction server with AI analysis")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Request handling behavior.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Completion API configuration.
    #[clap(flatten)]
    pub groq: GroqConfig,

    /// Remote predictor configuration.
    #[cfg(not(feature = "mock"))]
    #[clap(flatten)]
    pub predictor: drugtox_reqwest::PredictorConfig,

    /// Mock predictor configuration.
    #[cfg(feature = "mock")]
    #[clap(flatten)]
    pub mock: drugtox_test::MockPredictorConfig,
}

impl Cli {
    /// Loads the `.env` file (if enabled) and parses CLI arguments.
    ///
    /// The file is loaded first so clap picks its values up as environment
    /// defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, defaulting to `info`.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;

        if self.middleware.recovery.request_timeout <= self.groq.vision_timeout_secs {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                request_timeout_secs = self.middleware.recovery.request_timeout,
                vision_timeout_secs = self.groq.vision_timeout_secs,
                "Request timeout does not exceed the vision timeout, label analysis may be cut off"
            );
        }

        Ok(())
    }

    /// Logs configuration at info level. Credentials are never logged.
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            include_ai_analysis = self.service.include_ai_analysis,
            verbose_request_logging = self.service.verbose_request_logging,
            analysis_max_tokens = self.service.analysis_max_tokens,
            chat_max_tokens = self.service.chat_max_tokens,
            "Service configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            chat_model = %self.groq.chat_model,
            vision_model = %self.groq.vision_model,
            api_key_present = self.groq.api_key().is_some(),
            "Completion configuration"
        );

        #[cfg(not(feature = "mock"))]
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            url = %self.predictor.url,
            timeout_secs = self.predictor.timeout_secs,
            "Predictor configuration"
        );

        #[cfg(feature = "mock")]
        tracing::warn!(
            target: TRACING_TARGET_CONFIG,
            toxic_threshold = self.mock.toxic_threshold,
            "Serving predictions from the mock predictor"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "dotenv").then_some("dotenv"),
            cfg!(feature = "mock").then_some("mock"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
