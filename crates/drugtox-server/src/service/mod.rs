//! Application state and dependency injection.

mod config;
mod fallback;
mod gateway;
mod orchestrator;
mod prompts;
mod vision;

use drugtox_core::{CompletionService, PredictorService, ServiceHealth};

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::fallback::{FallbackRule, FallbackTable};
pub use crate::service::gateway::AiGateway;
pub use crate::service::orchestrator::{PredictionOrchestrator, PredictionReport};
pub use crate::service::vision::{PARSING_ERROR, UNIDENTIFIED, VisionLabelExtractor, parse_reply};

/// Tracing target for state bootstrap.
const TRACING_TARGET: &str = "drugtox_server::service";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Built once at
/// startup and read-only afterwards.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub config: ServiceConfig,

    // External services:
    pub predictor: Option<PredictorService>,
    pub completion: Option<CompletionService>,

    // Internal services:
    pub gateway: AiGateway,
    pub vision: VisionLabelExtractor,
    pub orchestrator: PredictionOrchestrator,
}

impl ServiceState {
    /// Initializes application state from already constructed collaborators.
    pub fn new(
        config: ServiceConfig,
        predictor: Option<PredictorService>,
        completion: Option<CompletionService>,
    ) -> Self {
        let gateway = AiGateway::new(completion.clone());
        let orchestrator =
            PredictionOrchestrator::new(predictor.clone(), gateway.clone(), config.clone());

        Self {
            vision: VisionLabelExtractor::new(completion.clone()),
            config,
            predictor,
            completion,
            gateway,
            orchestrator,
        }
    }

    /// Initializes application state from construction outcomes.
    ///
    /// A failed collaborator is logged and left absent; the service starts
    /// in degraded mode instead of refusing to start.
    pub fn bootstrap(
        config: ServiceConfig,
        predictor: drugtox_core::Result<PredictorService>,
        completion: drugtox_core::Result<CompletionService>,
    ) -> Self {
        let predictor = predictor
            .inspect_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Toxicity predictor could not be constructed"
                );
            })
            .ok();

        let completion = completion
            .inspect_err(|error| {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "AI service could not be constructed, running with fallback replies"
                );
            })
            .ok();

        let state = Self::new(config, predictor, completion);
        let health = state.health();
        tracing::info!(
            target: TRACING_TARGET,
            predictor_ready = health.predictor_ready,
            ai_ready = health.ai_ready,
            "Service state initialized"
        );

        state
    }

    /// Reports readiness. Performs no I/O.
    pub fn health(&self) -> ServiceHealth {
        ServiceHealth::new(self.predictor.is_some(), self.completion.is_some())
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(config: ServiceConfig);

// Internal services:
impl_di!(gateway: AiGateway);
impl_di!(vision: VisionLabelExtractor);
impl_di!(orchestrator: PredictionOrchestrator);
