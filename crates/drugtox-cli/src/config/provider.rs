//! Service provider configuration.

use drugtox_core::{CompletionService, PredictorService};
use drugtox_reqwest::GroqClient;

use super::Cli;

/// Creates the completion service from the Groq configuration.
///
/// A missing API key is not fatal: the error is handed to the service state,
/// which logs it and serves every AI feature from the fallback tables.
pub fn create_completion_service(cli: &Cli) -> drugtox_core::Result<CompletionService> {
    GroqClient::new(cli.groq.clone()).map(GroqClient::into_service)
}

/// Connects to the remote toxicity predictor.
///
/// # Errors
///
/// Returns an error if the predictor cannot be reached or reports no
/// endpoints. The server refuses to start without one.
#[cfg(not(feature = "mock"))]
pub async fn create_predictor_service(cli: &Cli) -> anyhow::Result<PredictorService> {
    use anyhow::Context;
    use drugtox_reqwest::RemotePredictor;

    let predictor = RemotePredictor::connect(cli.predictor.clone())
        .await
        .with_context(|| format!("failed to connect to predictor at {}", cli.predictor.url))?;
    Ok(predictor.into_service())
}

/// Creates a deterministic in-process predictor.
#[cfg(feature = "mock")]
pub async fn create_predictor_service(cli: &Cli) -> anyhow::Result<PredictorService> {
    Ok(drugtox_test::create_mock_predictor(cli.mock.clone()))
}
