//! Mock implementations of the drugtox provider traits.
//!
//! These mocks are deterministic and need no network access, which makes
//! them suitable for unit tests, handler tests and local development.

mod completion;
mod predictor;

pub use completion::{MockCompletionProvider, MockReply};
use drugtox_core::{CompletionService, PredictorService};
pub use predictor::{MockPredictor, MockPredictorConfig};

/// Creates a predictor service backed by [`MockPredictor`].
pub fn create_mock_predictor(config: MockPredictorConfig) -> PredictorService {
    PredictorService::new(MockPredictor::new(config))
}

/// Creates a completion service backed by [`MockCompletionProvider`].
pub fn create_mock_completion(reply: impl Into<String>) -> CompletionService {
    CompletionService::new(MockCompletionProvider::replying(reply))
}
