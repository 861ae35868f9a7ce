//! Prediction flow: validate, predict once, summarize, narrate.

use jiff::Timestamp;

use drugtox_core::types::{
    AnalysisNarrative, EndpointPrediction, MoleculeQuery, PredictionResult, PredictionSummary,
};
use drugtox_core::{Error, PredictorService, Result};

use super::{AiGateway, ServiceConfig};

/// Tracing target for prediction orchestration.
const TRACING_TARGET: &str = "drugtox_server::service::orchestrator";

/// Everything one prediction request produced.
#[derive(Debug, Clone)]
pub struct PredictionReport {
    /// The validated descriptor.
    pub query: MoleculeQuery,
    /// Raw per-endpoint scores as returned by the predictor.
    pub result: PredictionResult,
    /// Scores reshaped into endpoint predictions, ordered by id.
    pub predictions: Vec<EndpointPrediction>,
    pub summary: PredictionSummary,
    /// Absent when narratives are disabled.
    pub narrative: Option<AnalysisNarrative>,
    pub completed_at: Timestamp,
}

/// Runs predictions against the predictor and attaches AI narratives.
#[derive(Debug, Clone)]
pub struct PredictionOrchestrator {
    predictor: Option<PredictorService>,
    gateway: AiGateway,
    config: ServiceConfig,
}

impl PredictionOrchestrator {
    /// Creates an orchestrator.
    pub fn new(
        predictor: Option<PredictorService>,
        gateway: AiGateway,
        config: ServiceConfig,
    ) -> Self {
        Self {
            predictor,
            gateway,
            config,
        }
    }

    /// Returns whether a predictor was constructed.
    pub fn is_ready(&self) -> bool {
        self.predictor.is_some()
    }

    /// Returns the predictor, or [`ErrorKind::PredictorUnavailable`].
    ///
    /// [`ErrorKind::PredictorUnavailable`]: drugtox_core::ErrorKind::PredictorUnavailable
    pub fn predictor(&self) -> Result<&PredictorService> {
        self.predictor
            .as_ref()
            .ok_or_else(Error::predictor_unavailable)
    }

    /// Lists the endpoint ids the predictor scores.
    pub fn endpoints(&self) -> Result<Vec<String>> {
        Ok(self.predictor()?.endpoints())
    }

    /// Scores one descriptor.
    ///
    /// The descriptor is validated before the predictor is consulted, and
    /// the predictor is called exactly once. The narrative is best effort
    /// and never fails the request.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidInput`] for a missing or blank descriptor.
    /// - [`ErrorKind::PredictorUnavailable`] when no predictor exists.
    /// - [`ErrorKind::PredictionFailed`] with the predictor's own message.
    ///
    /// [`ErrorKind::InvalidInput`]: drugtox_core::ErrorKind::InvalidInput
    /// [`ErrorKind::PredictorUnavailable`]: drugtox_core::ErrorKind::PredictorUnavailable
    /// [`ErrorKind::PredictionFailed`]: drugtox_core::ErrorKind::PredictionFailed
    #[tracing::instrument(skip_all)]
    pub async fn predict(&self, smiles: Option<&str>) -> Result<PredictionReport> {
        let query = MoleculeQuery::parse(smiles)?;
        let predictor = self.predictor()?;

        if self.config.verbose_request_logging {
            tracing::info!(target: TRACING_TARGET, smiles = %query, "Prediction requested");
        }

        let result = predictor.predict(&query).await?;
        let predictions = result.to_endpoint_predictions();
        let summary = PredictionSummary::from_predictions(&predictions);

        tracing::debug!(
            target: TRACING_TARGET,
            endpoints = summary.total_endpoints,
            toxic = summary.toxic_endpoints,
            assessment = summary.overall_assessment.label(),
            "Prediction summarized"
        );

        let narrative = if self.config.include_ai_analysis {
            let narrative = self
                .gateway
                .analyze_molecule(
                    query.as_str(),
                    &predictions,
                    &summary,
                    self.config.analysis_max_tokens,
                )
                .await;

            if self.config.verbose_request_logging {
                tracing::info!(
                    target: TRACING_TARGET,
                    source = ?narrative.source,
                    "Narrative attached"
                );
            }

            Some(narrative)
        } else {
            None
        };

        Ok(PredictionReport {
            query,
            result,
            predictions,
            summary,
            narrative,
            completed_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use drugtox_core::ErrorKind;
    use drugtox_core::types::{NarrativeSource, TOX21_ENDPOINTS};
    use drugtox_test::{MockCompletionProvider, MockPredictor};

    use super::*;

    fn orchestrator(predictor: MockPredictor, config: ServiceConfig) -> PredictionOrchestrator {
        PredictionOrchestrator::new(
            Some(PredictorService::new(predictor)),
            AiGateway::unavailable(),
            config,
        )
    }

    #[tokio::test]
    async fn endpoint_keys_match_predictor() -> anyhow::Result<()> {
        let predictor = MockPredictor::default().with_endpoints(["NR-AR", "SR-p53", "SR-MMP"]);
        let report = orchestrator(predictor, ServiceConfig::default())
            .predict(Some("CCO"))
            .await?;

        let keys: Vec<_> = report.result.endpoints.keys().cloned().collect();
        assert_eq!(keys, ["NR-AR", "SR-MMP", "SR-p53"]);
        assert_eq!(report.summary.total_endpoints, 3);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_predictions_agree() -> anyhow::Result<()> {
        let orchestrator = orchestrator(MockPredictor::default(), ServiceConfig::default());

        let first = orchestrator.predict(Some("CCO")).await?;
        let second = orchestrator.predict(Some("CCO")).await?;

        assert_eq!(first.result, second.result);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.result.endpoints.len(), TOX21_ENDPOINTS.len());
        Ok(())
    }

    #[tokio::test]
    async fn blank_descriptor_is_rejected_before_predicting() {
        let predictor = MockPredictor::default();
        let orchestrator = orchestrator(predictor.clone(), ServiceConfig::default());

        for smiles in [None, Some(""), Some("   ")] {
            let error = orchestrator.predict(smiles).await.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidInput);
        }
        assert_eq!(predictor.calls(), 0);
    }

    #[tokio::test]
    async fn input_is_validated_before_predictor_presence() {
        let orchestrator =
            PredictionOrchestrator::new(None, AiGateway::unavailable(), ServiceConfig::default());

        let error = orchestrator.predict(Some("")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);

        let error = orchestrator.predict(Some("CCO")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PredictorUnavailable);
    }

    #[tokio::test]
    async fn predictor_failure_is_surfaced_verbatim() {
        let predictor = MockPredictor::failing("Invalid SMILES: unclosed ring");
        let orchestrator = orchestrator(predictor.clone(), ServiceConfig::default());

        let error = orchestrator.predict(Some("C1CC")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PredictionFailed);
        assert_eq!(error.user_message(), "Invalid SMILES: unclosed ring");
        assert_eq!(predictor.calls(), 1);
    }

    #[tokio::test]
    async fn narrative_falls_back_without_failing() -> anyhow::Result<()> {
        let report = orchestrator(MockPredictor::default(), ServiceConfig::default())
            .predict(Some("CCO"))
            .await?;

        let narrative = report.narrative.expect("narrative is enabled by default");
        assert_eq!(narrative.source, NarrativeSource::Fallback);
        Ok(())
    }

    #[tokio::test]
    async fn narrative_comes_from_model_when_available() -> anyhow::Result<()> {
        let provider = MockCompletionProvider::replying("Low concern overall.");
        let orchestrator = PredictionOrchestrator::new(
            Some(PredictorService::new(MockPredictor::default())),
            AiGateway::new(Some(drugtox_core::CompletionService::new(provider.clone()))),
            ServiceConfig::default(),
        );

        let report = orchestrator.predict(Some("CCO")).await?;
        let narrative = report.narrative.expect("narrative is enabled by default");
        assert!(narrative.is_model());
        assert_eq!(provider.chat_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn narrative_can_be_disabled() -> anyhow::Result<()> {
        let config = ServiceConfig::builder()
            .with_include_ai_analysis(false)
            .build()?;
        let report = orchestrator(MockPredictor::default(), config)
            .predict(Some("CCO"))
            .await?;

        assert!(report.narrative.is_none());
        Ok(())
    }
}
