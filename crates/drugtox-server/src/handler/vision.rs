//! Medicine label analysis handlers.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use super::response::LabelAnalysis;
use crate::extract::{Json, Multipart};
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, VisionLabelExtractor};

/// Tracing target for vision operations.
const TRACING_TARGET: &str = "drugtox_server::handler::vision";

/// Multipart field carrying the label image.
const IMAGE_FIELD: &str = "image";

/// Name reported when the upload carries no file name.
const UNNAMED_IMAGE: &str = "upload";

/// Extracts ingredient data from an uploaded label photograph.
#[tracing::instrument(skip_all)]
async fn analyze_label(
    State(extractor): State<VisionLabelExtractor>,
    Multipart(mut multipart): Multipart,
) -> Result<Json<LabelAnalysis>> {
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        tracing::warn!(target: TRACING_TARGET, error = %err, "Failed to read multipart field");
        ErrorKind::BadRequest
            .with_message("Invalid multipart data")
            .with_context(format!("Failed to parse multipart form: {err}"))
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            tracing::debug!(target: TRACING_TARGET, field = ?field.name(), "Skipping field");
            continue;
        }

        let image_name = field.file_name().unwrap_or(UNNAMED_IMAGE).to_owned();
        let bytes = field.bytes().await.map_err(|err| {
            ErrorKind::BadRequest
                .with_message("Failed to read image data")
                .with_context(format!("Could not read '{image_name}': {err}"))
        })?;

        image = Some((image_name, bytes));
        break;
    }

    let Some((image_name, bytes)) = image else {
        return Err(ErrorKind::BadRequest
            .with_message("No image file provided")
            .with_context("Send the label photograph in a multipart field named 'image'"));
    };

    tracing::debug!(
        target: TRACING_TARGET,
        image_name = %image_name,
        bytes = bytes.len(),
        "Label image received"
    );

    let analysis = extractor.extract(&bytes, &image_name).await?;

    tracing::info!(
        target: TRACING_TARGET,
        image_name = %image_name,
        primary_ingredient = %analysis.primary_ingredient,
        confidence = analysis.confidence.as_ref(),
        "Label analyzed"
    );

    Ok(Json(LabelAnalysis::new(image_name, analysis)))
}

/// Returns a [`Router`] with all vision routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/api/vision/analyze", post(analyze_label))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use drugtox_core::CompletionService;
    use drugtox_core::types::Confidence;
    use drugtox_test::{MockCompletionProvider, MockPredictor, MockReply};
    use serde_json::Value;

    use super::*;
    use crate::handler::test::{create_degraded_test_server, create_test_server_with_state};
    use crate::service::{ServiceConfig, UNIDENTIFIED};

    fn state_with_vision(reply: MockReply) -> ServiceState {
        let provider = MockCompletionProvider::replying("chat").with_vision_reply(reply);
        ServiceState::new(
            ServiceConfig::default(),
            Some(drugtox_core::PredictorService::new(MockPredictor::default())),
            Some(CompletionService::new(provider)),
        )
    }

    fn label_form(bytes: &'static [u8]) -> MultipartForm {
        let part = Part::bytes(bytes)
            .file_name("label.png")
            .mime_type("image/png");
        MultipartForm::new().add_part(IMAGE_FIELD, part)
    }

    #[tokio::test]
    async fn label_is_analyzed() -> anyhow::Result<()> {
        let reply = "{\"primary_ingredient\": \"Ibuprofen\", \"quantities\": [\"200 mg\"], \
                     \"confidence\": \"medium\"}";
        let state = state_with_vision(MockReply::Text(reply.to_owned()));
        let server = create_test_server_with_state(routes(), state)?;

        let response = server
            .post("/api/vision/analyze")
            .multipart(label_form(b"\x89PNG\r\n"))
            .await;
        response.assert_status_ok();

        let analysis = response.json::<LabelAnalysis>();
        assert!(analysis.success);
        assert_eq!(analysis.image_name, "label.png");
        assert_eq!(analysis.analysis.primary_ingredient, "Ibuprofen");
        assert_eq!(analysis.analysis.confidence, Confidence::Medium);
        assert_eq!(analysis.raw_response, reply);
        Ok(())
    }

    #[tokio::test]
    async fn unstructured_reply_degrades() -> anyhow::Result<()> {
        let state = state_with_vision(MockReply::Text("The label is blurry.".to_owned()));
        let server = create_test_server_with_state(routes(), state)?;

        let analysis = server
            .post("/api/vision/analyze")
            .multipart(label_form(b"\xff\xd8\xff"))
            .await
            .json::<LabelAnalysis>();

        assert_eq!(analysis.analysis.primary_ingredient, UNIDENTIFIED);
        assert_eq!(analysis.analysis.confidence, Confidence::Low);
        assert_eq!(analysis.analysis.raw_text, "The label is blurry.");
        Ok(())
    }

    #[tokio::test]
    async fn missing_image_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_state(routes(), state_with_vision(MockReply::Unavailable))?;

        let form = MultipartForm::new().add_text("note", "no image here");
        let response = server.post("/api/vision/analyze").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "No image file provided");
        Ok(())
    }

    #[tokio::test]
    async fn empty_image_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_state(routes(), state_with_vision(MockReply::Unavailable))?;

        let response = server
            .post("/api/vision/analyze")
            .multipart(label_form(b""))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "invalid_input");
        Ok(())
    }

    #[tokio::test]
    async fn vision_failure_is_unavailable() -> anyhow::Result<()> {
        let server = create_test_server_with_state(routes(), state_with_vision(MockReply::Unavailable))?;

        let response = server
            .post("/api/vision/analyze")
            .multipart(label_form(b"\x89PNG"))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["kind"], "vision_unavailable");
        Ok(())
    }

    #[tokio::test]
    async fn missing_client_is_unavailable() -> anyhow::Result<()> {
        let server = create_degraded_test_server()?;

        let response = server
            .post("/api/vision/analyze")
            .multipart(label_form(b"\x89PNG"))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        Ok(())
    }
}
