//! Reqwest-based client for an external toxicity model server.
//!
//! The model server exposes two routes:
//!
//! - `GET /endpoints` returns `{"endpoints": ["NR-AR", ...]}`.
//! - `POST /predict` with `{"smiles": "..."}` returns either
//!   `{"endpoints": {"NR-AR": {"probability", "prediction", "confidence"}}}`
//!   or `{"error": "..."}`.

use std::fmt;
use std::sync::Arc;

use drugtox_core::types::{MoleculeQuery, PredictionResult};
use drugtox_core::{ErrorKind, PredictorService, ToxicityPredictor};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::PredictorConfig;
use crate::error::{Error, Result};
use crate::http;

/// Tracing target for predictor client operations.
pub const TRACING_TARGET: &str = "drugtox_reqwest::predictor";

const SERVICE_NAME: &str = "Predictor";

#[derive(Debug, Deserialize)]
struct EndpointsReply {
    endpoints: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PredictBody<'a> {
    smiles: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictReply {
    Failure { error: String },
    Success(PredictionResult),
}

struct RemotePredictorInner {
    http: Client,
    predict_url: Url,
    endpoints: Vec<String>,
    config: PredictorConfig,
}

/// Toxicity predictor backed by a remote model server.
#[derive(Clone)]
pub struct RemotePredictor {
    inner: Arc<RemotePredictorInner>,
}

impl fmt::Debug for RemotePredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemotePredictor")
            .field("config", &self.inner.config)
            .field("endpoints", &self.inner.endpoints)
            .finish_non_exhaustive()
    }
}

impl RemotePredictor {
    /// Connects to the model server and loads its endpoint list.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::PredictorUnavailable`] when the server cannot be
    /// reached or reports no endpoints, and [`ErrorKind::Configuration`] for
    /// an invalid URL.
    pub async fn connect(config: PredictorConfig) -> drugtox_core::Result<Self> {
        Self::try_connect(config)
            .await
            .map_err(|e| e.into_core(ErrorKind::PredictorUnavailable, SERVICE_NAME))
    }

    async fn try_connect(config: PredictorConfig) -> Result<Self> {
        let http = http::build_client(config.effective_timeout())?;
        let endpoints_url = http::join_url(&config.url, "endpoints")?;
        let predict_url = http::join_url(&config.url, "predict")?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %endpoints_url,
            "Loading predictor endpoints"
        );

        let response = http.get(endpoints_url).send().await?;
        let reply: EndpointsReply = http::ensure_success(response).await?.json().await?;
        if reply.endpoints.is_empty() {
            return Err(Error::EmptyReply);
        }

        tracing::info!(
            target: TRACING_TARGET,
            url = %config.url,
            endpoints = reply.endpoints.len(),
            "Remote predictor connected"
        );

        let inner = RemotePredictorInner {
            http,
            predict_url,
            endpoints: reply.endpoints,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Converts this client into a [`PredictorService`].
    pub fn into_service(self) -> PredictorService {
        PredictorService::new(self)
    }

    async fn request_prediction(&self, smiles: &str) -> Result<PredictReply> {
        let response = self
            .inner
            .http
            .post(self.inner.predict_url.clone())
            .json(&PredictBody { smiles })
            .send()
            .await?;

        // Model servers report bad molecules with a 4xx/5xx and an
        // `{"error"}` body; prefer that message over the bare status.
        let status = response.status();
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<PredictReply>(&bytes) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => Err(Error::Status {
                status,
                message: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            Err(e) => Err(Error::Serde(e)),
        }
    }
}

#[async_trait::async_trait]
impl ToxicityPredictor for RemotePredictor {
    fn endpoints(&self) -> Vec<String> {
        self.inner.endpoints.clone()
    }

    async fn predict(&self, query: &MoleculeQuery) -> drugtox_core::Result<PredictionResult> {
        let reply = self
            .request_prediction(query.as_str())
            .await
            .map_err(|e| e.into_core(ErrorKind::PredictionFailed, SERVICE_NAME))?;

        match reply {
            PredictReply::Success(result) => Ok(result),
            PredictReply::Failure { error } => {
                Err(drugtox_core::Error::prediction_failed().with_message(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn_model_server() -> String {
        let router = Router::new()
            .route(
                "/endpoints",
                get(|| async { axum::Json(json!({ "endpoints": ["NR-AR", "SR-p53"] })) }),
            )
            .route(
                "/predict",
                post(|body: axum::Json<Value>| async move {
                    if body["smiles"] == "invalid" {
                        return (
                            StatusCode::BAD_REQUEST,
                            axum::Json(json!({ "error": "Invalid SMILES: could not parse" })),
                        );
                    }
                    (
                        StatusCode::OK,
                        axum::Json(json!({ "endpoints": {
                            "NR-AR": { "probability": 0.12, "prediction": "Non-toxic", "confidence": 0.76 },
                            "SR-p53": { "probability": 0.83, "prediction": "Toxic", "confidence": 0.66 }
                        }})),
                    )
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn connect_loads_endpoints() {
        let url = spawn_model_server().await;
        let predictor = RemotePredictor::connect(PredictorConfig::new(url))
            .await
            .unwrap();
        assert_eq!(predictor.endpoints(), vec!["NR-AR", "SR-p53"]);
    }

    #[tokio::test]
    async fn predict_parses_scores() {
        let url = spawn_model_server().await;
        let predictor = RemotePredictor::connect(PredictorConfig::new(url))
            .await
            .unwrap();

        let query = MoleculeQuery::parse(Some("CCO")).unwrap();
        let result = predictor.predict(&query).await.unwrap();
        assert_eq!(result.endpoints.len(), 2);
        assert_eq!(result.endpoints["SR-p53"].probability, 0.83);
    }

    #[tokio::test]
    async fn predictor_errors_are_surfaced_verbatim() {
        let url = spawn_model_server().await;
        let predictor = RemotePredictor::connect(PredictorConfig::new(url))
            .await
            .unwrap();

        let query = MoleculeQuery::parse(Some("invalid")).unwrap();
        let error = predictor.predict(&query).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PredictionFailed);
        assert_eq!(error.user_message(), "Invalid SMILES: could not parse");
    }

    #[tokio::test]
    async fn unreachable_server_fails_to_connect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let error = RemotePredictor::connect(PredictorConfig::new(format!("http://{addr}")))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PredictorUnavailable);
    }
}
