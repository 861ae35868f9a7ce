//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::{Client, Response};
use url::Url;

use crate::error::{Error, Result};

/// Returns the User-Agent sent with every request.
pub(crate) fn user_agent() -> String {
    format!("drugtox/{}", env!("CARGO_PKG_VERSION"))
}

/// Builds a client with the given overall timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent())
        .build()
        .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))
}

/// Joins `path` onto `base`, tolerating a trailing slash on the base.
pub(crate) fn join_url(base: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| Error::Config(format!("invalid URL {joined:?}: {e}")))
}

/// Turns a non-success response into [`Error::Status`], keeping the body
/// text for logs.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(Error::Status { status, message })
}
