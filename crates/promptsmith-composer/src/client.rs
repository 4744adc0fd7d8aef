use promptsmith_core::{GenerateRequest, NormalizedResult};
use url::Url;

use crate::error::ComposerError;

/// Message surfaced when an error response carries no `error` field
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Typed client for the dispatcher endpoint
#[derive(Debug, Clone)]
pub struct DispatcherClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl DispatcherClient {
    /// Client posting to `endpoint` (e.g. `http://localhost:8888/api/proxy-api`)
    pub fn new(endpoint: &str) -> Result<Self, ComposerError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ComposerError::Endpoint(format!("{endpoint}: {e}")))?;

        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    /// Use a preconfigured HTTP client (timeouts, proxies)
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post one generation request
    pub async fn generate(&self, request: &GenerateRequest) -> Result<NormalizedResult, ComposerError> {
        let response = self.http.post(self.endpoint.clone()).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "dispatcher returned error");
            return Err(ComposerError::Dispatcher {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response.json().await.map_err(Into::into)
    }
}

/// The `error` field of an error body, or [`UNKNOWN_ERROR`]
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_owned())
}
