use http::StatusCode;
use promptsmith_core::{HttpError, ProviderKind};
use serde_json::json;
use thiserror::Error;

/// Fields every generation request must carry, in reporting order
pub const REQUIRED_FIELDS: [&str; 4] = ["provider", "model", "apiKey", "userPrompt"];

/// Errors that terminate a dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Method other than `POST` or `OPTIONS`
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Request carried no body
    #[error("request body is required")]
    EmptyBody,

    /// Request body is not valid JSON for a generation request
    #[error("invalid JSON in request body: {0}")]
    InvalidJson(String),

    /// One or more required fields are absent or blank
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Provider name outside the supported set
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Resolved API key cannot be carried in an HTTP header
    #[error("API key for {0} contains characters not allowed in a header")]
    InvalidApiKey(ProviderKind),

    /// Provider answered with a non-success status
    #[error("{provider} returned {status}")]
    Upstream {
        provider: ProviderKind,
        status: StatusCode,
        body: String,
    },

    /// Provider did not answer within the configured timeout
    #[error("request to {0} timed out")]
    Timeout(ProviderKind),

    /// Provider answered 2xx with a body that is not a JSON object
    #[error("unexpected response from {provider}: {details}")]
    ResponseShape {
        provider: ProviderKind,
        details: String,
        raw: serde_json::Value,
    },

    /// Connection-level failure talking to the provider
    #[error("request to {provider} failed: {message}")]
    Transport { provider: ProviderKind, message: String },

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DispatchError {
    /// Provider involved in the failure, when one had been resolved
    pub const fn provider(&self) -> Option<ProviderKind> {
        match self {
            Self::InvalidApiKey(provider) | Self::Timeout(provider) => Some(*provider),
            Self::Upstream { provider, .. } | Self::ResponseShape { provider, .. } | Self::Transport { provider, .. } => {
                Some(*provider)
            }
            _ => None,
        }
    }
}

fn timestamp() -> String {
    jiff::Timestamp::now().to_string()
}

impl HttpError for DispatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::EmptyBody
            | Self::InvalidJson(_)
            | Self::MissingFields(_)
            | Self::UnsupportedProvider(_)
            | Self::InvalidApiKey(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            Self::ResponseShape { .. } | Self::Transport { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::EmptyBody
            | Self::InvalidJson(_)
            | Self::MissingFields(_)
            | Self::UnsupportedProvider(_)
            | Self::InvalidApiKey(_) => "validation_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Timeout(_) => "timeout",
            Self::ResponseShape { .. } => "response_shape_error",
            Self::Transport { .. } | Self::Internal(_) => "internal_error",
        }
    }

    fn response_body(&self) -> serde_json::Value {
        match self {
            Self::MethodNotAllowed => json!({ "error": "Method not allowed" }),
            Self::EmptyBody => json!({ "error": "Request body is required" }),
            Self::InvalidJson(details) => json!({
                "error": "Invalid JSON in request body",
                "details": details,
                "timestamp": timestamp(),
            }),
            Self::MissingFields(missing) => json!({
                "error": "Missing required fields",
                "missing": missing,
                "required": REQUIRED_FIELDS,
            }),
            Self::UnsupportedProvider(_) => json!({
                "error": "Unsupported provider",
                "supportedProviders": ProviderKind::supported_names(),
            }),
            Self::InvalidApiKey(provider) => json!({
                "error": format!("API key for {provider} is not valid"),
                "provider": provider,
            }),
            Self::Upstream { provider, status, body } => json!({
                "error": format!("API Error: {}", status.as_u16()),
                "details": body,
                "provider": provider,
            }),
            Self::Timeout(provider) => json!({
                "error": "Request timeout",
                "details": self.to_string(),
                "provider": provider,
                "timestamp": timestamp(),
            }),
            Self::ResponseShape { details, raw, .. } => json!({
                "error": "Error parsing API response",
                "details": details,
                "rawResponse": raw,
            }),
            // Transport messages come from reqwest and never contain the key
            Self::Transport { .. } | Self::Internal(_) => json!({
                "error": "Internal server error",
                "details": self.to_string(),
                "timestamp": timestamp(),
            }),
        }
    }
}
