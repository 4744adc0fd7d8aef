//! Anthropic Messages API translation

use http::header::{HeaderMap, HeaderName, HeaderValue};
use promptsmith_core::ProviderKind;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use super::{OutboundPrompt, WireFormat, credential_header, endpoint_url, json_headers, to_body};
use crate::error::DispatchError;
use crate::protocol::anthropic::{ANTHROPIC_VERSION, AnthropicMessage, AnthropicRequest, TEXT_POINTER};

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic Messages format
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicFormat;

impl WireFormat for AnthropicFormat {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn default_base_url(&self) -> &'static str {
        DEFAULT_BASE_URL
    }

    fn endpoint(&self, base: &Url, _model: &str, _api_key: &SecretString) -> Result<Url, DispatchError> {
        endpoint_url(base, &["messages"])
    }

    fn headers(&self, api_key: &SecretString) -> Result<HeaderMap, DispatchError> {
        let mut headers = json_headers();
        headers.insert(
            HeaderName::from_static("x-api-key"),
            credential_header(api_key.expose_secret(), ProviderKind::Anthropic)?,
        );
        headers.insert(
            HeaderName::from_static("anthropic-version"),
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }

    fn body(&self, prompt: &OutboundPrompt<'_>) -> Result<Value, DispatchError> {
        to_body(&AnthropicRequest {
            model: prompt.model,
            max_tokens: prompt.max_tokens,
            system: prompt.system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt.user,
            }],
        })
    }

    fn text_pointer(&self) -> &'static str {
        TEXT_POINTER
    }
}
