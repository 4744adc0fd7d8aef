//! Per-provider translation between the generic request and each wire format

pub mod anthropic;
pub mod google;
pub mod openai;

use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use promptsmith_core::ProviderKind;
use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use crate::error::DispatchError;

pub use anthropic::AnthropicFormat;
pub use google::GoogleFormat;
pub use openai::OpenAiFormat;

/// Provider-agnostic view of what gets sent upstream
#[derive(Debug, Clone, Copy)]
pub struct OutboundPrompt<'a> {
    /// Provider model identifier
    pub model: &'a str,
    /// System prompt; `None` when the caller sent none or a blank one
    pub system: Option<&'a str>,
    /// User prompt
    pub user: &'a str,
    /// Output token cap
    pub max_tokens: u32,
}

impl OutboundPrompt<'_> {
    /// System and user prompt joined by a blank line, for providers with a single text part
    pub fn combined_text(&self) -> String {
        match self.system {
            Some(system) => format!("{system}\n\n{}", self.user),
            None => self.user.to_owned(),
        }
    }
}

/// Endpoint, header, body, and extraction rules for one provider
pub trait WireFormat: Send + Sync {
    /// Provider this format speaks for
    fn provider(&self) -> ProviderKind;

    /// Base URL used when configuration has no override
    fn default_base_url(&self) -> &'static str;

    /// Full request URL
    fn endpoint(&self, base: &Url, model: &str, api_key: &SecretString) -> Result<Url, DispatchError>;

    /// Request headers, credentials included
    fn headers(&self, api_key: &SecretString) -> Result<HeaderMap, DispatchError>;

    /// JSON request body
    fn body(&self, prompt: &OutboundPrompt<'_>) -> Result<Value, DispatchError>;

    /// JSON pointer to the generated text in a success response
    fn text_pointer(&self) -> &'static str;

    /// Pull the generated text out of a success response
    ///
    /// `None` when the field path is absent or not a string.
    fn extract(&self, response: &Value) -> Option<String> {
        response
            .pointer(self.text_pointer())
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

/// Wire format for a provider
pub fn wire_format(kind: ProviderKind) -> &'static dyn WireFormat {
    match kind {
        ProviderKind::OpenAi => &OpenAiFormat,
        ProviderKind::Anthropic => &AnthropicFormat,
        ProviderKind::Google => &GoogleFormat,
    }
}

/// Append path segments to a base URL
fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, DispatchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| DispatchError::Internal(anyhow::anyhow!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Headers shared by every provider
fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Header value holding a credential, marked sensitive so it never shows in debug output
fn credential_header(value: &str, provider: ProviderKind) -> Result<HeaderValue, DispatchError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| DispatchError::InvalidApiKey(provider))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Serialize a typed wire body
fn to_body<T: serde::Serialize>(body: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(body).map_err(|e| DispatchError::Internal(e.into()))
}
