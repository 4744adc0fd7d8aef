//! `OpenAI` chat completions translation

use http::header::{AUTHORIZATION, HeaderMap};
use promptsmith_core::ProviderKind;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use super::{OutboundPrompt, WireFormat, credential_header, endpoint_url, json_headers, to_body};
use crate::error::DispatchError;
use crate::protocol::openai::{OpenAiMessage, OpenAiRequest, TEXT_POINTER};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` chat completions format
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiFormat;

impl WireFormat for OpenAiFormat {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn default_base_url(&self) -> &'static str {
        DEFAULT_BASE_URL
    }

    fn endpoint(&self, base: &Url, _model: &str, _api_key: &SecretString) -> Result<Url, DispatchError> {
        endpoint_url(base, &["chat", "completions"])
    }

    fn headers(&self, api_key: &SecretString) -> Result<HeaderMap, DispatchError> {
        let mut headers = json_headers();
        let bearer = format!("Bearer {}", api_key.expose_secret());
        headers.insert(AUTHORIZATION, credential_header(&bearer, ProviderKind::OpenAi)?);
        Ok(headers)
    }

    fn body(&self, prompt: &OutboundPrompt<'_>) -> Result<Value, DispatchError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = prompt.system {
            messages.push(OpenAiMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(OpenAiMessage {
            role: "user",
            content: prompt.user,
        });

        to_body(&OpenAiRequest {
            model: prompt.model,
            messages,
            max_tokens: prompt.max_tokens,
        })
    }

    fn text_pointer(&self) -> &'static str {
        TEXT_POINTER
    }
}
