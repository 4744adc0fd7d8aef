//! Google Generative Language API translation

use http::header::HeaderMap;
use promptsmith_core::ProviderKind;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use super::{OutboundPrompt, WireFormat, endpoint_url, json_headers, to_body};
use crate::error::DispatchError;
use crate::protocol::google::{GoogleContent, GoogleGenerationConfig, GooglePart, GoogleRequest, TEXT_POINTER};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google `generateContent` format
///
/// The key travels as the `key` query parameter, never as a header.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleFormat;

impl WireFormat for GoogleFormat {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn default_base_url(&self) -> &'static str {
        DEFAULT_BASE_URL
    }

    fn endpoint(&self, base: &Url, model: &str, api_key: &SecretString) -> Result<Url, DispatchError> {
        let action = format!("{model}:generateContent");
        let mut url = endpoint_url(base, &["models", action.as_str()])?;
        url.query_pairs_mut().append_pair("key", api_key.expose_secret());
        Ok(url)
    }

    fn headers(&self, _api_key: &SecretString) -> Result<HeaderMap, DispatchError> {
        Ok(json_headers())
    }

    fn body(&self, prompt: &OutboundPrompt<'_>) -> Result<Value, DispatchError> {
        to_body(&GoogleRequest {
            contents: vec![GoogleContent {
                parts: vec![GooglePart {
                    text: prompt.combined_text(),
                }],
            }],
            generation_config: GoogleGenerationConfig {
                max_output_tokens: prompt.max_tokens,
            },
        })
    }

    fn text_pointer(&self) -> &'static str {
        TEXT_POINTER
    }
}
