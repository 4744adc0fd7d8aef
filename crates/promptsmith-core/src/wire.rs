use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProviderKind;

/// Placeholder returned when the provider response lacks the expected text field
pub const NO_CONTENT_SENTINEL: &str = "No content received";

/// Body of a `POST` to the dispatcher
///
/// Every field is optional on the wire so the dispatcher can report all
/// missing fields at once instead of failing on the first.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Provider name (`openai`, `anthropic`, `google`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Provider model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// System prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// User prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
    /// Older name for the user prompt, read only when `userPrompt` is blank
    #[serde(default, skip_serializing)]
    pub user_keyword: Option<String>,
    /// Caller-supplied provider key, honored only when the server allows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl fmt::Debug for GenerateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateRequest")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("user_prompt", &self.user_prompt)
            .field("user_keyword", &self.user_keyword)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Successful dispatcher response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Generated text, or [`NO_CONTENT_SENTINEL`]
    pub result: String,
    /// Provider that produced the text
    pub provider: ProviderKind,
    /// Model that produced the text
    pub model: String,
}
