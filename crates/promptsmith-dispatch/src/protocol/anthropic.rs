//! Anthropic Messages API wire format

use serde::Serialize;

/// Location of the generated text in a messages response
pub const TEXT_POINTER: &str = "/content/0/text";

/// API version sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages API request
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Maximum tokens to generate (required by Anthropic)
    pub max_tokens: u32,
    /// System prompt (top-level, not in messages)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    /// Conversation messages
    pub messages: Vec<AnthropicMessage<'a>>,
}

/// Anthropic message with plain-text content
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage<'a> {
    /// Always "user" here
    pub role: &'static str,
    /// Message text
    pub content: &'a str,
}
