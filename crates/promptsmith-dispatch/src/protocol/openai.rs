//! `OpenAI` chat completions wire format

use serde::Serialize;

/// Location of the generated text in a chat completion response
pub const TEXT_POINTER: &str = "/choices/0/message/content";

/// Chat completions request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Conversation, optional system message first
    pub messages: Vec<OpenAiMessage<'a>>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Chat message
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiMessage<'a> {
    /// "system" or "user"
    pub role: &'static str,
    /// Message text
    pub content: &'a str,
}
