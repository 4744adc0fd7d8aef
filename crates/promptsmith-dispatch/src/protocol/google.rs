//! Google Generative Language API wire format

use serde::Serialize;

/// Location of the generated text in a `generateContent` response
pub const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// `generateContent` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest {
    /// Conversation contents
    pub contents: Vec<GoogleContent>,
    /// Generation configuration
    pub generation_config: GoogleGenerationConfig,
}

/// Content object
#[derive(Debug, Clone, Serialize)]
pub struct GoogleContent {
    /// Content parts
    pub parts: Vec<GooglePart>,
}

/// Text part
#[derive(Debug, Clone, Serialize)]
pub struct GooglePart {
    /// The text string
    pub text: String,
}

/// Generation configuration parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    /// Maximum output tokens
    pub max_output_tokens: u32,
}
