use std::path::PathBuf;

use crate::template::Template;

/// Errors from the prompt composer
#[derive(Debug, thiserror::Error)]
pub enum ComposerError {
    /// Keyword was empty after trimming
    #[error("a keyword is required")]
    EmptyKeyword,

    /// System prompt was empty after trimming
    #[error("the system prompt is empty; pick a template or write a custom one")]
    EmptySystemPrompt,

    /// Variation count outside the accepted range
    #[error("prompt count must be between {min} and {max}, got {got}")]
    InvalidCount { got: u32, min: u32, max: u32 },

    /// Template name not recognised
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    /// Attempt to edit a fixed template
    #[error("template '{0}' is read-only; switch to custom to edit")]
    ReadOnlyTemplate(Template),

    /// Invalid dispatcher endpoint
    #[error("invalid dispatcher endpoint: {0}")]
    Endpoint(String),

    /// Dispatcher answered with an error
    #[error("{message}")]
    Dispatcher { status: u16, message: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Persisting or loading custom text failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from a [`crate::PromptStore`]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file is not a JSON object of strings
    #[error("store file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
