//! Client-side prompt composer for promptsmith
//!
//! Builds a system prompt from a named template (or the user's own custom
//! text), wraps a keyword into a request for numbered prompt variations,
//! sends it to the dispatcher, and splits the answer back into items.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod catalog;
pub mod client;
pub mod composer;
pub mod error;
pub mod prompt;
pub mod results;
pub mod store;
pub mod template;

pub use catalog::{default_model, is_known_model, models};
pub use client::DispatcherClient;
pub use composer::Composer;
pub use error::{ComposerError, StoreError};
pub use prompt::{PromptCount, build_user_prompt};
pub use results::{NO_RESULTS_PLACEHOLDER, RenderedResults, parse_results};
pub use store::{FileStore, MemoryStore, PromptStore};
pub use template::{CUSTOM_PLACEHOLDER, CUSTOM_PROMPT_KEY, Template};
