//! Provider dispatcher for promptsmith
//!
//! Translates a provider-agnostic generation request into the wire format
//! of one of three upstream LLM APIs (`OpenAI` chat completions, Anthropic
//! messages, Google `generateContent`), performs a single bounded call, and
//! extracts the generated text from the response.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod dispatcher;
pub mod error;
#[cfg(feature = "http")]
pub mod handler;
pub mod keys;
pub mod protocol;
pub mod provider;
pub mod request;

pub use dispatcher::{Dispatcher, ProviderCallSpec};
pub use error::DispatchError;
#[cfg(feature = "http")]
pub use handler::dispatch_router;
pub use keys::{ChainedKeySource, EnvKeySource, KeySource, StaticKeySource};
pub use provider::{OutboundPrompt, WireFormat, wire_format};
pub use request::GenerationRequest;
