//! Types shared by the promptsmith dispatcher, composer, and server
//!
//! Holds the JSON contract spoken between the composer and the dispatcher
//! plus the closed set of supported providers.

#![allow(clippy::must_use_candidate)]

mod error;
mod provider;
mod wire;

pub use error::HttpError;
pub use provider::{ProviderKind, UnsupportedProvider};
pub use wire::{GenerateRequest, NO_CONTENT_SENTINEL, NormalizedResult};
