#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod dispatch;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use dispatch::*;
pub use health::*;
pub use server::*;
pub use telemetry::*;

/// Top-level promptsmith configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Provider dispatch configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
