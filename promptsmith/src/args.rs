use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use promptsmith_composer::Template;
use promptsmith_core::ProviderKind;

/// Config file read when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "promptsmith.toml";

/// Promptsmith prompt generator
#[derive(Debug, Parser)]
#[command(
    name = "promptsmith",
    about = "Midjourney prompt generator backed by OpenAI, Anthropic, or Google models"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "PROMPTSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. "info", "promptsmith_dispatch=debug")
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Config path and whether the user named it explicitly
    pub fn config_path(&self) -> (&Path, bool) {
        match &self.config {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the provider dispatcher
    Serve {
        /// Override the listen address
        #[arg(long, env = "PROMPTSMITH_LISTEN")]
        listen: Option<SocketAddr>,
    },

    /// Generate prompt variations through a running dispatcher
    Generate(GenerateArgs),

    /// Inspect or edit system prompt templates
    Template {
        /// Key-value store holding the custom template
        #[arg(long, default_value = "promptsmith-store.json", env = "PROMPTSMITH_STORE")]
        store: PathBuf,

        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Idea to build prompts around
    #[arg(short, long)]
    pub keyword: String,

    /// Provider (openai, anthropic, google)
    #[arg(short, long, default_value = "openai")]
    pub provider: ProviderKind,

    /// Model; defaults to the provider's first catalog entry
    #[arg(short, long)]
    pub model: Option<String>,

    /// System prompt template (default, artistic, photography, fantasy, custom)
    #[arg(short, long, default_value = "default")]
    pub template: Template,

    /// Number of variations to request
    #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub count: u32,

    /// Dispatcher endpoint
    #[arg(long, default_value = "http://localhost:8888/api/proxy-api", env = "PROMPTSMITH_ENDPOINT")]
    pub endpoint: String,

    /// Key-value store holding the custom template
    #[arg(long, default_value = "promptsmith-store.json", env = "PROMPTSMITH_STORE")]
    pub store: PathBuf,

    /// Provider key sent to the dispatcher; only honored when it allows client keys
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TemplateAction {
    /// Print a template's system prompt
    Show {
        /// Template name
        name: Template,
    },

    /// Replace the custom system prompt
    SetCustom {
        /// New system prompt text
        text: String,
    },
}
