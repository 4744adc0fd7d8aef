//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use promptsmith_config::{Config, CorsConfig, ProviderConfig};
use promptsmith_core::ProviderKind;
use secrecy::SecretString;

/// Key the builder configures for `provider`
pub fn test_key(provider: ProviderKind) -> String {
    format!("test-key-{provider}")
}

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        Self { config }
    }

    /// Point a provider at a mock backend and give it a server-held key
    pub fn with_provider(mut self, provider: ProviderKind, base_url: &str) -> Self {
        let block = ProviderConfig {
            api_key: Some(SecretString::from(test_key(provider))),
            base_url: Some(base_url.parse().expect("valid URL")),
            max_tokens: None,
        };

        let providers = &mut self.config.dispatch.providers;
        match provider {
            ProviderKind::OpenAi => providers.openai = Some(block),
            ProviderKind::Anthropic => providers.anthropic = Some(block),
            ProviderKind::Google => providers.google = Some(block),
        }
        self
    }

    /// Point a provider at a mock backend without giving it a key
    pub fn with_keyless_provider(mut self, provider: ProviderKind, base_url: &str) -> Self {
        self = self.with_provider(provider, base_url);
        let providers = &mut self.config.dispatch.providers;
        let block = match provider {
            ProviderKind::OpenAi => providers.openai.as_mut(),
            ProviderKind::Anthropic => providers.anthropic.as_mut(),
            ProviderKind::Google => providers.google.as_mut(),
        };
        if let Some(block) = block {
            block.api_key = None;
        }
        self
    }

    /// Set the upstream timeout (e.g. "200ms")
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        timeout.clone_into(&mut self.config.dispatch.timeout);
        self
    }

    /// Set the global token cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.dispatch.max_tokens = max_tokens;
        self
    }

    /// Honor caller-supplied `apiKey` fields
    pub fn allow_client_keys(mut self) -> Self {
        self.config.dispatch.allow_client_keys = true;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
