use std::time::Duration;

use promptsmith_core::ProviderKind;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default outbound token cap
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default upstream timeout
pub const DEFAULT_TIMEOUT: &str = "20s";

/// Provider dispatch configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Upstream request timeout (e.g. "20s", "1m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Token cap applied when a provider has no override
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Accept an `apiKey` field from the caller in place of the server key
    #[serde(default)]
    pub allow_client_keys: bool,
    /// Per-provider overrides
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            max_tokens: DEFAULT_MAX_TOKENS,
            allow_client_keys: false,
            providers: ProvidersConfig::default(),
        }
    }
}

impl DispatchConfig {
    /// Parse the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is malformed or zero
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        let timeout = duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid dispatch.timeout '{}': {e}", self.timeout))?;

        if timeout.is_zero() {
            anyhow::bail!("dispatch.timeout must be greater than zero");
        }

        Ok(timeout)
    }

    /// Override block for a provider, if any
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        match kind {
            ProviderKind::OpenAi => self.providers.openai.as_ref(),
            ProviderKind::Anthropic => self.providers.anthropic.as_ref(),
            ProviderKind::Google => self.providers.google.as_ref(),
        }
    }

    /// Token cap for a provider, falling back to the global value
    pub fn max_tokens_for(&self, kind: ProviderKind) -> u32 {
        self.provider(kind)
            .and_then(|p| p.max_tokens)
            .unwrap_or(self.max_tokens)
    }
}

/// Provider override blocks, one optional table per supported provider
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: Option<ProviderConfig>,
    #[serde(default, alias = "claude")]
    pub anthropic: Option<ProviderConfig>,
    #[serde(default, alias = "gemini")]
    pub google: Option<ProviderConfig>,
}

/// Overrides for a single provider
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Server-held API key; the provider's environment variable is used when absent
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (e.g. a compatible gateway or a test double)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Token cap override
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.timeout().unwrap(), Duration::from_secs(20));
        assert_eq!(config.max_tokens, 1000);
        assert!(!config.allow_client_keys);
        assert_eq!(config.max_tokens_for(ProviderKind::Google), 1000);
    }

    #[test]
    fn deserialize_provider_overrides() {
        let toml = r#"
            timeout = "45s"
            max_tokens = 2048

            [providers.openai]
            api_key = "sk-test"
            base_url = "http://localhost:9000/v1"

            [providers.gemini]
            max_tokens = 4096
        "#;

        let config: DispatchConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.timeout().unwrap(), Duration::from_secs(45));

        let openai = config.provider(ProviderKind::OpenAi).unwrap();
        assert_eq!(openai.api_key.as_ref().unwrap().expose_secret(), "sk-test");
        assert_eq!(openai.base_url.as_ref().unwrap().as_str(), "http://localhost:9000/v1");

        assert_eq!(config.max_tokens_for(ProviderKind::Google), 4096);
        assert_eq!(config.max_tokens_for(ProviderKind::Anthropic), 2048);
    }

    #[test]
    fn rejects_unknown_provider_key() {
        let toml = r#"
            [providers.mistral]
            max_tokens = 10
        "#;

        assert!(toml::from_str::<DispatchConfig>(toml).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = DispatchConfig {
            timeout: "0s".to_owned(),
            ..DispatchConfig::default()
        };
        assert!(config.timeout().is_err());
    }
}
