//! Read-only sources of provider API keys
//!
//! The dispatcher never caches a key: every request asks its source again,
//! so rotating an environment variable takes effect on the next call.

use std::collections::HashMap;
use std::sync::Arc;

use promptsmith_config::DispatchConfig;
use promptsmith_core::ProviderKind;
use secrecy::{ExposeSecret, SecretString};

/// Supplies the server-held key for a provider
pub trait KeySource: Send + Sync {
    /// Key for `provider`, or `None` when none is configured
    fn api_key(&self, provider: ProviderKind) -> Option<SecretString>;
}

/// Reads `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, and `GOOGLE_API_KEY` on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvKeySource;

impl KeySource for EnvKeySource {
    fn api_key(&self, provider: ProviderKind) -> Option<SecretString> {
        std::env::var(provider.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
    }
}

/// Fixed keys, typically from the configuration file
#[derive(Default)]
pub struct StaticKeySource {
    keys: HashMap<ProviderKind, SecretString>,
}

impl StaticKeySource {
    /// Empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the key for a provider
    #[must_use]
    pub fn with_key(mut self, provider: ProviderKind, key: impl Into<SecretString>) -> Self {
        self.keys.insert(provider, key.into());
        self
    }

    /// Collect the `api_key` entries of each provider block
    pub fn from_config(config: &DispatchConfig) -> Self {
        let keys = ProviderKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let key = config.provider(kind)?.api_key.as_ref()?;
                (!key.expose_secret().trim().is_empty()).then(|| (kind, key.clone()))
            })
            .collect();

        Self { keys }
    }
}

impl KeySource for StaticKeySource {
    fn api_key(&self, provider: ProviderKind) -> Option<SecretString> {
        self.keys.get(&provider).cloned()
    }
}

impl std::fmt::Debug for StaticKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers: Vec<_> = self.keys.keys().map(|p| p.as_str()).collect();
        providers.sort_unstable();
        f.debug_struct("StaticKeySource").field("providers", &providers).finish()
    }
}

/// Consults each source in order and returns the first key found
#[derive(Clone, Default)]
pub struct ChainedKeySource {
    sources: Vec<Arc<dyn KeySource>>,
}

impl ChainedKeySource {
    /// Empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower precedence than those already present
    #[must_use]
    pub fn then(mut self, source: impl KeySource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Configuration file keys first, then the process environment
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new().then(StaticKeySource::from_config(config)).then(EnvKeySource)
    }
}

impl KeySource for ChainedKeySource {
    fn api_key(&self, provider: ProviderKind) -> Option<SecretString> {
        self.sources.iter().find_map(|source| source.api_key(provider))
    }
}
