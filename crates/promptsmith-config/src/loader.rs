use std::path::Path;

use promptsmith_core::ProviderKind;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Load configuration, falling back to defaults when an implicit path is absent
    ///
    /// An explicitly requested file must exist; the default path may be
    /// missing, in which case every setting takes its default and provider
    /// keys come from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Config::load`]
    pub fn load_or_default(path: &Path, explicit: bool) -> anyhow::Result<Self> {
        if !explicit && !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        Self::load(path)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is unparseable, a token cap is zero,
    /// or a provider base URL is not HTTP(S)
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_dispatch_config()?;
        self.validate_health_config()?;
        Ok(())
    }

    fn validate_dispatch_config(&self) -> anyhow::Result<()> {
        let dispatch = &self.dispatch;
        dispatch.timeout()?;

        if dispatch.max_tokens == 0 {
            anyhow::bail!("dispatch.max_tokens must be greater than 0");
        }

        for kind in ProviderKind::ALL {
            let Some(provider) = dispatch.provider(kind) else {
                continue;
            };

            if provider.max_tokens == Some(0) {
                anyhow::bail!("dispatch.providers.{kind}.max_tokens must be greater than 0");
            }

            if let Some(ref url) = provider.base_url
                && !matches!(url.scheme(), "http" | "https")
            {
                anyhow::bail!("dispatch.providers.{kind}.base_url must be an http(s) URL, got '{url}'");
            }
        }

        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }
        Ok(())
    }
}
