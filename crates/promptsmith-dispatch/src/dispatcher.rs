//! Single-call upstream dispatch

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::header::HeaderMap;
use promptsmith_config::DispatchConfig;
use promptsmith_core::{NO_CONTENT_SENTINEL, NormalizedResult, ProviderKind};
use reqwest::Client;
use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use crate::error::DispatchError;
use crate::keys::{ChainedKeySource, KeySource};
use crate::provider::{OutboundPrompt, wire_format};
use crate::request::{GenerationRequest, parse_body};

/// Fully resolved upstream call, ready to send
pub struct ProviderCallSpec {
    /// Provider being called
    pub provider: ProviderKind,
    /// Request URL; carries the key in its query for Google
    pub endpoint: Url,
    /// Request headers, credentials marked sensitive
    pub headers: HeaderMap,
    /// JSON request body
    pub body: Value,
}

impl fmt::Debug for ProviderCallSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut endpoint = self.endpoint.clone();
        endpoint.set_query(None);

        f.debug_struct("ProviderCallSpec")
            .field("provider", &self.provider)
            .field("endpoint", &endpoint.as_str())
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

struct Settings {
    timeout: Duration,
    allow_client_keys: bool,
    base_urls: [(ProviderKind, Url); 3],
    max_tokens: [(ProviderKind, u32); 3],
}

impl Settings {
    fn base_url(&self, kind: ProviderKind) -> Option<&Url> {
        self.base_urls.iter().find(|(k, _)| *k == kind).map(|(_, url)| url)
    }

    fn max_tokens(&self, kind: ProviderKind) -> Option<u32> {
        self.max_tokens.iter().find(|(k, _)| *k == kind).map(|(_, n)| *n)
    }
}

/// Provider dispatcher
///
/// Cheap to clone; clones share the HTTP client, settings, and key source.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    settings: Arc<Settings>,
    keys: Arc<dyn KeySource>,
}

impl Dispatcher {
    /// Build from configuration, reading keys from the config file then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is invalid or the HTTP client cannot be built
    pub fn from_config(config: &DispatchConfig) -> anyhow::Result<Self> {
        Self::with_key_source(config, ChainedKeySource::from_config(config))
    }

    /// Build from configuration with an explicit key source
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is invalid or the HTTP client cannot be built
    pub fn with_key_source(config: &DispatchConfig, keys: impl KeySource + 'static) -> anyhow::Result<Self> {
        let timeout = config.timeout()?;

        let base_url = |kind: ProviderKind| -> anyhow::Result<(ProviderKind, Url)> {
            let url = match config.provider(kind).and_then(|p| p.base_url.clone()) {
                Some(url) => url,
                None => Url::parse(wire_format(kind).default_base_url())?,
            };
            Ok((kind, url))
        };

        let settings = Settings {
            timeout,
            allow_client_keys: config.allow_client_keys,
            base_urls: [
                base_url(ProviderKind::OpenAi)?,
                base_url(ProviderKind::Anthropic)?,
                base_url(ProviderKind::Google)?,
            ],
            max_tokens: ProviderKind::ALL.map(|kind| (kind, config.max_tokens_for(kind))),
        };

        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        tracing::debug!(
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            allow_client_keys = settings.allow_client_keys,
            "dispatcher initialized"
        );

        Ok(Self {
            client,
            settings: Arc::new(settings),
            keys: Arc::new(keys),
        })
    }

    /// Upstream timeout
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Key to use for `provider`
    ///
    /// A caller-supplied key wins only when client keys are allowed;
    /// otherwise the server-held key is used and the caller's is ignored.
    pub fn resolve_key(&self, provider: ProviderKind, client_key: Option<&str>) -> Option<SecretString> {
        if self.settings.allow_client_keys
            && let Some(key) = client_key.map(str::trim).filter(|k| !k.is_empty())
        {
            return Some(SecretString::from(key.to_owned()));
        }

        self.keys.api_key(provider)
    }

    /// Validate a raw request body
    pub fn parse_request(&self, body: &[u8]) -> Result<GenerationRequest, DispatchError> {
        let raw = parse_body(body)?;
        GenerationRequest::validate(&raw, |provider, client_key| self.resolve_key(provider, client_key))
    }

    /// Resolve the endpoint, headers, and body for a validated request
    pub fn call_spec(&self, request: &GenerationRequest) -> Result<ProviderCallSpec, DispatchError> {
        let format = wire_format(request.provider);

        let base = self
            .settings
            .base_url(request.provider)
            .ok_or_else(|| DispatchError::Internal(anyhow::anyhow!("no base URL for {}", request.provider)))?;

        let prompt = OutboundPrompt {
            model: &request.model,
            system: request.system_prompt.as_deref(),
            user: &request.user_prompt,
            max_tokens: self
                .settings
                .max_tokens(request.provider)
                .unwrap_or(promptsmith_config::DEFAULT_MAX_TOKENS),
        };

        Ok(ProviderCallSpec {
            provider: request.provider,
            endpoint: format.endpoint(base, &request.model, &request.api_key)?,
            headers: format.headers(&request.api_key)?,
            body: format.body(&prompt)?,
        })
    }

    /// Validate a raw body, call the provider once, and normalize its answer
    pub async fn dispatch(&self, body: &[u8]) -> Result<NormalizedResult, DispatchError> {
        let request = self.parse_request(body)?;
        self.generate(&request).await
    }

    /// Call the provider once for an already validated request
    pub async fn generate(&self, request: &GenerationRequest) -> Result<NormalizedResult, DispatchError> {
        let provider = request.provider;
        let spec = self.call_spec(request)?;

        tracing::info!(provider = %provider, model = %request.model, "dispatching generation request");

        let send_error = |e: reqwest::Error| {
            if e.is_timeout() {
                tracing::warn!(provider = %provider, "upstream request timed out");
                DispatchError::Timeout(provider)
            } else {
                // Strip the URL so a query-string key never reaches logs or callers
                let e = e.without_url();
                tracing::error!(provider = %provider, error = %e, "upstream request failed");
                DispatchError::Transport {
                    provider,
                    message: e.to_string(),
                }
            }
        };

        let started = Instant::now();
        let response = self
            .client
            .post(spec.endpoint)
            .headers(spec.headers)
            .json(&spec.body)
            .timeout(self.settings.timeout)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(send_error)?;

        tracing::info!(
            provider = %provider,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "upstream responded"
        );
        tracing::debug!(provider = %provider, body = %text, "upstream response body");

        if !status.is_success() {
            tracing::warn!(provider = %provider, status = %status, "upstream returned error");
            return Err(DispatchError::Upstream {
                provider,
                status,
                body: text,
            });
        }

        let parsed: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(provider = %provider, error = %e, "upstream response is not JSON");
            DispatchError::ResponseShape {
                provider,
                details: e.to_string(),
                raw: Value::String(text.clone()),
            }
        })?;

        if !parsed.is_object() {
            tracing::warn!(provider = %provider, "upstream response is not a JSON object");
            return Err(DispatchError::ResponseShape {
                provider,
                details: "expected a JSON object".to_owned(),
                raw: parsed,
            });
        }

        let result = wire_format(provider).extract(&parsed).unwrap_or_else(|| {
            tracing::debug!(provider = %provider, "response has no text at the expected path");
            NO_CONTENT_SENTINEL.to_owned()
        });

        Ok(NormalizedResult {
            result,
            provider,
            model: request.model.clone(),
        })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("timeout", &self.settings.timeout)
            .field("allow_client_keys", &self.settings.allow_client_keys)
            .finish_non_exhaustive()
    }
}
