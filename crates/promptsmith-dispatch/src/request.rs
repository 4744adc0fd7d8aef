//! Validation of inbound generation requests

use promptsmith_core::{GenerateRequest, ProviderKind};
use secrecy::SecretString;

use crate::error::DispatchError;

/// A request that passed validation, with its key already resolved
pub struct GenerationRequest {
    /// Target provider
    pub provider: ProviderKind,
    /// Provider model identifier
    pub model: String,
    /// System prompt; `None` when absent or blank
    pub system_prompt: Option<String>,
    /// User prompt
    pub user_prompt: String,
    /// Key used for the upstream call
    pub api_key: SecretString,
}

impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("user_prompt", &self.user_prompt)
            .finish_non_exhaustive()
    }
}

/// Decode a raw request body
///
/// An empty body and malformed JSON are distinct failures.
pub fn parse_body(body: &[u8]) -> Result<GenerateRequest, DispatchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DispatchError::EmptyBody);
    }

    serde_json::from_slice(body).map_err(|e| DispatchError::InvalidJson(e.to_string()))
}

/// Non-blank trimmed value of an optional field
fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|value| !value.is_empty())
}

impl GenerationRequest {
    /// Validate a decoded request
    ///
    /// `resolve_key` is asked for a key only once the provider is known to be
    /// supported; if it yields nothing, `apiKey` is reported missing. Missing
    /// fields take precedence over an unsupported provider name.
    pub fn validate<F>(raw: &GenerateRequest, resolve_key: F) -> Result<Self, DispatchError>
    where
        F: FnOnce(ProviderKind, Option<&str>) -> Option<SecretString>,
    {
        let mut missing = Vec::new();

        let provider_name = present(raw.provider.as_deref());
        let model = present(raw.model.as_deref());
        let user_prompt = present(raw.user_prompt.as_deref()).or_else(|| present(raw.user_keyword.as_deref()));

        if provider_name.is_none() {
            missing.push("provider");
        }
        if model.is_none() {
            missing.push("model");
        }

        let provider = provider_name.map(str::parse::<ProviderKind>);
        let api_key = match provider {
            Some(Ok(kind)) => resolve_key(kind, present(raw.api_key.as_deref())),
            _ => None,
        };

        if matches!(provider, Some(Ok(_))) && api_key.is_none() {
            missing.push("apiKey");
        }
        if user_prompt.is_none() {
            missing.push("userPrompt");
        }

        if !missing.is_empty() {
            return Err(DispatchError::MissingFields(missing));
        }

        let provider = match provider {
            Some(Ok(kind)) => kind,
            Some(Err(unsupported)) => return Err(DispatchError::UnsupportedProvider(unsupported.0)),
            None => return Err(DispatchError::MissingFields(vec!["provider"])),
        };

        let (Some(model), Some(user_prompt), Some(api_key)) = (model, user_prompt, api_key) else {
            return Err(DispatchError::Internal(anyhow::anyhow!(
                "validated request lost a required field"
            )));
        };

        Ok(Self {
            provider,
            model: model.to_owned(),
            system_prompt: present(raw.system_prompt.as_deref()).map(str::to_owned),
            user_prompt: user_prompt.to_owned(),
            api_key,
        })
    }
}
