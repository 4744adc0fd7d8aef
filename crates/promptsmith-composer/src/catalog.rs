//! Models offered per provider

use promptsmith_core::ProviderKind;

const OPENAI_MODELS: &[&str] = &["gpt-4o", "gpt-4-turbo", "gpt-3.5-turbo"];

const ANTHROPIC_MODELS: &[&str] = &[
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

const GOOGLE_MODELS: &[&str] = &["gemini-1.5-pro-latest", "gemini-1.5-flash-latest"];

/// Models offered for a provider, default first
pub const fn models(provider: ProviderKind) -> &'static [&'static str] {
    match provider {
        ProviderKind::OpenAi => OPENAI_MODELS,
        ProviderKind::Anthropic => ANTHROPIC_MODELS,
        ProviderKind::Google => GOOGLE_MODELS,
    }
}

/// Model selected when switching to a provider
pub const fn default_model(provider: ProviderKind) -> &'static str {
    models(provider)[0]
}

pub fn is_known_model(provider: ProviderKind, model: &str) -> bool {
    models(provider).contains(&model)
}
