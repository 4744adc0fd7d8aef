//! Composer session state and the generate action

use promptsmith_core::{GenerateRequest, ProviderKind};

use crate::catalog;
use crate::client::DispatcherClient;
use crate::error::ComposerError;
use crate::prompt::{PromptCount, build_user_prompt};
use crate::results::{RenderedResults, parse_results};
use crate::store::PromptStore;
use crate::template::Template;

/// Selections behind one composer form
///
/// `generate` takes `&mut self`, so a session can have at most one
/// request in flight.
#[derive(Debug)]
pub struct Composer<S> {
    client: DispatcherClient,
    store: S,
    provider: ProviderKind,
    model: String,
    template: Template,
    count: PromptCount,
    api_key: Option<String>,
}

impl<S: PromptStore> Composer<S> {
    /// Session starting on `OpenAI`'s default model and the default template
    pub fn new(client: DispatcherClient, store: S) -> Self {
        let provider = ProviderKind::OpenAi;
        Self {
            client,
            store,
            provider,
            model: catalog::default_model(provider).to_owned(),
            template: Template::default(),
            count: PromptCount::default(),
            api_key: None,
        }
    }

    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Switch provider and reset the model to that provider's default
    pub fn set_provider(&mut self, provider: ProviderKind) {
        self.provider = provider;
        catalog::default_model(provider).clone_into(&mut self.model);
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Select a model; names outside the catalog are passed through as-is
    pub fn set_model(&mut self, model: impl Into<String>) {
        let model = model.into();
        if !catalog::is_known_model(self.provider, &model) {
            tracing::debug!(provider = %self.provider, model = %model, "model not in catalog");
        }
        self.model = model;
    }

    pub const fn template(&self) -> Template {
        self.template
    }

    pub fn set_template(&mut self, template: Template) {
        self.template = template;
    }

    pub const fn count(&self) -> PromptCount {
        self.count
    }

    pub fn set_count(&mut self, count: PromptCount) {
        self.count = count;
    }

    /// Caller-supplied provider key, honored only by dispatchers that allow it
    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key;
    }

    /// System prompt for the current template
    pub fn system_prompt(&self) -> String {
        self.template.system_prompt(&self.store)
    }

    /// Replace the custom system prompt; only allowed in custom mode
    pub fn edit_system_prompt(&mut self, text: &str) -> Result<(), ComposerError> {
        self.template.save_custom(&mut self.store, text)
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Build the request for `keyword` without sending it
    pub fn request_for(&self, keyword: &str) -> Result<GenerateRequest, ComposerError> {
        let user_prompt = build_user_prompt(keyword, self.count)?;

        let system_prompt = self.system_prompt();
        let system_prompt = system_prompt.trim();
        if system_prompt.is_empty() {
            return Err(ComposerError::EmptySystemPrompt);
        }

        Ok(GenerateRequest {
            provider: Some(self.provider.as_str().to_owned()),
            model: Some(self.model.clone()),
            system_prompt: Some(system_prompt.to_owned()),
            user_prompt: Some(user_prompt),
            user_keyword: None,
            api_key: self.api_key.clone(),
        })
    }

    /// Generate variations for `keyword` and split them into items
    pub async fn generate(&mut self, keyword: &str) -> Result<RenderedResults, ComposerError> {
        let request = self.request_for(keyword)?;

        tracing::info!(
            provider = %self.provider,
            model = %self.model,
            template = %self.template,
            count = self.count.get(),
            "requesting prompt variations"
        );

        let response = self.client.generate(&request).await?;
        Ok(parse_results(response.result.trim()))
    }
}
