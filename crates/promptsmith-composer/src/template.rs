//! Named system prompt templates

use std::fmt;
use std::str::FromStr;

use crate::error::ComposerError;
use crate::store::PromptStore;

/// Store key holding the user's custom system prompt
pub const CUSTOM_PROMPT_KEY: &str = "customSystemPrompt";

/// Shown in custom mode until the user writes their own text
pub const CUSTOM_PLACEHOLDER: &str = "Enter your system prompt here...";

const DEFAULT_TEXT: &str = "You are an expert Midjourney prompt engineer. Your task is to create a detailed, effective, and visually rich prompt based on the user's keywords. The prompt must be in English. Describe the scene, subjects, environment, lighting, colors, style, and camera setup. Structure the prompt clearly. Start with the main subject and add descriptive details, followed by parameters like --ar 16:9 --v 6.0.";

const ARTISTIC_TEXT: &str = "As a master artist, translate the user's keywords into a highly artistic and imaginative Midjourney prompt. The prompt must be in English. Focus on evoking emotion through style, composition, and color palette. Mention specific art styles (e.g., impressionism, surrealism, abstract) or artists. The output should be a poetic and descriptive prompt ready for Midjourney, ending with parameters like --ar 4:5 --style raw --s 250.";

const PHOTOGRAPHY_TEXT: &str = "You are a professional photographer creating a shot list. Convert the user's keywords into a photorealistic Midjourney prompt. The prompt must be in English. Specify camera type (e.g., DSLR, vintage film), lens (e.g., 85mm f/1.8), aperture, shutter speed, ISO, and lighting (e.g., golden hour, studio lighting). The goal is maximum realism. End with parameters like --ar 3:2 --style raw.";

const FANTASY_TEXT: &str = "You are a world-building loremaster. Forge the user's keywords into an epic fantasy-themed Midjourney prompt. The prompt must be in English. Describe mythical creatures, magical effects, enchanted landscapes, and intricate armor or clothing. Use epic and powerful language. The prompt should feel like it's from a fantasy novel. End with parameters like --ar 16:9 --v 6.0 --s 500.";

/// System prompt template selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    #[default]
    Default,
    Artistic,
    Photography,
    Fantasy,
    /// The user's own text, kept in a [`PromptStore`]
    Custom,
}

impl Template {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Artistic,
        Self::Photography,
        Self::Fantasy,
        Self::Custom,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Artistic => "artistic",
            Self::Photography => "photography",
            Self::Fantasy => "fantasy",
            Self::Custom => "custom",
        }
    }

    /// Built-in text; `None` for [`Template::Custom`]
    pub const fn fixed_text(self) -> Option<&'static str> {
        match self {
            Self::Default => Some(DEFAULT_TEXT),
            Self::Artistic => Some(ARTISTIC_TEXT),
            Self::Photography => Some(PHOTOGRAPHY_TEXT),
            Self::Fantasy => Some(FANTASY_TEXT),
            Self::Custom => None,
        }
    }

    /// Only the custom template accepts edits
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Custom)
    }

    /// System prompt this template yields
    ///
    /// Custom mode reads the store and falls back to [`CUSTOM_PLACEHOLDER`].
    pub fn system_prompt(self, store: &impl PromptStore) -> String {
        match self.fixed_text() {
            Some(text) => text.to_owned(),
            None => store.get_or(CUSTOM_PROMPT_KEY, CUSTOM_PLACEHOLDER),
        }
    }

    /// Persist edited text; rejected for fixed templates
    pub fn save_custom(self, store: &mut impl PromptStore, text: &str) -> Result<(), ComposerError> {
        if !self.is_editable() {
            return Err(ComposerError::ReadOnlyTemplate(self));
        }

        store.set(CUSTOM_PROMPT_KEY, text)?;
        tracing::debug!(chars = text.chars().count(), "saved custom system prompt");
        Ok(())
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ComposerError::UnknownTemplate(name.to_owned()))
    }
}
