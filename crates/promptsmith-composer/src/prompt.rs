//! User prompt assembly

use indoc::formatdoc;

use crate::error::ComposerError;

/// Number of variations to request, bounded to `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptCount(u32);

impl PromptCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;
    pub const DEFAULT: Self = Self(5);

    pub fn new(count: u32) -> Result<Self, ComposerError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(ComposerError::InvalidCount {
                got: count,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PromptCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PromptCount {
    type Error = ComposerError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

/// Wrap a keyword into a request for `count` numbered variations
pub fn build_user_prompt(keyword: &str, count: PromptCount) -> Result<String, ComposerError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(ComposerError::EmptyKeyword);
    }

    Ok(formatdoc! {r#"
        Based on the user's idea, generate {count} distinct and creative variations for a Midjourney prompt.
        User's Idea: "{keyword}"
        Please format the output clearly. Each prompt must start on a new line and be prefixed with "1. ", "2. ", etc. Do not add any extra text or explanations before or after the list of prompts."#,
        count = count.get(),
        keyword = keyword,
    })
}
