//! Splitting generated text into numbered prompts

use std::sync::OnceLock;

use regex::Regex;

/// Shown when the generated text holds no usable items
pub const NO_RESULTS_PLACEHOLDER: &str = "No valid result received from the AI. Please try again.";

/// Outcome of parsing a generation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedResults {
    /// One entry per numbered item, trimmed
    Prompts(Vec<String>),
    /// Nothing usable came back
    Empty,
}

impl RenderedResults {
    pub fn prompts(&self) -> &[String] {
        match self {
            Self::Prompts(prompts) => prompts,
            Self::Empty => &[],
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl std::fmt::Display for RenderedResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prompts(prompts) => {
                for (i, prompt) in prompts.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}. {prompt}", i + 1)?;
                }
                Ok(())
            }
            Self::Empty => f.write_str(NO_RESULTS_PLACEHOLDER),
        }
    }
}

fn item_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"\n?\d+\.\s").expect("must be valid regex"))
}

/// Split on `N. ` markers, trim each piece, and drop the empty ones
///
/// Text before the first marker is kept as an item of its own.
pub fn parse_results(text: &str) -> RenderedResults {
    let prompts: Vec<String> = item_marker()
        .split(text)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect();

    if prompts.is_empty() {
        RenderedResults::Empty
    } else {
        RenderedResults::Prompts(prompts)
    }
}
