//! Prompt post-processing — suffix phrases and the aspect-ratio clause.
//!
//! Applied to every scene prompt after generation, before the user sees it.
//! Selected phrases go first, the aspect-ratio clause always goes last.

use crate::error::ParseAspectRatioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frame shape requested from the video model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
    ];

    /// The tag appended to prompts, e.g. `16:9`.
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9 (가로)",
            AspectRatio::Portrait => "9:16 (세로)",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = ParseAspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| ParseAspectRatioError(s.to_string()))
    }
}

/// Frequently used suffix phrases offered as checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PromptOption {
    #[value(name = "dubbed-korean")]
    DubbedKorean,
    #[value(name = "no-subtitles")]
    NoSubtitles,
}

impl PromptOption {
    pub const ALL: [PromptOption; 2] = [PromptOption::DubbedKorean, PromptOption::NoSubtitles];

    /// The phrase appended to each prompt.
    pub fn phrase(self) -> &'static str {
        match self {
            PromptOption::DubbedKorean => "Dubbed in Korean.",
            PromptOption::NoSubtitles => "No subtitles or graphics.",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PromptOption::DubbedKorean => "한국어로 더빙",
            PromptOption::NoSubtitles => "자막이나 그래픽은 없다.",
        }
    }
}

/// Suffix phrases in selection order plus an optional aspect ratio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOptionSelection {
    pub suffixes: Vec<String>,
    pub aspect_ratio: Option<AspectRatio>,
}

impl PromptOptionSelection {
    pub fn new(suffixes: Vec<String>, aspect_ratio: Option<AspectRatio>) -> Self {
        Self {
            suffixes,
            aspect_ratio,
        }
    }

    pub fn is_selected(&self, phrase: &str) -> bool {
        self.suffixes.iter().any(|s| s == phrase)
    }

    /// Checkbox semantics: deselect if present, otherwise append.
    pub fn toggle_suffix(&mut self, phrase: &str) {
        if self.is_selected(phrase) {
            self.suffixes.retain(|s| s != phrase);
        } else {
            self.suffixes.push(phrase.to_string());
        }
    }

    /// Append unless already selected.
    pub fn select_suffix(&mut self, phrase: &str) {
        if !self.is_selected(phrase) {
            self.suffixes.push(phrase.to_string());
        }
    }
}

/// Apply the selected suffixes and aspect-ratio clause to every prompt.
///
/// Output has the input's length and order. Every prompt ends with a
/// single terminal period even when nothing is selected.
pub fn post_process<S: AsRef<str>>(prompts: &[S], options: &PromptOptionSelection) -> Vec<String> {
    prompts
        .iter()
        .map(|prompt| process_one(prompt.as_ref(), options))
        .collect()
}

fn process_one(prompt: &str, options: &PromptOptionSelection) -> String {
    let mut current = end_sentence(prompt);

    if !options.suffixes.is_empty() {
        current = format!("{} {}", current, options.suffixes.join(" "));
    }

    if let Some(ratio) = options.aspect_ratio {
        current = format!("{} Aspect ratio {}.", end_sentence(&current), ratio);
    }

    current.trim().to_string()
}

/// Trim and make sure the text ends with a period.
fn end_sentence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with('.') {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}
