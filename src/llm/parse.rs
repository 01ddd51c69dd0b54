//! Model output parsing — strict JSON first, then best-effort fallbacks.
//!
//! The tiers run as an ordered sequence:
//! 1. strict: a JSON array of strings, returned as-is
//! 2. line split: JSON of the wrong shape, or multi-line non-JSON text
//! 3. whole text: anything else becomes a single prompt
//!
//! Each tier is a standalone function so its decision can be checked alone.

use super::types::ScenePrompt;
use serde_json::Value;

/// Which tier produced the prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    Strict,
    LineSplit,
    WholeText,
}

/// Why the strict tier declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictRejection {
    /// Valid JSON, but not an array of strings.
    WrongShape,
    /// Not JSON at all.
    NotJson,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrompts {
    pub tier: ParseTier,
    pub prompts: Vec<ScenePrompt>,
}

/// Tier 1: accept only a JSON array whose every element is a string.
pub fn parse_strict(raw: &str) -> Result<Vec<ScenePrompt>, StrictRejection> {
    let value: Value = serde_json::from_str(raw).map_err(|_| StrictRejection::NotJson)?;
    let Value::Array(items) = value else {
        return Err(StrictRejection::WrongShape);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            _ => Err(StrictRejection::WrongShape),
        })
        .collect()
}

/// Tier 2: one prompt per non-blank line.
pub fn split_lines(raw: &str) -> Vec<ScenePrompt> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Tier 3: the whole text as a single prompt.
pub fn whole_text(raw: &str) -> Vec<ScenePrompt> {
    vec![raw.to_string()]
}

/// Run the tiers in order over trimmed model output.
pub fn parse_model_output(raw: &str) -> ParsedPrompts {
    let trimmed = raw.trim();

    let (tier, prompts) = match parse_strict(trimmed) {
        Ok(prompts) => (ParseTier::Strict, prompts),
        Err(StrictRejection::WrongShape) => (ParseTier::LineSplit, split_lines(trimmed)),
        Err(StrictRejection::NotJson) if trimmed.contains('\n') => {
            (ParseTier::LineSplit, split_lines(trimmed))
        }
        Err(StrictRejection::NotJson) => (ParseTier::WholeText, whole_text(trimmed)),
    };

    ParsedPrompts { tier, prompts }
}
