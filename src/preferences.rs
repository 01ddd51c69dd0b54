//! Default option selection, persisted between runs.
//!
//! Stored in `~/.config/storyboard-prompts/preferences.json`. A missing or
//! unreadable file is not an error; defaults apply (16:9, no suffixes).

use crate::error::PreferencesError;
use crate::postprocess::{AspectRatio, PromptOptionSelection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub suffixes: Vec<String>,
    pub aspect_ratio: Option<AspectRatio>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            suffixes: Vec::new(),
            aspect_ratio: Some(AspectRatio::Landscape),
        }
    }
}

impl Preferences {
    pub fn selection(&self) -> PromptOptionSelection {
        PromptOptionSelection::new(self.suffixes.clone(), self.aspect_ratio)
    }
}

impl From<&PromptOptionSelection> for Preferences {
    fn from(selection: &PromptOptionSelection) -> Self {
        Self {
            suffixes: selection.suffixes.clone(),
            aspect_ratio: selection.aspect_ratio,
        }
    }
}

/// Full path to the preferences file.
pub fn preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storyboard-prompts")
        .join("preferences.json")
}

pub fn load() -> Preferences {
    load_from(&preferences_path())
}

pub fn save(preferences: &Preferences) -> Result<PathBuf, PreferencesError> {
    let path = preferences_path();
    save_to(&path, preferences)?;
    Ok(path)
}

pub fn load_from(path: &Path) -> Preferences {
    match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("[CONFIG] Ignoring invalid {}: {}", path.display(), e);
            Preferences::default()
        }),
        Err(_) => Preferences::default(),
    }
}

/// Write preferences, creating the parent directory if needed.
pub fn save_to(path: &Path, preferences: &Preferences) -> Result<(), PreferencesError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(preferences)?;
    std::fs::write(path, json)?;
    log::info!("[CONFIG] Saved preferences to {}", path.display());
    Ok(())
}
