//! Startup configuration — credentials and model selection.
//!
//! Resolution order for every value: process environment, then the
//! `.env.local` / `.env` file loaded at startup (first one found wins).
//! A missing API key is fatal.

use crate::error::ConfigError;
use crate::llm::prompts::MODEL;
use std::fmt;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Older name, still honoured.
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const ENDPOINT_ENV: &str = "GEMINI_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_ENV)
            .or_else(|| non_empty(LEGACY_API_KEY_ENV))
            .ok_or(ConfigError::MissingApiKey)?;
        let model = non_empty(MODEL_ENV).unwrap_or_else(|| MODEL.to_string());
        let endpoint = non_empty(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        log::info!("[CONFIG] API key found ({} chars)", api_key.len());
        log::info!("[CONFIG] Model: {}", model);

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            endpoint,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Load `.env.local`, falling back to `.env`, from `dir`.
///
/// Returns the file that was loaded. Variables already set in the process
/// environment are not overridden.
pub fn load_env_files(dir: &Path) -> Option<PathBuf> {
    for env_file in [".env.local", ".env"] {
        let path = dir.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => {
                    eprintln!("[STARTUP] Loaded {}", path.display());
                    return Some(path);
                }
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let result = Settings::from_lookup(lookup(&[(API_KEY_ENV, "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn legacy_key_name_is_accepted() {
        let settings = Settings::from_lookup(lookup(&[(LEGACY_API_KEY_ENV, "abc")])).unwrap();
        assert_eq!(settings.api_key, "abc");
        assert_eq!(settings.model, MODEL);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn primary_key_and_overrides_win() {
        let settings = Settings::from_lookup(lookup(&[
            (API_KEY_ENV, "primary"),
            (LEGACY_API_KEY_ENV, "legacy"),
            (MODEL_ENV, "gemini-2.5-pro"),
            (ENDPOINT_ENV, "http://localhost:8080/v1beta"),
        ]))
        .unwrap();
        assert_eq!(settings.api_key, "primary");
        assert_eq!(settings.model, "gemini-2.5-pro");
        assert_eq!(settings.endpoint, "http://localhost:8080/v1beta");
        assert!(!format!("{:?}", settings).contains("primary"));
    }

    #[test]
    fn env_local_takes_precedence_over_env() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "SP_TEST_ENV_ORDER=plain\n").unwrap();
        std::fs::write(dir.path().join(".env.local"), "SP_TEST_ENV_ORDER=local\n").unwrap();

        let loaded = load_env_files(dir.path()).unwrap();
        assert!(loaded.ends_with(".env.local"));
        assert_eq!(std::env::var("SP_TEST_ENV_ORDER").unwrap(), "local");
        std::env::remove_var("SP_TEST_ENV_ORDER");
    }

    #[test]
    fn no_env_files_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_files(dir.path()).is_none());
    }
}
