//! Environment-driven configuration.
//!
//! Recognised variables:
//! - `SPOTLIGHT_API_KEY` (falls back to `OPENAI_API_KEY`), required
//! - `SPOTLIGHT_API_URL`, `SPOTLIGHT_MODEL`, `SPOTLIGHT_TIMEOUT_MS`
//! - `SPOTLIGHT_APP_DIRS`: search paths separated by the platform path separator
//! - `SPOTLIGHT_MEDIA_APP`, `SPOTLIGHT_SEARCH_URL`

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::classifier::async_classifier::DEFAULT_TIMEOUT_MS;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MEDIA_APP: &str = "Spotify";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
pub const DEFAULT_APP_DIRS: [&str; 3] = ["/Applications", "/System/Applications", "~/Applications"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key: set SPOTLIGHT_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,
    #[error("invalid SPOTLIGHT_TIMEOUT_MS '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    /// Already tilde-expanded.
    pub app_dirs: Vec<PathBuf>,
    pub media_app: String,
    pub search_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = var("SPOTLIGHT_API_KEY")
            .or_else(|| var("OPENAI_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let timeout = match var("SPOTLIGHT_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => Duration::from_millis(DEFAULT_TIMEOUT_MS),
        };

        let home = var("HOME");
        let app_dirs = match var("SPOTLIGHT_APP_DIRS") {
            Some(raw) => std::env::split_paths(&raw)
                .map(|p| expand_tilde(&p.to_string_lossy(), home.as_deref()))
                .collect(),
            None => DEFAULT_APP_DIRS
                .iter()
                .map(|p| expand_tilde(p, home.as_deref()))
                .collect(),
        };

        Ok(Self {
            llm: LlmConfig {
                api_key,
                api_url: var("SPOTLIGHT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                model: var("SPOTLIGHT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout,
            },
            app_dirs,
            media_app: var("SPOTLIGHT_MEDIA_APP").unwrap_or_else(|| DEFAULT_MEDIA_APP.to_string()),
            search_url: var("SPOTLIGHT_SEARCH_URL")
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
        })
    }
}

/// Expands a leading `~` against `home`. Paths are returned unchanged when
/// there is no home directory.
pub fn expand_tilde(path: &str, home: Option<&str>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => PathBuf::from(home),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            PathBuf::from(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}
