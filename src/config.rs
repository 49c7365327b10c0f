use crate::i18n::{LanguageCode, LanguageRegistry};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Content snapshot to preview
    pub content_file: PathBuf,

    /// Language to resolve content for
    pub display_language: LanguageCode,

    /// Languages checked by the coverage report
    pub coverage_languages: Vec<LanguageCode>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            content_file: std::env::var("CONTENT_FILE")
                .map(PathBuf::from)
                .context("CONTENT_FILE not set")?,
            display_language: std::env::var("DISPLAY_LANGUAGE")
                .map(LanguageCode::from)
                .unwrap_or_default(),
            coverage_languages: std::env::var("COVERAGE_LANGUAGES")
                .ok()
                .map(|list| LanguageCode::parse_list(&list))
                .filter(|codes| !codes.is_empty())
                .unwrap_or_else(registry_languages),
        })
    }

    /// Build a config from explicit values, filling in defaults.
    pub fn new(content_file: impl Into<PathBuf>) -> Self {
        Self {
            content_file: content_file.into(),
            display_language: LanguageCode::default(),
            coverage_languages: registry_languages(),
        }
    }
}

fn registry_languages() -> Vec<LanguageCode> {
    LanguageRegistry::get()
        .enabled_codes()
        .into_iter()
        .map(LanguageCode::new)
        .collect()
}
