use crate::i18n::Language;
use crate::preferences::{ProviderSettings, Theme, DEFAULT_LANGUAGE_KEY, DEFAULT_THEME_KEY};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub storage_path: PathBuf,
    pub language_key: String,
    pub theme_key: String,

    // Defaults
    pub default_language: Language,
    pub default_theme: Theme,

    // Translation defects panic instead of returning an error
    pub strict_translations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = ProviderSettings::default();

        Ok(Self {
            // Storage
            storage_path: std::env::var("TYALA_PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/preferences.json")),
            language_key: std::env::var("TYALA_LANGUAGE_KEY")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE_KEY.to_string()),
            theme_key: std::env::var("TYALA_THEME_KEY")
                .unwrap_or_else(|_| DEFAULT_THEME_KEY.to_string()),

            // Defaults
            default_language: match std::env::var("TYALA_DEFAULT_LANGUAGE") {
                Ok(code) => Language::from_code(&code)
                    .context("TYALA_DEFAULT_LANGUAGE is not a supported language")?,
                Err(_) => defaults.default_language,
            },
            default_theme: match std::env::var("TYALA_DEFAULT_THEME") {
                Ok(code) => Theme::from_code(&code)
                    .context("TYALA_DEFAULT_THEME must be 'light' or 'dark'")?,
                Err(_) => defaults.default_theme,
            },

            strict_translations: match std::env::var("TYALA_STRICT_TRANSLATIONS") {
                Ok(flag) => flag
                    .trim()
                    .parse()
                    .context("TYALA_STRICT_TRANSLATIONS must be 'true' or 'false'")?,
                Err(_) => defaults.strict_translations,
            },
        })
    }

    /// Provider settings derived from this configuration.
    pub fn settings(&self) -> ProviderSettings {
        ProviderSettings {
            language_key: self.language_key.clone(),
            theme_key: self.theme_key.clone(),
            default_language: self.default_language,
            default_theme: self.default_theme,
            strict_translations: self.strict_translations,
        }
    }
}
