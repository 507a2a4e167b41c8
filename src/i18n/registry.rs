//! Language registry: metadata for every supported language.
//!
//! The registry is immutable table data built once with `OnceLock`. Mutable
//! preference state never lives here; that belongs to the provider.

use crate::i18n::Language;
use std::sync::OnceLock;

/// Metadata for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Enumeration member this entry describes
    pub language: Language,

    /// ISO 639-1 language code (e.g., "fr", "ht")
    pub code: &'static str,

    /// English name of the language (e.g., "French", "Haitian Creole")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français", "Kreyòl ayisyen")
    pub native_name: &'static str,

    /// Whether this is the fallback language (exactly one should be true)
    pub is_default: bool,
}

/// Registry of all supported languages, indexed by `Language::index()`.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the shared registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get the configuration of a language.
    pub fn config(&self, language: Language) -> &LanguageConfig {
        &self.languages[language.index()]
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the code is registered
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages in enumeration order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The fallback language used when nothing valid is stored.
    pub fn default_language(&self) -> Language {
        self.languages
            .iter()
            .find(|lang| lang.is_default)
            .map(|lang| lang.language)
            .unwrap_or(Language::ALL[0])
    }
}

/// Entries must follow `Language::ALL` order so `config` can index directly.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            language: Language::Fr,
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: true,
        },
        LanguageConfig {
            language: Language::Ht,
            code: "ht",
            name: "Haitian Creole",
            native_name: "Kreyòl ayisyen",
            is_default: false,
        },
    ]
}
