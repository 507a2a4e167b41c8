//! Language type: closed set of supported UI locales.
//!
//! Metadata (names, default flag) lives in the registry; this module owns the
//! enumeration itself and its conversions.

use crate::error::{PreferenceError, Result};
use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings, CREOLE_STRINGS, FRENCH_STRINGS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported UI language.
///
/// The declaration order is the enumeration order: the first member is the
/// default used when nothing valid is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French (`fr`)
    #[default]
    Fr,
    /// Haitian Creole (`ht`)
    Ht,
}

impl Language {
    /// All members in enumeration order.
    pub const ALL: [Language; 2] = [Language::Fr, Language::Ht];

    /// Parse a language code.
    ///
    /// Surrounding whitespace is ignored; matching is otherwise exact
    /// (`"fr"` is valid, `"FR"` is not).
    ///
    /// # Returns
    /// * `Ok(Language)` if the code names a supported language
    /// * `Err(PreferenceError::InvalidLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        LanguageRegistry::get()
            .get_by_code(code.trim())
            .map(|config| config.language)
            .ok_or_else(|| PreferenceError::InvalidLanguage(code.to_string()))
    }

    /// Position of this language in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the ISO 639-1 language code (e.g., "fr", "ht").
    pub fn code(self) -> &'static str {
        self.config().code
    }

    /// Get the English name of the language.
    pub fn name(self) -> &'static str {
        self.config().name
    }

    /// Get the language name in its own language (e.g., "Kreyòl ayisyen").
    pub fn native_name(self) -> &'static str {
        self.config().native_name
    }

    /// Get the full language configuration from the registry.
    pub fn config(self) -> &'static LanguageConfig {
        LanguageRegistry::get().config(self)
    }

    /// The other member of the two-language set.
    pub fn other(self) -> Language {
        match self {
            Language::Fr => Language::Ht,
            Language::Ht => Language::Fr,
        }
    }

    /// Translation table for this language.
    pub fn strings(self) -> &'static LanguageStrings {
        match self {
            Language::Fr => &FRENCH_STRINGS,
            Language::Ht => &CREOLE_STRINGS,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}
