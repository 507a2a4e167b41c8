//! Internationalization (i18n) module.
//!
//! Everything language-related lives here: the closed set of supported
//! languages, their metadata, and the static translation tables.
//!
//! # Architecture
//!
//! - `language`: `Language` enum and code conversions
//! - `registry`: metadata for every supported language
//! - `strings`: per-language translation tables and key lookup
//! - `validator`: structural checks across tables
//!
//! # Example
//!
//! ```rust,ignore
//! use tyala_prefs::i18n::{Language, TranslationValidator};
//!
//! let creole = Language::from_code("ht")?;
//! let label = creole.strings().language_label;
//!
//! assert!(TranslationValidator::validate_parity().is_clean());
//! ```

mod language;
mod registry;
mod strings;
mod validator;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{fill_placeholders, LanguageStrings, TranslationValue, CREOLE_STRINGS, FRENCH_STRINGS};
pub use validator::{TranslationValidator, ValidationReport};
