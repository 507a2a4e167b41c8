//! Error types for preference and translation operations.

use thiserror::Error;

/// Result type for preference operations.
pub type Result<T> = std::result::Result<T, PreferenceError>;

/// Errors surfaced by the preference provider and its collaborators.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// Input is not one of the supported language codes
    #[error("Invalid language: '{0}'")]
    InvalidLanguage(String),

    /// Input is not one of the supported theme codes
    #[error("Invalid theme: '{0}'")]
    InvalidTheme(String),

    /// Lookup key is absent from the active language's table.
    /// This is a data defect, not a recoverable runtime condition.
    #[error("Missing translation key '{key}' for language '{language}'")]
    MissingTranslationKey { language: &'static str, key: String },

    /// Key exists but holds a different kind of value than requested
    #[error("Translation key '{key}' is not a {expected} value")]
    WrongTranslationKind { key: String, expected: &'static str },

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures of the persistent key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// I/O failure while reading or writing the backing file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file exists but does not hold a flat JSON object of strings
    #[error("Corrupt storage file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
