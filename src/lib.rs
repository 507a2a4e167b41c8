pub mod config;
pub mod error;
pub mod i18n;
pub mod preferences;
pub mod storage;

pub use error::{PreferenceError, Result, StorageError};
pub use i18n::{Language, TranslationValue};
pub use preferences::{PreferenceProvider, PreferenceState, ProviderSettings, Theme};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
