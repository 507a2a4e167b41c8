//! Preference provider: single owner of the current language and theme.
//!
//! The provider is an ordinary value built from a store and settings, then
//! lent to whatever needs it. Every mutation updates memory first, mirrors the
//! new value to the store with one synchronous write, and notifies
//! subscribers once. Persistence is best-effort: a failing store never blocks
//! an in-memory update.

use crate::error::{PreferenceError, Result, StorageError};
use crate::i18n::{
    Language, LanguageRegistry, LanguageStrings, TranslationValidator, TranslationValue,
};
use crate::preferences::{PreferenceState, Theme};
use crate::storage::KeyValueStore;
use tracing::{debug, error, info, warn};

/// Storage key holding the language code.
pub const DEFAULT_LANGUAGE_KEY: &str = "tyala_language";

/// Storage key holding the theme code.
pub const DEFAULT_THEME_KEY: &str = "tyala_theme";

/// Construction-time settings for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Key under which the language code is stored
    pub language_key: String,

    /// Key under which the theme code is stored
    pub theme_key: String,

    /// Language used when nothing valid is stored
    pub default_language: Language,

    /// Theme used when nothing valid is stored
    pub default_theme: Theme,

    /// Panic on missing translation keys instead of returning an error
    pub strict_translations: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            language_key: DEFAULT_LANGUAGE_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            default_language: LanguageRegistry::get().default_language(),
            default_theme: Theme::default(),
            strict_translations: cfg!(debug_assertions),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PreferenceState)>;

/// Holds the current `PreferenceState` and keeps the store in sync with it.
pub struct PreferenceProvider<S: KeyValueStore> {
    store: S,
    settings: ProviderSettings,
    state: PreferenceState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    storage_degraded: bool,
}

impl<S: KeyValueStore> PreferenceProvider<S> {
    /// Build a provider and load its initial state from `store`.
    ///
    /// Language and theme are resolved independently: a value that is absent,
    /// unreadable, or not a supported code falls back to the configured default.
    pub fn new(store: S, settings: ProviderSettings) -> Self {
        check_translation_tables();

        let state = PreferenceState::new(settings.default_language, settings.default_theme);
        let mut provider = Self {
            store,
            settings,
            state,
            listeners: Vec::new(),
            next_subscription: 0,
            storage_degraded: false,
        };
        provider.state = provider.load_state(state);

        info!(
            "Preferences loaded: language={}, theme={}",
            provider.state.language, provider.state.theme
        );
        provider
    }

    /// Build a provider with the default keys and defaults.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, ProviderSettings::default())
    }

    // ==================== Reads ====================

    pub fn current_language(&self) -> Language {
        self.state.language
    }

    pub fn current_theme(&self) -> Theme {
        self.state.theme
    }

    pub fn state(&self) -> PreferenceState {
        self.state
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the most recent storage operation failed.
    pub fn is_storage_degraded(&self) -> bool {
        self.storage_degraded
    }

    /// Typed access to the current language's table.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.state.language.strings()
    }

    // ==================== Language ====================

    pub fn set_language(&mut self, language: Language) {
        self.state.language = language;
        let result = self
            .store
            .set(&self.settings.language_key, language.code());
        self.record_storage("write", "language", result);

        debug!("Language set to {}", language);
        self.notify();
    }

    /// Parse and apply a language code.
    ///
    /// Unknown codes return `InvalidLanguage` and leave state, store, and
    /// subscribers untouched.
    pub fn set_language_code(&mut self, code: &str) -> Result<Language> {
        let language = Language::from_code(code).inspect_err(|_| {
            warn!("Rejected unsupported language code '{}'", code);
        })?;
        self.set_language(language);
        Ok(language)
    }

    /// Switch to the other language. Returns the new language.
    pub fn toggle_language(&mut self) -> Language {
        let next = self.state.language.other();
        self.set_language(next);
        next
    }

    // ==================== Theme ====================

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        let result = self.store.set(&self.settings.theme_key, theme.code());
        self.record_storage("write", "theme", result);

        debug!("Theme set to {}", theme);
        self.notify();
    }

    /// Parse and apply a theme code. Unknown codes return `InvalidTheme`.
    pub fn set_theme_code(&mut self, code: &str) -> Result<Theme> {
        let theme = Theme::from_code(code).inspect_err(|_| {
            warn!("Rejected unsupported theme code '{}'", code);
        })?;
        self.set_theme(theme);
        Ok(theme)
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.state.theme.other();
        self.set_theme(next);
        next
    }

    // ==================== Translation ====================

    /// Look up `key` in the current language's table.
    ///
    /// Never falls back to another language. A missing key is a data defect:
    /// it is logged, and with `strict_translations` enabled it panics.
    pub fn translate(&self, key: &str) -> Result<TranslationValue> {
        let language = self.state.language;
        match language.strings().get(key) {
            Some(value) => Ok(value),
            None => {
                error!(
                    "Missing translation key '{}' for language '{}'",
                    key,
                    language.code()
                );
                if self.settings.strict_translations {
                    panic!(
                        "Missing translation key '{}' for language '{}'",
                        key,
                        language.code()
                    );
                }
                Err(PreferenceError::MissingTranslationKey {
                    language: language.code(),
                    key: key.to_string(),
                })
            }
        }
    }

    /// Look up a text-valued key.
    pub fn translate_text(&self, key: &str) -> Result<&'static str> {
        self.translate(key)?
            .as_text()
            .ok_or_else(|| PreferenceError::WrongTranslationKind {
                key: key.to_string(),
                expected: "text",
            })
    }

    /// Look up a list-valued key.
    pub fn translate_list(&self, key: &str) -> Result<&'static [&'static str]> {
        self.translate(key)?
            .as_list()
            .ok_or_else(|| PreferenceError::WrongTranslationKind {
                key: key.to_string(),
                expected: "list",
            })
    }

    // ==================== Subscriptions ====================

    /// Register a consumer. It is called with the new state after every
    /// mutation until unsubscribed.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PreferenceState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a consumer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // ==================== Lifecycle ====================

    /// Remove both stored values and return to the defaults.
    pub fn reset(&mut self) {
        let result = self.store.remove(&self.settings.language_key);
        self.record_storage("remove", "language", result);
        let result = self.store.remove(&self.settings.theme_key);
        self.record_storage("remove", "theme", result);

        self.state = PreferenceState::new(self.settings.default_language, self.settings.default_theme);
        info!("Preferences reset to defaults");
        self.notify();
    }

    /// Re-read the store, for example after it was cleared or edited elsewhere.
    ///
    /// A field whose read fails keeps its in-memory value. Notifies subscribers
    /// only if the state changed. Returns whether it did.
    pub fn reload(&mut self) -> bool {
        let loaded = self.load_state(self.state);
        if loaded == self.state {
            return false;
        }
        self.state = loaded;
        info!(
            "Preferences reloaded: language={}, theme={}",
            loaded.language, loaded.theme
        );
        self.notify();
        true
    }

    /// Tear down the provider and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ==================== Internals ====================

    /// Resolve both fields from the store. Absent or unsupported values become
    /// the defaults; a failed read keeps the matching field of `unreadable`.
    fn load_state(&mut self, unreadable: PreferenceState) -> PreferenceState {
        let result = self.store.get(&self.settings.language_key);
        let language = match self.record_storage("read", "language", result) {
            Some(Some(raw)) => Language::from_code(&raw).unwrap_or_else(|_| {
                warn!(
                    "Stored language '{}' is not supported, recovering with '{}'",
                    raw, self.settings.default_language
                );
                self.settings.default_language
            }),
            Some(None) => self.settings.default_language,
            None => unreadable.language,
        };

        let result = self.store.get(&self.settings.theme_key);
        let theme = match self.record_storage("read", "theme", result) {
            Some(Some(raw)) => Theme::from_code(&raw).unwrap_or_else(|_| {
                warn!(
                    "Stored theme '{}' is not supported, recovering with '{}'",
                    raw, self.settings.default_theme
                );
                self.settings.default_theme
            }),
            Some(None) => self.settings.default_theme,
            None => unreadable.theme,
        };

        PreferenceState::new(language, theme)
    }

    /// Log a storage failure once per degraded run; later failures go to debug.
    fn record_storage<T>(
        &mut self,
        operation: &str,
        what: &str,
        result: std::result::Result<T, StorageError>,
    ) -> Option<T> {
        match result {
            Ok(value) => {
                if self.storage_degraded {
                    info!("Preference storage recovered");
                }
                self.storage_degraded = false;
                Some(value)
            }
            Err(e) => {
                if self.storage_degraded {
                    debug!("Storage {} of {} failed again: {}", operation, what, e);
                } else {
                    warn!(
                        "Storage {} of {} failed, continuing in memory only: {}",
                        operation, what, e
                    );
                }
                self.storage_degraded = true;
                None
            }
        }
    }

    fn notify(&mut self) {
        let state = self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
    }
}

fn check_translation_tables() {
    let report = TranslationValidator::validate_parity();
    for warning in &report.warnings {
        warn!("Translation table: {}", warning);
    }
    for err in &report.errors {
        error!("Translation table: {}", err);
    }
    debug_assert!(
        !report.has_errors(),
        "translation tables are inconsistent: {:?}",
        report.errors
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    // ==================== Test Helpers ====================

    /// Store wrapper counting every write and remove.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
        removes: usize,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            self.writes += 1;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> std::result::Result<(), StorageError> {
            self.removes += 1;
            self.inner.remove(key)
        }
    }

    fn lenient() -> ProviderSettings {
        ProviderSettings {
            strict_translations: false,
            ..ProviderSettings::default()
        }
    }

    fn record_states<S: KeyValueStore>(
        provider: &mut PreferenceProvider<S>,
    ) -> Rc<RefCell<Vec<PreferenceState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        provider.subscribe(move |state| sink.borrow_mut().push(*state));
        seen
    }

    // ==================== Initialization Tests ====================

    #[test]
    fn test_empty_store_uses_defaults() {
        let provider = PreferenceProvider::with_defaults(MemoryStore::new());
        assert_eq!(provider.current_language(), Language::Fr);
        assert_eq!(provider.current_theme(), Theme::Light);
        assert!(!provider.is_storage_degraded());
    }

    #[test]
    fn test_loads_stored_values() {
        let store = MemoryStore::with_entries([("tyala_language", "ht"), ("tyala_theme", "dark")]);
        let provider = PreferenceProvider::with_defaults(store);
        assert_eq!(provider.state(), PreferenceState::new(Language::Ht, Theme::Dark));
    }

    #[test]
    fn test_invalid_stored_language_falls_back_independently() {
        let store = MemoryStore::with_entries([("tyala_language", "klingon"), ("tyala_theme", "dark")]);
        let provider = PreferenceProvider::with_defaults(store);
        assert_eq!(provider.current_language(), Language::Fr);
        assert_eq!(provider.current_theme(), Theme::Dark);
    }

    #[test]
    fn test_invalid_stored_theme_falls_back_independently() {
        let store = MemoryStore::with_entries([("tyala_language", "ht"), ("tyala_theme", "neon")]);
        let provider = PreferenceProvider::with_defaults(store);
        assert_eq!(provider.current_language(), Language::Ht);
        assert_eq!(provider.current_theme(), Theme::Light);
    }

    #[test]
    fn test_unavailable_store_uses_defaults() {
        let provider = PreferenceProvider::with_defaults(MemoryStore::unavailable());
        assert_eq!(provider.state(), PreferenceState::default());
        assert!(provider.is_storage_degraded());
    }

    #[test]
    fn test_configured_defaults_and_keys() {
        let settings = ProviderSettings {
            language_key: "lang".to_string(),
            theme_key: "mode".to_string(),
            default_language: Language::Ht,
            default_theme: Theme::Dark,
            strict_translations: false,
        };
        let store = MemoryStore::with_entries([("tyala_language", "fr")]);
        let provider = PreferenceProvider::new(store, settings);
        assert_eq!(provider.state(), PreferenceState::new(Language::Ht, Theme::Dark));
    }

    #[test]
    fn test_construction_does_not_write() {
        let provider = PreferenceProvider::with_defaults(CountingStore::default());
        let store = provider.into_store();
        assert_eq!(store.writes, 0);
        assert!(store.inner.is_empty());
    }

    // ==================== Language Tests ====================

    #[test]
    fn test_set_language_every_member() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        for lang in Language::ALL {
            provider.set_language(lang);
            assert_eq!(provider.current_language(), lang);
            assert_eq!(
                provider.store().get("tyala_language").unwrap().as_deref(),
                Some(lang.code())
            );
        }
    }

    #[test]
    fn test_toggle_language_twice_restores() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        let original = provider.current_language();
        assert_eq!(provider.toggle_language(), original.other());
        assert_eq!(provider.toggle_language(), original);
    }

    #[test]
    fn test_set_language_code_invalid_keeps_state() {
        let mut provider = PreferenceProvider::with_defaults(CountingStore::default());
        let seen = record_states(&mut provider);
        provider.set_language(Language::Ht);

        let result = provider.set_language_code("es");
        assert!(matches!(result, Err(PreferenceError::InvalidLanguage(ref c)) if c == "es"));
        assert_eq!(provider.current_language(), Language::Ht);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(provider.into_store().writes, 1);
    }

    #[test]
    fn test_set_language_code_valid() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        assert_eq!(provider.set_language_code("ht").unwrap(), Language::Ht);
        assert_eq!(provider.current_language(), Language::Ht);
    }

    // ==================== Theme Tests ====================

    #[test]
    fn test_toggle_theme_scenario() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        assert_eq!(provider.current_theme(), Theme::Light);
        provider.toggle_theme();
        assert_eq!(provider.current_theme(), Theme::Dark);
        provider.toggle_theme();
        assert_eq!(provider.current_theme(), Theme::Light);
    }

    #[test]
    fn test_set_theme_code_invalid_keeps_state() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        provider.set_theme(Theme::Dark);
        assert!(matches!(
            provider.set_theme_code("sepia"),
            Err(PreferenceError::InvalidTheme(_))
        ));
        assert_eq!(provider.current_theme(), Theme::Dark);
    }

    #[test]
    fn test_theme_persists_to_new_provider() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        provider.set_theme(Theme::Dark);
        let store = provider.into_store();

        let fresh = PreferenceProvider::with_defaults(store);
        assert_eq!(fresh.current_theme(), Theme::Dark);
    }

    // ==================== Side Effect Tests ====================

    #[test]
    fn test_each_mutator_writes_once_and_notifies_once() {
        let mut provider = PreferenceProvider::with_defaults(CountingStore::default());
        let seen = record_states(&mut provider);

        provider.set_language(Language::Ht);
        provider.toggle_language();
        provider.set_theme(Theme::Dark);
        provider.toggle_theme();

        assert_eq!(seen.borrow().len(), 4);
        assert_eq!(seen.borrow()[0], PreferenceState::new(Language::Ht, Theme::Light));
        assert_eq!(seen.borrow()[3], PreferenceState::new(Language::Fr, Theme::Light));
        assert_eq!(provider.into_store().writes, 4);
    }

    #[test]
    fn test_setting_same_value_still_writes_and_notifies() {
        let mut provider = PreferenceProvider::with_defaults(CountingStore::default());
        let seen = record_states(&mut provider);
        provider.set_theme(Theme::Light);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(provider.into_store().writes, 1);
    }

    #[test]
    fn test_write_failure_still_updates_memory() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::unavailable());
        let seen = record_states(&mut provider);

        provider.set_language(Language::Ht);
        provider.toggle_theme();

        assert_eq!(provider.state(), PreferenceState::new(Language::Ht, Theme::Dark));
        assert_eq!(seen.borrow().len(), 2);
        assert!(provider.is_storage_degraded());
    }

    #[test]
    fn test_storage_recovery_clears_degraded_flag() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::unavailable());
        assert!(provider.is_storage_degraded());

        let mut store = provider.into_store();
        store.set_available(true);
        let mut provider = PreferenceProvider::with_defaults(store);
        provider.set_theme(Theme::Dark);
        assert!(!provider.is_storage_degraded());
    }

    // ==================== Subscription Tests ====================

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        let id = provider.subscribe(move |_| *counter.borrow_mut() += 1);

        provider.toggle_theme();
        assert!(provider.unsubscribe(id));
        provider.toggle_theme();

        assert_eq!(*seen.borrow(), 1);
        assert!(!provider.unsubscribe(id));
        assert_eq!(provider.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_ids_are_distinct() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        let a = provider.subscribe(|_| {});
        let b = provider.subscribe(|_| {});
        assert_ne!(a, b);
        assert!(provider.unsubscribe(a));
        assert_eq!(provider.subscriber_count(), 1);
    }

    // ==================== Translation Tests ====================

    #[test]
    fn test_translate_follows_current_language() {
        let mut provider = PreferenceProvider::new(MemoryStore::new(), lenient());
        assert_eq!(provider.translate_text("nav_home").unwrap(), "Accueil");
        provider.set_language(Language::Ht);
        assert_eq!(provider.translate_text("nav_home").unwrap(), "Akèy");
        assert_eq!(provider.strings().timer_pause, "Poz");
    }

    #[test]
    fn test_translate_list() {
        let provider = PreferenceProvider::new(MemoryStore::new(), lenient());
        let weekdays = provider.translate_list("weekdays").unwrap();
        assert_eq!(weekdays.first(), Some(&"Lundi"));
    }

    #[test]
    fn test_translate_missing_key_is_error() {
        let provider = PreferenceProvider::new(MemoryStore::new(), lenient());
        let result = provider.translate("nav_blog");
        assert!(matches!(
            result,
            Err(PreferenceError::MissingTranslationKey { language: "fr", ref key }) if key == "nav_blog"
        ));
    }

    #[test]
    #[should_panic(expected = "Missing translation key 'nav_blog'")]
    fn test_translate_missing_key_panics_when_strict() {
        let settings = ProviderSettings {
            strict_translations: true,
            ..ProviderSettings::default()
        };
        let provider = PreferenceProvider::new(MemoryStore::new(), settings);
        let _ = provider.translate("nav_blog");
    }

    #[test]
    fn test_translate_wrong_kind() {
        let provider = PreferenceProvider::new(MemoryStore::new(), lenient());
        assert!(matches!(
            provider.translate_text("subjects"),
            Err(PreferenceError::WrongTranslationKind { expected: "text", .. })
        ));
        assert!(matches!(
            provider.translate_list("greeting"),
            Err(PreferenceError::WrongTranslationKind { expected: "list", .. })
        ));
    }

    // ==================== Lifecycle Tests ====================

    #[test]
    fn test_reset_restores_defaults_and_clears_store() {
        let store = MemoryStore::with_entries([("tyala_language", "ht"), ("tyala_theme", "dark")]);
        let mut provider = PreferenceProvider::with_defaults(store);
        let seen = record_states(&mut provider);

        provider.reset();

        assert_eq!(provider.state(), PreferenceState::default());
        assert_eq!(seen.borrow().len(), 1);
        assert!(provider.into_store().is_empty());
    }

    #[test]
    fn test_reload_picks_up_external_change() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        let seen = record_states(&mut provider);
        assert!(!provider.reload());
        assert!(seen.borrow().is_empty());

        provider.store.set("tyala_theme", "dark").unwrap();
        assert!(provider.reload());
        assert_eq!(provider.current_theme(), Theme::Dark);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_reload_keeps_state_when_store_unreadable() {
        let mut provider = PreferenceProvider::with_defaults(MemoryStore::new());
        provider.set_language(Language::Ht);
        provider.set_theme(Theme::Dark);
        let seen = record_states(&mut provider);

        provider.store.set_available(false);
        assert!(!provider.reload());

        assert_eq!(provider.state(), PreferenceState::new(Language::Ht, Theme::Dark));
        assert!(seen.borrow().is_empty());
        assert!(provider.is_storage_degraded());
    }

    #[test]
    fn test_reload_after_store_clear_returns_to_defaults() {
        let mut store = MemoryStore::with_entries([("tyala_language", "ht")]);
        let mut provider = PreferenceProvider::with_defaults(&mut store);
        let seen = record_states(&mut provider);
        assert_eq!(provider.current_language(), Language::Ht);

        provider.store.remove("tyala_language").unwrap();
        assert!(provider.reload());
        assert_eq!(provider.current_language(), Language::Fr);
        assert_eq!(seen.borrow().len(), 1);
    }
}
