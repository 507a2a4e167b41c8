use crate::i18n::Language;
use crate::preferences::Theme;
use serde::{Deserialize, Serialize};

/// Current language and theme, as owned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreferenceState {
    pub language: Language,
    pub theme: Theme,
}

impl PreferenceState {
    pub fn new(language: Language, theme: Theme) -> Self {
        Self { language, theme }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = PreferenceState::default();
        assert_eq!(state.language, Language::ALL[0]);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_serializes_codes() {
        let state = PreferenceState::new(Language::Ht, Theme::Dark);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"language":"ht","theme":"dark"}"#);
    }
}
