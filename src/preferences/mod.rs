//! Preference state and the provider that owns it.

mod provider;
mod state;
mod theme;

pub use provider::{
    PreferenceProvider, ProviderSettings, SubscriptionId, DEFAULT_LANGUAGE_KEY, DEFAULT_THEME_KEY,
};
pub use state::PreferenceState;
pub use theme::Theme;
