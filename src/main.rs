//! Command-line access to the stored language and theme preferences.
//!
//! Usage:
//!   tyala-prefs show                    # Print current preferences as JSON
//!   tyala-prefs set-language <fr|ht>
//!   tyala-prefs toggle-language
//!   tyala-prefs set-theme <light|dark>
//!   tyala-prefs toggle-theme
//!   tyala-prefs translate <key>         # Look up a key in the current language
//!   tyala-prefs keys                    # List every translation key
//!   tyala-prefs check                   # Validate translation table parity
//!   tyala-prefs reset                   # Clear stored preferences
//!
//! Optional environment variables:
//! - TYALA_PREFS_PATH (defaults to data/preferences.json)
//! - TYALA_LANGUAGE_KEY / TYALA_THEME_KEY
//! - TYALA_DEFAULT_LANGUAGE / TYALA_DEFAULT_THEME
//! - TYALA_STRICT_TRANSLATIONS

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::{error, info, warn};
use tyala_prefs::config::Config;
use tyala_prefs::i18n::{LanguageRegistry, LanguageStrings, TranslationValidator};
use tyala_prefs::{JsonFileStore, PreferenceProvider};

const USAGE: &str = "Usage: tyala-prefs <show|set-language <code>|toggle-language|set-theme <light|dark>|toggle-theme|translate <key>|keys|check|reset>";

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tyala_prefs=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };
    let argument = args.get(1).map(String::as_str);

    // Commands that never touch the store
    match command.as_str() {
        "keys" => {
            for key in LanguageStrings::KEYS {
                println!("{}", key);
            }
            return Ok(());
        }
        "check" => return check_tables(),
        _ => {}
    }

    let config = Config::from_env()?;
    info!("Using preference file {}", config.storage_path.display());
    let store = JsonFileStore::new(&config.storage_path);
    let mut provider = PreferenceProvider::new(store, config.settings());

    match (command.as_str(), argument) {
        ("show", _) => {}
        ("set-language", Some(code)) => {
            provider.set_language_code(code)?;
        }
        ("toggle-language", _) => {
            provider.toggle_language();
        }
        ("set-theme", Some(code)) => {
            provider.set_theme_code(code)?;
        }
        ("toggle-theme", _) => {
            provider.toggle_theme();
        }
        ("translate", Some(key)) => {
            let value = provider.translate(key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }
        ("reset", _) => {
            provider.reset();
        }
        _ => bail!(USAGE),
    }

    if provider.is_storage_degraded() {
        warn!("Preferences could not be persisted; changes apply to this run only");
    }

    let language = provider.current_language();
    let output = json!({
        "language": language,
        "language_name": LanguageRegistry::get().config(language).native_name,
        "theme": provider.current_theme(),
        "storage": config.storage_path,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to render preferences")?
    );
    Ok(())
}

fn check_tables() -> Result<()> {
    let report = TranslationValidator::validate_parity();

    for warning in &report.warnings {
        warn!("{}", warning);
    }
    for err in &report.errors {
        error!("{}", err);
    }

    if report.has_errors() {
        bail!(
            "Translation tables failed validation with {} error(s)",
            report.errors.len()
        );
    }

    info!(
        "✓ {} keys consistent across {} languages",
        LanguageStrings::KEYS.len(),
        LanguageRegistry::get().list_all().len()
    );
    Ok(())
}
