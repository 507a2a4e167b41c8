//! Translation table validation.
//!
//! The struct layout of `LanguageStrings` already guarantees that every
//! language defines the same fields. This module checks what the compiler
//! cannot: that the string-key lookup covers every key, that values are not
//! empty, and that placeholders and list shapes agree across languages.

use crate::i18n::{Language, LanguageStrings, TranslationValue};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about translation tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Defects that make a table unusable for some key
    pub errors: Vec<String>,

    /// Suspicious differences that do not break lookups
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation table structure.
pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate the built-in tables of every supported language.
    pub fn validate_parity() -> ValidationReport {
        let tables: Vec<(&str, &LanguageStrings)> = Language::ALL
            .iter()
            .map(|lang| (lang.code(), lang.strings()))
            .collect();
        Self::validate_tables(&tables)
    }

    /// Validate a set of named tables against each other.
    ///
    /// The first table is the reference that every other table is compared
    /// with. Checks performed:
    /// - every key in `LanguageStrings::KEYS` resolves (error)
    /// - no text value or list item is empty (error)
    /// - value kinds agree with the reference (error)
    /// - `{placeholder}` sets agree with the reference (error)
    /// - list lengths agree with the reference (warning)
    pub fn validate_tables(tables: &[(&str, &LanguageStrings)]) -> ValidationReport {
        let mut report = ValidationReport::new();
        let Some(&(reference_code, reference)) = tables.first() else {
            return report;
        };

        for &(code, strings) in tables {
            for key in LanguageStrings::KEYS {
                let Some(value) = strings.get(key) else {
                    report
                        .errors
                        .push(format!("Key '{}' does not resolve for '{}'", key, code));
                    continue;
                };

                if Self::has_empty_text(&value) {
                    report
                        .errors
                        .push(format!("Key '{}' has an empty value for '{}'", key, code));
                }

                if code == reference_code {
                    continue;
                }
                let Some(expected) = reference.get(key) else {
                    continue;
                };
                report.merge(Self::compare_values(key, reference_code, &expected, code, &value));
            }
        }

        report
    }

    /// Compare two key sets and report keys present on only one side.
    ///
    /// Useful for tables assembled at runtime (for example, loaded from a
    /// file) where the struct layout cannot enforce parity.
    pub fn validate_keys(
        left_name: &str,
        left: &[&str],
        right_name: &str,
        right: &[&str],
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        let left_set: BTreeSet<&str> = left.iter().copied().collect();
        let right_set: BTreeSet<&str> = right.iter().copied().collect();

        for key in left_set.difference(&right_set) {
            report.errors.push(format!(
                "Key '{}' present for '{}' but missing for '{}'",
                key, left_name, right_name
            ));
        }
        for key in right_set.difference(&left_set) {
            report.errors.push(format!(
                "Key '{}' present for '{}' but missing for '{}'",
                key, right_name, left_name
            ));
        }

        report
    }

    fn compare_values(
        key: &str,
        expected_code: &str,
        expected: &TranslationValue,
        actual_code: &str,
        actual: &TranslationValue,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        match (expected, actual) {
            (TranslationValue::Text(a), TranslationValue::Text(b)) => {
                let expected_placeholders = Self::extract_placeholders(a);
                let actual_placeholders = Self::extract_placeholders(b);
                if expected_placeholders != actual_placeholders {
                    report.errors.push(format!(
                        "Placeholder mismatch for '{}': '{}' has {:?}, '{}' has {:?}",
                        key, expected_code, expected_placeholders, actual_code, actual_placeholders
                    ));
                }
            }
            (TranslationValue::List(a), TranslationValue::List(b)) => {
                if a.len() != b.len() {
                    report.warnings.push(format!(
                        "List length mismatch for '{}': '{}' has {}, '{}' has {}",
                        key,
                        expected_code,
                        a.len(),
                        actual_code,
                        b.len()
                    ));
                }
            }
            _ => {
                report.errors.push(format!(
                    "Kind mismatch for '{}': '{}' is {}, '{}' is {}",
                    key,
                    expected_code,
                    expected.kind(),
                    actual_code,
                    actual.kind()
                ));
            }
        }

        report
    }

    fn has_empty_text(value: &TranslationValue) -> bool {
        match value {
            TranslationValue::Text(text) => text.trim().is_empty(),
            TranslationValue::List(items) => {
                items.is_empty() || items.iter().any(|item| item.trim().is_empty())
            }
        }
    }

    /// Extract all `{placeholder}` names from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
