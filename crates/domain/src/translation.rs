//! Translation table — per-page message strings keyed by locale code.
//!
//! Hosting pages supply the table as a plain object of the shape
//! `{ "<locale>": { "<key>": "<text>" } }`. Locales other than the
//! supported ones may be present; they are simply never looked up.
//! Entries of any other shape are dropped one by one and the rest of the
//! table is kept.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::locale::Locale;

/// Two-level mapping: locale code → message key → display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationTable(BTreeMap<String, BTreeMap<String, String>>);

/// A table read from page data, with the paths of the entries that were
/// dropped (`"pt"` for a locale that is not an object, `"pt.count"` for a
/// message that is not a string, `""` when the whole value is not an object).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: TranslationTable,
    pub skipped: Vec<String>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON, keeping every well-formed message.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when `json` is not valid JSON. A
    /// top-level value that is not an object yields an empty table with
    /// everything reported as skipped.
    pub fn from_json(json: &str) -> Result<LoadedTable, serde_json::Error> {
        serde_json::from_str(json).map(Self::from_value)
    }

    /// Build a table from an already-parsed value, dropping malformed entries.
    #[must_use]
    pub fn from_value(value: Value) -> LoadedTable {
        let mut loaded = LoadedTable::default();
        let Value::Object(locales) = value else {
            loaded.skipped.push(String::new());
            return loaded;
        };
        for (code, messages) in locales {
            let Value::Object(messages) = messages else {
                loaded.skipped.push(code);
                continue;
            };
            let mut kept = BTreeMap::new();
            for (key, text) in messages {
                match text {
                    Value::String(text) => {
                        kept.insert(key, text);
                    }
                    _ => loaded.skipped.push(format!("{code}.{key}")),
                }
            }
            loaded.table.0.insert(code, kept);
        }
        loaded
    }

    /// Add or replace one message.
    #[must_use]
    pub fn with(mut self, locale: Locale, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(locale, key, text);
        self
    }

    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, text: impl Into<String>) {
        self.0
            .entry(locale.as_str().to_string())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Whether the table has any messages for `locale`.
    #[must_use]
    pub fn has_locale(&self, locale: Locale) -> bool {
        self.0.contains_key(locale.as_str())
    }

    /// Message for `key` in `locale`, if both exist.
    #[must_use]
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.0
            .get(locale.as_str())
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_lookup_inserted_message() {
        let table = TranslationTable::new().with(Locale::Es, "hero.title", "Hola");
        assert_eq!(table.lookup(Locale::Es, "hero.title"), Some("Hola"));
        assert_eq!(table.lookup(Locale::Es, "missing"), None);
        assert_eq!(table.lookup(Locale::Pt, "hero.title"), None);
    }

    #[test]
    fn should_parse_page_supplied_json() {
        let loaded = TranslationTable::from_json(
            r#"{"en": {"nav.home": "Home"}, "pt": {"nav.home": "Início"}, "fr": {"nav.home": "Accueil"}}"#,
        )
        .unwrap();
        assert!(loaded.skipped.is_empty());
        let table = loaded.table;
        assert_eq!(table.lookup(Locale::Pt, "nav.home"), Some("Início"));
        assert!(table.has_locale(Locale::En));
        assert!(!table.has_locale(Locale::Es));
    }

    #[test]
    fn should_keep_valid_messages_next_to_non_string_ones() {
        let loaded = TranslationTable::from_json(
            r#"{"pt": {"hero.title": "Laboratórios", "count": 3, "note": null}}"#,
        )
        .unwrap();

        assert_eq!(loaded.table.lookup(Locale::Pt, "hero.title"), Some("Laboratórios"));
        assert_eq!(loaded.table.lookup(Locale::Pt, "count"), None);
        assert_eq!(loaded.table.lookup(Locale::Pt, "note"), None);
        assert_eq!(loaded.skipped, vec!["pt.count".to_string(), "pt.note".to_string()]);
    }

    #[test]
    fn should_drop_locale_that_is_not_an_object() {
        let loaded =
            TranslationTable::from_json(r#"{"es": "Hola", "en": {"nav.home": "Home"}}"#).unwrap();

        assert!(!loaded.table.has_locale(Locale::Es));
        assert_eq!(loaded.table.lookup(Locale::En, "nav.home"), Some("Home"));
        assert_eq!(loaded.skipped, vec!["es".to_string()]);
    }

    #[test]
    fn should_report_non_object_table_as_skipped() {
        let loaded = TranslationTable::from_json("[1, 2]").unwrap();
        assert_eq!(loaded.table, TranslationTable::new());
        assert_eq!(loaded.skipped.len(), 1);
    }

    #[test]
    fn should_fail_on_invalid_json() {
        assert!(TranslationTable::from_json("{not json").is_err());
    }

    #[test]
    fn should_keep_empty_string_as_a_present_entry() {
        let table = TranslationTable::new().with(Locale::En, "blank", "");
        assert_eq!(table.lookup(Locale::En, "blank"), Some(""));
    }
}
