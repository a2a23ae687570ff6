//! Locale reconciler — stored choice, detection, and the substitution pass.
//!
//! Unlike the theme, a detected locale is persisted immediately on first
//! visit: there is no "ambient" locale state.

use std::cell::{Cell, RefCell};

use labsindex_domain::locale::Locale;
use labsindex_domain::preference::PreferenceKey;
use labsindex_domain::translation::TranslationTable;

use crate::ports::{LanguageSignal, PreferenceStore, TextSurface};

/// Owns the active locale and the page's translation table.
pub struct LocaleReconciler<S, D> {
    store: S,
    surface: D,
    current: Cell<Locale>,
    table: RefCell<Option<TranslationTable>>,
}

impl<S: PreferenceStore, D: TextSurface> LocaleReconciler<S, D> {
    /// Create a reconciler translating `surface` and persisting to `store`.
    pub fn new(store: S, surface: D) -> Self {
        Self {
            store,
            surface,
            current: Cell::new(Locale::default()),
            table: RefCell::new(None),
        }
    }

    /// Adopt the page's table, resolve the locale, and translate the page.
    ///
    /// A stored supported code wins. Otherwise the ambient language is
    /// detected and the result persisted right away. Without a table the
    /// locale is still tracked; only the substitution pass is skipped.
    pub fn init(&self, table: Option<TranslationTable>, language: &impl LanguageSignal) -> Locale {
        *self.table.borrow_mut() = table;

        let stored = self
            .store
            .get(PreferenceKey::Locale)
            .and_then(|code| Locale::from_code(&code));
        let locale = if let Some(locale) = stored {
            locale
        } else {
            let tag = language.preferred_language();
            let detected = Locale::detect(tag.as_deref());
            tracing::debug!(tag = ?tag, locale = %detected, "locale detected");
            self.store.set(PreferenceKey::Locale, detected.as_str());
            detected
        };

        self.current.set(locale);
        self.translate(locale);
        locale
    }

    /// Switch to `code`, coercing unsupported codes to `en`.
    pub fn set_locale(&self, code: &str) -> Locale {
        let locale = Locale::coerce(code);
        if locale.as_str() != code {
            tracing::debug!(requested = code, "unsupported locale, using {locale}");
        }
        self.set(locale);
        locale
    }

    /// Switch to `locale`: persist, activate, and re-translate.
    pub fn set(&self, locale: Locale) {
        self.current.set(locale);
        self.store.set(PreferenceKey::Locale, locale.as_str());
        self.translate(locale);
    }

    /// Active locale; `en` before initialization.
    #[must_use]
    pub fn current(&self) -> Locale {
        self.current.get()
    }

    /// Substitution pass for `locale`.
    ///
    /// Elements whose key has no entry keep their current text. Running the
    /// pass again with the same inputs changes nothing.
    pub fn translate(&self, locale: Locale) {
        let table = self.table.borrow();
        let Some(table) = table.as_ref() else {
            return;
        };
        if !table.has_locale(locale) {
            tracing::debug!(%locale, "no messages for locale");
            return;
        }

        let mut replaced = 0_usize;
        for element in self.surface.translatable_elements() {
            let Some(key) = self.surface.translation_key(&element) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            if let Some(text) = table.lookup(locale, &key) {
                self.surface.set_text(&element, text);
                replaced += 1;
            }
        }
        tracing::debug!(%locale, replaced, "page translated");
    }

    /// Back to `en` with no table and no stored choice. Debug and test
    /// isolation only; the page text is left as it is.
    pub fn reset(&self) {
        self.current.set(Locale::default());
        *self.table.borrow_mut() = None;
        self.store.remove(PreferenceKey::Locale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::memory::{FixedLanguage, MemoryDocument, MemoryPreferenceStore, NullPreferenceStore};

    type Reconciler = LocaleReconciler<Rc<MemoryPreferenceStore>, Rc<MemoryDocument>>;

    fn make_reconciler() -> (Reconciler, Rc<MemoryPreferenceStore>, Rc<MemoryDocument>) {
        let store = Rc::new(MemoryPreferenceStore::new());
        let doc = Rc::new(MemoryDocument::new());
        let reconciler = LocaleReconciler::new(Rc::clone(&store), Rc::clone(&doc));
        (reconciler, store, doc)
    }

    fn table() -> TranslationTable {
        TranslationTable::new()
            .with(Locale::En, "title", "Labs")
            .with(Locale::Es, "title", "Laboratorios")
            .with(Locale::Pt, "title", "Laboratórios")
            .with(Locale::Pt, "cta", "Solicitar acesso")
    }

    #[test]
    fn should_default_to_english_before_init() {
        let (reconciler, _, _) = make_reconciler();
        assert_eq!(reconciler.current(), Locale::En);
    }

    #[test]
    fn should_detect_and_persist_when_nothing_stored() {
        let (reconciler, store, doc) = make_reconciler();
        let title = doc.push_element(Some("title"), "Labs");
        let footer = doc.push_element(Some("footer"), "Footer");

        let locale = reconciler.init(Some(table()), &FixedLanguage::new("pt-BR"));

        assert_eq!(locale, Locale::Pt);
        assert_eq!(store.get(PreferenceKey::Locale).as_deref(), Some("pt"));
        assert_eq!(doc.text(title).as_deref(), Some("Laboratórios"));
        assert_eq!(doc.text(footer).as_deref(), Some("Footer"));
    }

    #[test]
    fn should_use_stored_locale_over_detection() {
        let (reconciler, store, _) = make_reconciler();
        store.set(PreferenceKey::Locale, "es");

        let locale = reconciler.init(None, &FixedLanguage::new("pt-BR"));
        assert_eq!(locale, Locale::Es);
    }

    #[test]
    fn should_redetect_when_stored_locale_is_unsupported() {
        let (reconciler, store, _) = make_reconciler();
        store.set(PreferenceKey::Locale, "fr");

        let locale = reconciler.init(None, &FixedLanguage::new("es-AR"));
        assert_eq!(locale, Locale::Es);
        assert_eq!(store.get(PreferenceKey::Locale).as_deref(), Some("es"));
    }

    #[test]
    fn should_fall_back_to_english_without_language_signal() {
        let (reconciler, store, _) = make_reconciler();
        let locale = reconciler.init(None, &FixedLanguage::unavailable());
        assert_eq!(locale, Locale::En);
        assert_eq!(store.get(PreferenceKey::Locale).as_deref(), Some("en"));
    }

    #[test]
    fn should_track_locale_without_table() {
        let (reconciler, _, doc) = make_reconciler();
        let title = doc.push_element(Some("title"), "Labs");

        reconciler.init(None, &FixedLanguage::new("en"));
        reconciler.set(Locale::Es);

        assert_eq!(reconciler.current(), Locale::Es);
        assert_eq!(doc.text(title).as_deref(), Some("Labs"));
    }

    #[test]
    fn should_coerce_unsupported_selection_to_english() {
        let (reconciler, store, _) = make_reconciler();
        reconciler.init(None, &FixedLanguage::new("pt"));

        assert_eq!(reconciler.set_locale("de"), Locale::En);
        assert_eq!(reconciler.current(), Locale::En);
        assert_eq!(store.get(PreferenceKey::Locale).as_deref(), Some("en"));
    }

    #[test]
    fn should_retranslate_on_selection() {
        let (reconciler, _, doc) = make_reconciler();
        let title = doc.push_element(Some("title"), "Labs");
        reconciler.init(Some(table()), &FixedLanguage::new("en"));

        reconciler.set_locale("es");
        assert_eq!(doc.text(title).as_deref(), Some("Laboratorios"));
        reconciler.set_locale("en");
        assert_eq!(doc.text(title).as_deref(), Some("Labs"));
    }

    #[test]
    fn should_leave_text_when_locale_missing_from_table() {
        let (reconciler, _, doc) = make_reconciler();
        let title = doc.push_element(Some("title"), "Original");
        let partial = TranslationTable::new().with(Locale::En, "title", "Labs");

        reconciler.init(Some(partial), &FixedLanguage::new("es"));
        assert_eq!(doc.text(title).as_deref(), Some("Original"));
    }

    #[test]
    fn should_skip_elements_with_empty_keys() {
        let (reconciler, _, doc) = make_reconciler();
        let blank = doc.push_element(Some(""), "Keep me");
        let table = TranslationTable::new().with(Locale::En, "", "Replaced");

        reconciler.init(Some(table), &FixedLanguage::new("en"));
        assert_eq!(doc.text(blank).as_deref(), Some("Keep me"));
    }

    #[test]
    fn should_be_idempotent() {
        let (reconciler, _, doc) = make_reconciler();
        doc.push_element(Some("title"), "Labs");
        doc.push_element(Some("cta"), "Request access");
        doc.push_element(None, "static");
        reconciler.init(Some(table()), &FixedLanguage::new("pt"));

        let once = doc.texts();
        reconciler.translate(Locale::Pt);
        assert_eq!(doc.texts(), once);
    }

    #[test]
    fn should_preview_without_persisting() {
        let (reconciler, store, doc) = make_reconciler();
        let title = doc.push_element(Some("title"), "Labs");
        reconciler.init(Some(table()), &FixedLanguage::new("en"));

        reconciler.translate(Locale::Es);
        assert_eq!(doc.text(title).as_deref(), Some("Laboratorios"));
        assert_eq!(reconciler.current(), Locale::En);
        assert_eq!(store.get(PreferenceKey::Locale).as_deref(), Some("en"));
    }

    #[test]
    fn should_work_without_storage() {
        let reconciler = LocaleReconciler::new(NullPreferenceStore, MemoryDocument::new());
        assert_eq!(
            reconciler.init(None, &FixedLanguage::new("es")),
            Locale::Es
        );
        reconciler.set(Locale::Pt);
        assert_eq!(reconciler.current(), Locale::Pt);
    }

    #[test]
    fn should_clear_state_on_reset() {
        let (reconciler, store, doc) = make_reconciler();
        reconciler.init(Some(table()), &FixedLanguage::new("pt"));

        reconciler.reset();
        let heading = doc.push_element(Some("title"), "Labs");
        reconciler.translate(Locale::Pt);

        assert_eq!(reconciler.current(), Locale::En);
        assert_eq!(doc.text(heading).as_deref(), Some("Labs"));
        assert_eq!(store.get(PreferenceKey::Locale), None);
    }

    #[test]
    fn should_translate_valid_keys_of_partly_malformed_table() {
        let (reconciler, _, doc) = make_reconciler();
        let title = doc.push_element(Some("title"), "Labs");
        let count = doc.push_element(Some("count"), "3 labs");
        let loaded = TranslationTable::from_json(
            r#"{"pt": {"title": "Laboratórios", "count": 3}, "es": null}"#,
        )
        .unwrap();

        reconciler.init(Some(loaded.table), &FixedLanguage::new("pt-BR"));

        assert_eq!(doc.text(title).as_deref(), Some("Laboratórios"));
        assert_eq!(doc.text(count).as_deref(), Some("3 labs"));
        assert_eq!(loaded.skipped, vec!["es".to_string(), "pt.count".to_string()]);
    }
}
