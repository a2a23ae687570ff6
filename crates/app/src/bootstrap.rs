//! Page bootstrap — one owned pair of reconcilers per page.
//!
//! [`Preferences`] is built once at program start from a shared store and
//! the document, and handed to whatever needs to read or change the theme
//! or locale. There is no global instance.

use labsindex_domain::locale::Locale;
use labsindex_domain::theme::Theme;
use labsindex_domain::translation::TranslationTable;

use crate::ports::{ColorSchemeSignal, LanguageSignal, PreferenceStore, TextSurface, ThemeSurface};
use crate::services::{LocaleReconciler, ThemeReconciler};

/// The theme and locale reconcilers of one page.
pub struct Preferences<S, D> {
    theme: ThemeReconciler<S, D>,
    locale: LocaleReconciler<S, D>,
}

impl<S, D> Preferences<S, D>
where
    S: PreferenceStore + Clone + 'static,
    D: ThemeSurface + TextSurface + Clone + 'static,
{
    /// Both reconcilers share `store` and `document`; pass cheap handles
    /// (`Rc`, browser object references).
    pub fn new(store: S, document: D) -> Self {
        Self {
            theme: ThemeReconciler::new(store.clone(), document.clone()),
            locale: LocaleReconciler::new(store, document),
        }
    }

    /// Initialize the theme, then the locale.
    pub fn start(
        &self,
        color_scheme: &impl ColorSchemeSignal,
        language: &impl LanguageSignal,
        translations: Option<TranslationTable>,
    ) -> (Theme, Locale) {
        let theme = self.theme.init(color_scheme);
        let locale = self.locale.init(translations, language);
        tracing::info!(%theme, %locale, "preferences ready");
        (theme, locale)
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeReconciler<S, D> {
        &self.theme
    }

    #[must_use]
    pub fn locale(&self) -> &LocaleReconciler<S, D> {
        &self.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use labsindex_domain::preference::PreferenceKey;

    use crate::memory::{FixedLanguage, ManualColorScheme, MemoryDocument, MemoryPreferenceStore};

    #[test]
    fn should_start_both_reconcilers_over_shared_store() {
        let store = Rc::new(MemoryPreferenceStore::new());
        let doc = Rc::new(MemoryDocument::new());
        let title = doc.push_element(Some("title"), "Labs");
        let prefs = Preferences::new(Rc::clone(&store), Rc::clone(&doc));

        let table = TranslationTable::new().with(Locale::Es, "title", "Laboratorios");
        let started = prefs.start(
            &ManualColorScheme::new(Some(true)),
            &FixedLanguage::new("es-ES"),
            Some(table),
        );

        assert_eq!(started, (Theme::Dark, Locale::Es));
        assert_eq!(doc.applied_theme(), Some(Theme::Dark));
        assert_eq!(doc.text(title).as_deref(), Some("Laboratorios"));
        assert_eq!(store.get(PreferenceKey::Theme), None);
        assert_eq!(store.get(PreferenceKey::Locale).as_deref(), Some("es"));
    }

    #[test]
    fn should_expose_reconcilers_by_reference() {
        let prefs = Preferences::new(
            Rc::new(MemoryPreferenceStore::new()),
            Rc::new(MemoryDocument::new()),
        );
        prefs.start(
            &ManualColorScheme::new(None),
            &FixedLanguage::unavailable(),
            None,
        );

        prefs.theme().toggle();
        prefs.locale().set_locale("pt");

        assert_eq!(prefs.theme().current(), Theme::Dark);
        assert_eq!(prefs.locale().current(), Locale::Pt);
    }
}
