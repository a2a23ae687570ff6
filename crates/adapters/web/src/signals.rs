//! Ambient browser signals: `prefers-color-scheme` and `navigator.language`.

use labsindex_app::ports::{ColorSchemeSignal, LanguageSignal};
use labsindex_app::subscription::Subscription;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MediaQueryList, MediaQueryListEvent};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// The `(prefers-color-scheme: dark)` media query.
pub struct MediaQueryColorScheme {
    query: Option<MediaQueryList>,
}

impl MediaQueryColorScheme {
    /// Browsers without `matchMedia` yield a signal that is always absent.
    #[must_use]
    pub fn new() -> Self {
        let query = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten());
        Self { query }
    }
}

impl Default for MediaQueryColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSignal for MediaQueryColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.query.as_ref().map(MediaQueryList::matches)
    }

    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription {
        let Some(query) = self.query.clone() else {
            return Subscription::inert();
        };
        let callback = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| on_change(event.matches()),
        );

        let modern = query.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref());
        if modern.is_ok() {
            return Subscription::new(move || {
                let _ = query
                    .remove_event_listener_with_callback("change", callback.as_ref().unchecked_ref());
            });
        }

        // Safari < 14 only knows the deprecated listener API.
        match query.add_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref())) {
            Ok(()) => Subscription::new(move || {
                let _ = query.remove_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()));
            }),
            Err(err) => {
                tracing::debug!(error = ?err, "color scheme changes unavailable");
                Subscription::inert()
            }
        }
    }
}

/// `navigator.language`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NavigatorLanguage;

impl LanguageSignal for NavigatorLanguage {
    fn preferred_language(&self) -> Option<String> {
        web_sys::window()?.navigator().language()
    }
}
