//! In-process adapters backed by plain memory.
//!
//! [`MemoryPreferenceStore`] is the fallback used when the browser offers
//! no persistent storage. The other types stand in for the platform when
//! there is no browser at all: prerendering, tests, and debugging.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use labsindex_domain::preference::PreferenceKey;
use labsindex_domain::theme::Theme;

use crate::ports::{ColorSchemeSignal, LanguageSignal, PreferenceStore, TextSurface, ThemeSurface};
use crate::subscription::Subscription;

/// Preferences held for the lifetime of the page only.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<HashMap<PreferenceKey, String>>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.values.borrow().get(&key).cloned()
    }

    fn set(&self, key: PreferenceKey, value: &str) {
        self.values.borrow_mut().insert(key, value.to_string());
    }

    fn remove(&self, key: PreferenceKey) {
        self.values.borrow_mut().remove(&key);
    }
}

/// A medium that is never reachable: reads are absent, writes vanish.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPreferenceStore;

impl PreferenceStore for NullPreferenceStore {
    fn get(&self, _key: PreferenceKey) -> Option<String> {
        None
    }

    fn set(&self, _key: PreferenceKey, _value: &str) {}

    fn remove(&self, _key: PreferenceKey) {}
}

/// A language signal fixed at construction.
#[derive(Debug, Default, Clone)]
pub struct FixedLanguage(pub Option<String>);

impl FixedLanguage {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Some(tag.into()))
    }

    /// The platform does not expose a language.
    #[must_use]
    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl LanguageSignal for FixedLanguage {
    fn preferred_language(&self) -> Option<String> {
        self.0.clone()
    }
}

type Listener = Rc<dyn Fn(bool)>;

#[derive(Default)]
struct SchemeState {
    prefers_dark: Cell<Option<bool>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

/// A color-scheme signal driven by hand.
#[derive(Default)]
pub struct ManualColorScheme {
    state: Rc<SchemeState>,
}

impl ManualColorScheme {
    /// A signal starting at `prefers_dark`; `None` models a platform
    /// without color-scheme support.
    #[must_use]
    pub fn new(prefers_dark: Option<bool>) -> Self {
        let scheme = Self::default();
        scheme.state.prefers_dark.set(prefers_dark);
        scheme
    }

    /// Change the signal and notify every live subscriber.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.state.prefers_dark.set(Some(prefers_dark));
        let listeners: Vec<Listener> = self
            .state
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(prefers_dark);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl ColorSchemeSignal for ManualColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.state.prefers_dark.get()
    }

    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state
            .listeners
            .borrow_mut()
            .push((id, Rc::from(on_change)));

        let state: Weak<SchemeState> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}

#[derive(Debug, Clone)]
struct MemoryElement {
    key: Option<String>,
    text: String,
}

/// A document with a theme marker and a flat list of text elements.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    theme: Cell<Option<Theme>>,
    elements: RefCell<Vec<MemoryElement>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element with an optional translation key. Returns its index.
    pub fn push_element(&self, key: Option<&str>, text: impl Into<String>) -> usize {
        let mut elements = self.elements.borrow_mut();
        elements.push(MemoryElement {
            key: key.map(str::to_string),
            text: text.into(),
        });
        elements.len() - 1
    }

    /// Visible text of the element at `index`.
    #[must_use]
    pub fn text(&self, index: usize) -> Option<String> {
        self.elements.borrow().get(index).map(|el| el.text.clone())
    }

    /// Visible text of every element, in document order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.elements
            .borrow()
            .iter()
            .map(|el| el.text.clone())
            .collect()
    }
}

impl ThemeSurface for MemoryDocument {
    fn apply_theme(&self, theme: Theme) {
        self.theme.set(Some(theme));
    }

    fn applied_theme(&self) -> Option<Theme> {
        self.theme.get()
    }

    fn clear_theme(&self) {
        self.theme.set(None);
    }
}

impl TextSurface for MemoryDocument {
    type Element = usize;

    fn translatable_elements(&self) -> Vec<usize> {
        self.elements
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, el)| el.key.is_some())
            .map(|(index, _)| index)
            .collect()
    }

    fn translation_key(&self, element: &usize) -> Option<String> {
        self.elements
            .borrow()
            .get(*element)
            .and_then(|el| el.key.clone())
    }

    fn set_text(&self, element: &usize, text: &str) {
        if let Some(el) = self.elements.borrow_mut().get_mut(*element) {
            el.text = text.to_string();
        }
    }
}
