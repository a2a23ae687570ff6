//! Theme reconciler — merges the stored choice, the OS signal and user toggles.
//!
//! A stored theme always wins and silences the OS signal for the rest of
//! the page's life. Without one, the OS signal drives the theme until the
//! user toggles, at which point the choice is persisted and the OS signal
//! is ignored from then on. A detected theme is never persisted.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use labsindex_domain::preference::PreferenceKey;
use labsindex_domain::theme::Theme;

use crate::ports::{ColorSchemeSignal, PreferenceStore, ThemeSurface};
use crate::subscription::Subscription;

struct Shared<S, D> {
    store: S,
    surface: D,
    manual_override: Cell<bool>,
}

impl<S: PreferenceStore, D: ThemeSurface> Shared<S, D> {
    fn stored_theme(&self) -> Option<Theme> {
        let raw = self.store.get(PreferenceKey::Theme)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::debug!(%err, "ignoring stored theme");
                None
            }
        }
    }

    fn on_os_change(&self, prefers_dark: bool) {
        if self.manual_override.get() {
            tracing::debug!(prefers_dark, "os color scheme change ignored, manual override");
            return;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        tracing::debug!(%theme, "following os color scheme");
        self.surface.apply_theme(theme);
    }
}

/// Owns the active theme for one page.
pub struct ThemeReconciler<S, D> {
    shared: Rc<Shared<S, D>>,
    subscription: RefCell<Option<Subscription>>,
}

impl<S, D> ThemeReconciler<S, D>
where
    S: PreferenceStore + 'static,
    D: ThemeSurface + 'static,
{
    /// Create a reconciler writing to `surface` and persisting to `store`.
    pub fn new(store: S, surface: D) -> Self {
        Self {
            shared: Rc::new(Shared {
                store,
                surface,
                manual_override: Cell::new(false),
            }),
            subscription: RefCell::new(None),
        }
    }

    /// Apply the stored theme (override on) or the OS-derived one
    /// (override off), then follow OS changes.
    ///
    /// Calling this again replaces the previous OS subscription.
    pub fn init(&self, signal: &impl ColorSchemeSignal) -> Theme {
        let theme = if let Some(stored) = self.shared.stored_theme() {
            self.shared.manual_override.set(true);
            stored
        } else {
            self.shared.manual_override.set(false);
            Theme::from_prefers_dark(signal.prefers_dark().unwrap_or(false))
        };
        self.shared.surface.apply_theme(theme);
        tracing::debug!(
            %theme,
            manual_override = self.shared.manual_override.get(),
            "theme initialized"
        );

        let weak = Rc::downgrade(&self.shared);
        let subscription = signal.subscribe(Box::new(move |prefers_dark| {
            if let Some(shared) = weak.upgrade() {
                shared.on_os_change(prefers_dark);
            }
        }));
        let previous = self.subscription.replace(Some(subscription));
        drop(previous);
        theme
    }

    /// Handle an OS color-scheme notification.
    pub fn on_os_change(&self, prefers_dark: bool) {
        self.shared.on_os_change(prefers_dark);
    }

    /// Flip the active theme, persist it, and stop following the OS.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.shared.surface.apply_theme(next);
        self.shared.store.set(PreferenceKey::Theme, next.as_str());
        self.shared.manual_override.set(true);
        tracing::debug!(theme = %next, "theme toggled");
        next
    }

    /// Put `theme` on the document without persisting it or touching the
    /// override flag.
    pub fn apply(&self, theme: Theme) {
        self.shared.surface.apply_theme(theme);
    }

    /// Active theme; `light` if nothing was ever applied.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.shared.surface.applied_theme().unwrap_or_default()
    }

    /// Whether the active theme came from an explicit user choice.
    #[must_use]
    pub fn is_manual_override(&self) -> bool {
        self.shared.manual_override.get()
    }

    /// Whether an OS subscription is currently registered.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Forget everything: override flag, stored choice, document marker,
    /// and the OS subscription. Debug and test isolation only.
    pub fn reset(&self) {
        self.shared.manual_override.set(false);
        self.shared.store.remove(PreferenceKey::Theme);
        self.shared.surface.clear_theme();
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}
