//! Ambient signal ports — best-effort hints from the platform.

use crate::subscription::Subscription;

/// The OS-level "prefers dark color scheme" signal.
pub trait ColorSchemeSignal {
    /// Current value, or `None` when the platform cannot tell.
    fn prefers_dark(&self) -> Option<bool>;

    /// Register `on_change` for every later change of the signal.
    ///
    /// The registration lasts until the returned [`Subscription`] is
    /// dropped or cancelled. Platforms without change notifications
    /// return an inert subscription.
    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription;
}

/// The OS-level preferred language signal (`navigator.language`).
pub trait LanguageSignal {
    /// Language tag such as `pt-BR`, or `None` when unavailable.
    fn preferred_language(&self) -> Option<String>;
}
