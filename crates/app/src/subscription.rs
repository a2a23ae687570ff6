//! Cancellation handle for ambient signal registrations.

use std::fmt;

/// Keeps a signal registration alive.
///
/// Dropping the handle (or calling [`cancel`](Self::cancel)) unregisters
/// the callback. [`forget`](Self::forget) keeps it registered for the rest
/// of the program, which is the normal lifetime on a page.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the teardown action of a live registration.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that was never registered (platform has no
    /// change notifications).
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Unregister now.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Leave the registration in place for the rest of the program.
    ///
    /// The teardown action is leaked rather than dropped, because it
    /// usually owns the callback the platform still points at.
    pub fn forget(mut self) {
        if let Some(cancel) = self.cancel.take() {
            std::mem::forget(cancel);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
