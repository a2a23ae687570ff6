//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod access_request_service;
pub mod locale_reconciler;
pub mod theme_reconciler;

pub use access_request_service::{AccessRequestService, Submission};
pub use locale_reconciler::LocaleReconciler;
pub use theme_reconciler::ThemeReconciler;
