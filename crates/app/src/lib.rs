//! # labsindex-app
//!
//! Application layer — reconcilers, use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `PreferenceStore` — total get/set/remove of persisted preferences
//!   - `ColorSchemeSignal` / `LanguageSignal` — ambient platform signals
//!   - `ThemeSurface` / `TextSurface` — the parts of the document we mutate
//!   - `UsernameLookup` — best-effort existence check on the issue tracker
//! - Define **driving/inbound** use-cases:
//!   - `ThemeReconciler` — stored choice vs. OS signal vs. user toggle
//!   - `LocaleReconciler` — stored choice vs. detection vs. user selection
//!   - `AccessRequestService` — username check and submission building
//! - Provide **in-process infrastructure** (memory store, manual signals,
//!   in-memory document) that doesn't need a browser
//! - Site configuration loading
//!
//! ## Dependency rule
//! Depends on `labsindex-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.
//!
//! Everything here is single-threaded: shared state lives behind `Rc`.

pub mod bootstrap;
pub mod config;
pub mod memory;
pub mod ports;
pub mod services;
pub mod subscription;
