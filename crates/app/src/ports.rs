//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod document;
pub mod signal;
pub mod storage;
pub mod username_lookup;

pub use document::{TextSurface, ThemeSurface};
pub use signal::{ColorSchemeSignal, LanguageSignal};
pub use storage::PreferenceStore;
pub use username_lookup::UsernameLookup;
