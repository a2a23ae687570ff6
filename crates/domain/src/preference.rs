//! Preference keys — the names under which choices are persisted.

use std::fmt;

/// Identifier of a persisted preference.
///
/// The storage layout is two literal string keys with no versioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Theme,
    Locale,
}

impl PreferenceKey {
    /// Storage key as written to the backing medium.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Locale => "locale",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
