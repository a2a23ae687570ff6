//! Locale — the display language of the site.
//!
//! Three codes are supported. Every other input collapses to
//! [`Locale::En`]; nothing in this module rejects input except the
//! explicit [`FromStr`] parse used to recognise stored values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLocaleError;

/// Supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Pt,
}

impl Locale {
    /// Every supported locale.
    pub const SUPPORTED: [Self; 3] = [Self::En, Self::Es, Self::Pt];

    /// Code written to storage and used to index translation tables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Pt => "pt",
        }
    }

    /// Exact match against a supported code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|l| l.as_str() == code)
    }

    /// Like [`from_code`](Self::from_code) but unsupported codes become `en`.
    #[must_use]
    pub fn coerce(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    /// Map an ambient language tag (`navigator.language`) to a locale.
    ///
    /// Case-insensitive prefix match: `es…` → `es`, `pt…` → `pt`, anything
    /// else (including an absent or empty tag) → `en`.
    #[must_use]
    pub fn detect(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::En;
        };
        let lower = tag.to_lowercase();
        if lower.starts_with("es") {
            Self::Es
        } else if lower.starts_with("pt") {
            Self::Pt
        } else {
            Self::En
        }
    }
}

/// Shorthand for [`Locale::detect`] on a present tag.
#[must_use]
pub fn detect_locale(tag: &str) -> Locale {
    Locale::detect(Some(tag))
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ParseLocaleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_english() {
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn should_detect_spanish_variants() {
        assert_eq!(detect_locale("es"), Locale::Es);
        assert_eq!(detect_locale("es-MX"), Locale::Es);
        assert_eq!(detect_locale("ES-es"), Locale::Es);
    }

    #[test]
    fn should_detect_portuguese_variants() {
        assert_eq!(detect_locale("pt-BR"), Locale::Pt);
        assert_eq!(detect_locale("PT"), Locale::Pt);
    }

    #[test]
    fn should_fall_back_to_english_for_other_tags() {
        assert_eq!(detect_locale("fr-FR"), Locale::En);
        assert_eq!(detect_locale("de"), Locale::En);
        assert_eq!(detect_locale("en-US"), Locale::En);
        assert_eq!(detect_locale(""), Locale::En);
        assert_eq!(detect_locale("e"), Locale::En);
        assert_eq!(Locale::detect(None), Locale::En);
    }

    #[test]
    fn should_not_match_prefix_in_the_middle() {
        assert_eq!(detect_locale("x-es"), Locale::En);
        assert_eq!(detect_locale(" pt"), Locale::En);
    }

    #[test]
    fn should_accept_only_exact_supported_codes() {
        assert_eq!(Locale::from_code("pt"), Some(Locale::Pt));
        assert_eq!(Locale::from_code("PT"), None);
        assert_eq!(Locale::from_code("pt-BR"), None);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn should_coerce_unsupported_codes_to_english() {
        assert_eq!(Locale::coerce("es"), Locale::Es);
        assert_eq!(Locale::coerce("fr"), Locale::En);
        assert_eq!(Locale::coerce(""), Locale::En);
    }
}
