//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`LabsIndexError`] via `#[from]`. Reconciler operations never fail, so
//! nothing here is produced by the preference core.

use crate::access_request::{Field, FieldError};

/// Top-level error for operations that can genuinely fail.
#[derive(Debug, thiserror::Error)]
pub enum LabsIndexError {
    /// One or more form fields failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The username lookup could not produce an answer.
    #[error("username lookup failed")]
    Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A configured URL could not be parsed.
    #[error("invalid url")]
    InvalidUrl(#[from] url::ParseError),
}

/// Collected field failures from a form submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<(Field, FieldError)>,
}

impl ValidationError {
    /// The failure for `field`, if that field failed.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, err)| *err)
    }
}

/// A stored or requested theme name that is not `light` or `dark`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}")]
pub struct ParseThemeError(pub String);

/// A locale code that is not one of the supported codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale {0:?}")]
pub struct ParseLocaleError(pub String);
