//! Username check — outcome of the best-effort existence lookup.

/// Result of asking the issue tracker whether a username exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameCheck {
    /// The lookup was skipped because the username is malformed.
    NotChecked,
    /// The tracker confirmed the user.
    Exists,
    /// The tracker answered definitively that the user does not exist.
    NotFound,
    /// No definitive answer (network fault, rate limit, timeout…).
    Unknown,
}

impl UsernameCheck {
    /// Classify an HTTP status from the lookup endpoint.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => Self::Exists,
            404 => Self::NotFound,
            _ => Self::Unknown,
        }
    }

    /// Whether the form may still be submitted.
    ///
    /// An unknown answer never blocks the visitor.
    #[must_use]
    pub fn allows_submission(self) -> bool {
        matches!(self, Self::Exists | Self::Unknown)
    }

    /// Inline feedback shown under the username field, if any.
    #[must_use]
    pub fn feedback(self) -> Option<&'static str> {
        match self {
            Self::NotChecked => None,
            Self::Exists => Some("\u{2713} GitHub user verified"),
            Self::NotFound => Some("GitHub user not found."),
            Self::Unknown => Some("\u{26A0} Could not verify username. You may still submit."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_statuses() {
        assert_eq!(UsernameCheck::from_status(200), UsernameCheck::Exists);
        assert_eq!(UsernameCheck::from_status(404), UsernameCheck::NotFound);
        assert_eq!(UsernameCheck::from_status(403), UsernameCheck::Unknown);
        assert_eq!(UsernameCheck::from_status(500), UsernameCheck::Unknown);
    }

    #[test]
    fn should_block_submission_only_when_not_found() {
        assert!(UsernameCheck::Exists.allows_submission());
        assert!(UsernameCheck::Unknown.allows_submission());
        assert!(!UsernameCheck::NotFound.allows_submission());
        assert!(!UsernameCheck::NotChecked.allows_submission());
    }

    #[test]
    fn should_describe_each_answer() {
        assert_eq!(
            UsernameCheck::NotFound.feedback(),
            Some("GitHub user not found.")
        );
        assert!(UsernameCheck::Unknown.feedback().unwrap().contains("still submit"));
        assert_eq!(UsernameCheck::NotChecked.feedback(), None);
    }
}
