//! Access request — the single form on the site.
//!
//! A visitor asks for access to one of the lab repositories. The request
//! is validated and sanitized client-side, then turned into a pre-filled
//! "new issue" URL on the issue tracker.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{LabsIndexError, ValidationError};

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap());

/// Longest username the issue tracker accepts.
pub const MAX_USERNAME_LEN: usize = 39;

/// Strip every `<…>` tag and trim surrounding whitespace.
#[must_use]
pub fn sanitize_input(value: &str) -> String {
    TAG.replace_all(value, "").trim().to_string()
}

/// One `@`, a non-empty local part, and a dot somewhere in the domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// ASCII alphanumerics separated by single hyphens, at most
/// [`MAX_USERNAME_LEN`] characters.
#[must_use]
pub fn is_valid_github_username(username: &str) -> bool {
    username.len() <= MAX_USERNAME_LEN && USERNAME.is_match(username)
}

/// Input on the access request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Github,
    Repo,
    Reason,
}

impl Field {
    /// Every field, in page order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Github,
        Self::Repo,
        Self::Reason,
    ];

    /// DOM id of the input.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Github => "github",
            Self::Repo => "repo",
            Self::Reason => "reason",
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidGithubUsername,
    /// The issue tracker answered that the username does not exist.
    GithubUserNotFound,
}

impl FieldError {
    /// Inline message shown next to the field.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Required => "This field is required.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::InvalidGithubUsername => "Please enter a valid GitHub username.",
            Self::GithubUserNotFound => "GitHub user not found.",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validate one raw input value.
///
/// # Errors
///
/// Returns the first rule the trimmed value breaks. Every field is required.
pub fn validate_field(field: Field, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    match field {
        Field::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        Field::Github if !is_valid_github_username(value) => {
            Err(FieldError::InvalidGithubUsername)
        }
        _ => Ok(()),
    }
}

/// Form values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAccessRequest {
    pub name: String,
    pub email: String,
    pub github: String,
    pub repo: String,
    pub reason: String,
}

impl RawAccessRequest {
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Github => &self.github,
            Field::Repo => &self.repo,
            Field::Reason => &self.reason,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Github => self.github = value,
            Field::Repo => self.repo = value,
            Field::Reason => self.reason = value,
        }
    }
}

/// Where access requests are filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTracker {
    pub new_issue_url: Url,
    pub label: String,
}

/// A validated, sanitized access request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub name: String,
    pub email: String,
    pub github: String,
    pub repo: String,
    pub reason: String,
}

impl AccessRequest {
    /// Validate every field, then sanitize the values.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every failing field.
    pub fn from_form(raw: &RawAccessRequest) -> Result<Self, ValidationError> {
        let errors: Vec<_> = Field::ALL
            .into_iter()
            .filter_map(|field| {
                validate_field(field, raw.value(field))
                    .err()
                    .map(|err| (field, err))
            })
            .collect();
        if !errors.is_empty() {
            return Err(ValidationError { errors });
        }
        Ok(Self {
            name: sanitize_input(&raw.name),
            email: sanitize_input(&raw.email),
            github: sanitize_input(&raw.github),
            repo: sanitize_input(&raw.repo),
            reason: sanitize_input(&raw.reason),
        })
    }

    #[must_use]
    pub fn issue_title(&self) -> String {
        format!("Access Request: {} - {}", self.repo, self.github)
    }

    #[must_use]
    pub fn issue_body(&self) -> String {
        format!(
            "**Name:** {}\n**Email:** {}\n**GitHub Username:** {}\n**Repository:** {}\n**Reason:** {}",
            self.name, self.email, self.github, self.repo, self.reason
        )
    }

    /// Pre-filled "new issue" URL for this request.
    ///
    /// # Errors
    ///
    /// Returns [`LabsIndexError::InvalidUrl`] if the tracker URL cannot
    /// take query parameters.
    pub fn issue_url(&self, tracker: &IssueTracker) -> Result<Url, LabsIndexError> {
        let url = Url::parse_with_params(
            tracker.new_issue_url.as_str(),
            &[
                ("title", self.issue_title().as_str()),
                ("body", self.issue_body().as_str()),
                ("labels", tracker.label.as_str()),
            ],
        )?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_raw() -> RawAccessRequest {
        RawAccessRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            github: "ada-l".to_string(),
            repo: "cloud-devops-labs-100".to_string(),
            reason: "Student - Spring 2025".to_string(),
        }
    }

    fn tracker() -> IssueTracker {
        IssueTracker {
            new_issue_url: Url::parse("https://github.com/acme/labs/issues/new").unwrap(),
            label: "access-request".to_string(),
        }
    }

    #[test]
    fn should_strip_tags_and_trim() {
        assert_eq!(sanitize_input("  <b>Ada</b> "), "Ada");
        assert_eq!(sanitize_input("<script>alert(1)</script>x"), "alert(1)x");
        assert_eq!(sanitize_input("a < b"), "a < b");
        assert_eq!(sanitize_input(""), "");
    }

    #[test]
    fn should_accept_well_formed_emails() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
    }

    #[test]
    fn should_reject_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("ada @example.com"));
    }

    #[test]
    fn should_accept_valid_usernames() {
        assert!(is_valid_github_username("a"));
        assert!(is_valid_github_username("octo-cat"));
        assert!(is_valid_github_username("A1-b2-C3"));
        assert!(is_valid_github_username(&"a".repeat(39)));
    }

    #[test]
    fn should_reject_invalid_usernames() {
        assert!(!is_valid_github_username(""));
        assert!(!is_valid_github_username("-octo"));
        assert!(!is_valid_github_username("octo-"));
        assert!(!is_valid_github_username("octo--cat"));
        assert!(!is_valid_github_username("octo_cat"));
        assert!(!is_valid_github_username(&"a".repeat(40)));
        assert!(!is_valid_github_username("ñandú"));
    }

    #[test]
    fn should_require_every_field() {
        for field in Field::ALL {
            assert_eq!(validate_field(field, "   "), Err(FieldError::Required));
        }
    }

    #[test]
    fn should_validate_email_and_username_formats() {
        assert_eq!(
            validate_field(Field::Email, "nope"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(
            validate_field(Field::Github, "bad--name"),
            Err(FieldError::InvalidGithubUsername)
        );
        assert_eq!(validate_field(Field::Github, " good-name "), Ok(()));
        assert_eq!(validate_field(Field::Name, "anything at all"), Ok(()));
    }

    #[test]
    fn should_map_field_ids() {
        assert_eq!(Field::Github.id(), "github");
        assert_eq!(Field::Reason.id(), "reason");
    }

    #[test]
    fn should_collect_every_failing_field() {
        let mut raw = valid_raw();
        raw.email = "broken".to_string();
        raw.repo = String::new();

        let err = AccessRequest::from_form(&raw).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.for_field(Field::Email), Some(FieldError::InvalidEmail));
        assert_eq!(err.for_field(Field::Repo), Some(FieldError::Required));
    }

    #[test]
    fn should_sanitize_values_after_validation() {
        let mut raw = valid_raw();
        raw.name = " <i>Ada</i> Lovelace ".to_string();
        let request = AccessRequest::from_form(&raw).unwrap();
        assert_eq!(request.name, "Ada Lovelace");
    }

    #[test]
    fn should_build_issue_url_with_title_body_and_label() {
        let request = AccessRequest::from_form(&valid_raw()).unwrap();
        let url = request.issue_url(&tracker()).unwrap();

        assert_eq!(url.path(), "/acme/labs/issues/new");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs[0],
            (
                "title".to_string(),
                "Access Request: cloud-devops-labs-100 - ada-l".to_string()
            )
        );
        assert_eq!(pairs[1].0, "body");
        assert!(pairs[1].1.starts_with("**Name:** Ada Lovelace\n**Email:** ada@example.com"));
        assert!(pairs[1].1.ends_with("**Reason:** Student - Spring 2025"));
        assert_eq!(
            pairs[2],
            ("labels".to_string(), "access-request".to_string())
        );
    }

    #[test]
    fn should_set_and_read_raw_values_by_field() {
        let mut raw = RawAccessRequest::default();
        raw.set(Field::Github, "octo");
        assert_eq!(raw.value(Field::Github), "octo");
        assert_eq!(raw.value(Field::Name), "");
    }
}
