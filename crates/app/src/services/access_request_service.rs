//! Access request service — username verification and submission building.

use std::cell::RefCell;

use labsindex_domain::access_request::{
    AccessRequest, Field, FieldError, IssueTracker, RawAccessRequest, is_valid_github_username,
};
use labsindex_domain::error::{LabsIndexError, ValidationError};
use labsindex_domain::username::UsernameCheck;
use url::Url;

use crate::ports::UsernameLookup;

/// A request ready to be filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request: AccessRequest,
    pub issue_url: Url,
}

/// Application service behind the access request form.
pub struct AccessRequestService<L> {
    lookup: L,
    tracker: IssueTracker,
    last_check: RefCell<Option<(String, UsernameCheck)>>,
}

impl<L: UsernameLookup> AccessRequestService<L> {
    /// Create a service filing into `tracker` and verifying through `lookup`.
    pub fn new(lookup: L, tracker: IssueTracker) -> Self {
        Self {
            lookup,
            tracker,
            last_check: RefCell::new(None),
        }
    }

    /// Ask the tracker whether `username` exists.
    ///
    /// Malformed usernames are not sent. Any failure of the lookup itself
    /// (network, timeout, unexpected status) yields
    /// [`UsernameCheck::Unknown`], which still allows submission. The
    /// answer is remembered for [`prepare`](Self::prepare).
    pub async fn check_username(&self, username: &str) -> UsernameCheck {
        let username = username.trim();
        if !is_valid_github_username(username) {
            return UsernameCheck::NotChecked;
        }
        let check = self.lookup_status(username).await;
        *self.last_check.borrow_mut() = Some((username.to_string(), check));
        check
    }

    async fn lookup_status(&self, username: &str) -> UsernameCheck {
        match self.lookup.lookup(username).await {
            Ok(status) => {
                let check = UsernameCheck::from_status(status);
                tracing::debug!(username, status, ?check, "username lookup answered");
                check
            }
            Err(err) => {
                tracing::warn!(username, error = %err, "username lookup failed");
                UsernameCheck::Unknown
            }
        }
    }

    /// Validate, sanitize, and build the pre-filled issue URL.
    ///
    /// # Errors
    ///
    /// Returns [`LabsIndexError::Validation`] listing every failing field,
    /// or only [`FieldError::GithubUserNotFound`] when the last lookup for
    /// this username said it does not exist. Returns
    /// [`LabsIndexError::InvalidUrl`] if the tracker URL is unusable.
    pub fn prepare(&self, raw: &RawAccessRequest) -> Result<Submission, LabsIndexError> {
        let request = AccessRequest::from_form(raw)?;
        if self.known_missing(&request.github) {
            return Err(ValidationError {
                errors: vec![(Field::Github, FieldError::GithubUserNotFound)],
            }
            .into());
        }
        let issue_url = request.issue_url(&self.tracker)?;
        tracing::info!(repo = %request.repo, github = %request.github, "access request prepared");
        Ok(Submission { request, issue_url })
    }

    fn known_missing(&self, username: &str) -> bool {
        self.last_check
            .borrow()
            .as_ref()
            .is_some_and(|(checked, check)| checked == username && !check.allows_submission())
    }
}
