//! Browser-specific error type.
//!
//! `JsValue` is not `Send`, so faults are captured as their debug text.

use labsindex_domain::error::LabsIndexError;
use wasm_bindgen::JsValue;

/// Errors originating from browser APIs.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A DOM or JS call threw.
    #[error("javascript error: {0}")]
    Js(String),

    /// An HTTP request failed before a response arrived.
    #[error("http error: {0}")]
    Http(String),

    /// A required browser object is missing.
    #[error("missing browser object: {0}")]
    Missing(&'static str),
}

/// Why filing an access request did not complete.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The form was refused before anything left the page.
    #[error(transparent)]
    Rejected(#[from] LabsIndexError),

    /// The issue page could not be opened.
    #[error("could not open the issue page: {0}")]
    Open(#[from] WebError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

impl From<gloo_net::Error> for WebError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<WebError> for LabsIndexError {
    fn from(err: WebError) -> Self {
        Self::Lookup(Box::new(err))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
