//! GitHub public user endpoint as a [`UsernameLookup`].

use std::future::Future;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use labsindex_app::config::SiteConfig;
use labsindex_app::ports::UsernameLookup;
use labsindex_domain::error::LabsIndexError;
use web_sys::AbortController;

use crate::error::WebError;

/// Looks users up with a plain `GET`, aborted after the configured timeout.
#[derive(Clone)]
pub struct GithubLookup {
    config: Rc<SiteConfig>,
}

impl GithubLookup {
    #[must_use]
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self { config }
    }

    async fn fetch_status(&self, username: &str) -> Result<u16, LabsIndexError> {
        let url = self
            .config
            .lookup_url(username)
            .map_err(|err| LabsIndexError::Lookup(Box::new(err)))?;
        let controller = AbortController::new().map_err(WebError::from)?;
        let signal = controller.signal();

        let abort = controller.clone();
        let timeout = Timeout::new(self.config.username_lookup.timeout_ms, move || abort.abort());

        let response = Request::get(url.as_str())
            .abort_signal(Some(&signal))
            .send()
            .await
            .map_err(WebError::from);
        drop(timeout);

        Ok(response?.status())
    }
}

impl UsernameLookup for GithubLookup {
    fn lookup(&self, username: &str) -> impl Future<Output = Result<u16, LabsIndexError>> {
        self.fetch_status(username)
    }
}
