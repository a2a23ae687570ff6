//! Browser adapter for the labs index site.
//!
//! Compiled to WebAssembly and loaded by every page. [`boot`] reads the
//! embedded `site.toml`, installs console logging, reconciles the theme and
//! locale against `localStorage` and the browser's ambient preferences, then
//! wires navigation, entrance animations and the access request form.
//!
//! The returned [`SiteHandle`] owns everything that was wired; the page keeps
//! it alive and calls its methods from the theme and language buttons.

pub mod animation;
pub mod document;
pub mod error;
pub mod form;
pub mod github;
pub mod listener;
pub mod logging;
pub mod navigation;
pub mod signals;
pub mod storage;

use std::rc::Rc;

use labsindex_app::bootstrap::Preferences;
use labsindex_app::config::SiteConfig;
use labsindex_app::services::AccessRequestService;
use wasm_bindgen::prelude::*;

use crate::document::{BrowserDocument, page_translations};
use crate::error::WebError;
use crate::form::AccessRequestForm;
use crate::github::GithubLookup;
use crate::navigation::Navigation;
use crate::signals::{MediaQueryColorScheme, NavigatorLanguage};
use crate::storage::{BrowserStore, select_store};

const SITE_CONFIG: &str = include_str!("../site.toml");

/// Everything [`boot`] wired into the page.
#[wasm_bindgen]
pub struct SiteHandle {
    preferences: Preferences<BrowserStore, BrowserDocument>,
    _navigation: Navigation,
    _reveal: Option<animation::Reveal>,
    _form: Option<AccessRequestForm>,
}

#[wasm_bindgen]
impl SiteHandle {
    /// Flip the theme, persist it, and return the new value.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> String {
        self.preferences.theme().toggle().as_str().to_string()
    }

    #[wasm_bindgen(js_name = currentTheme)]
    pub fn current_theme(&self) -> String {
        self.preferences.theme().current().as_str().to_string()
    }

    /// Switch language. Unsupported codes fall back to English; the locale
    /// actually applied is returned.
    #[wasm_bindgen(js_name = setLocale)]
    pub fn set_locale(&self, code: &str) -> String {
        self.preferences.locale().set_locale(code).as_str().to_string()
    }

    #[wasm_bindgen(js_name = currentLocale)]
    pub fn current_locale(&self) -> String {
        self.preferences.locale().current().as_str().to_string()
    }
}

/// Initialize the page. Call once, after the DOM is parsed.
///
/// # Errors
///
/// Fails when the embedded configuration is invalid, when called outside a
/// window, or when a listener cannot be registered.
#[wasm_bindgen]
pub fn boot() -> Result<SiteHandle, JsValue> {
    let config = SiteConfig::from_toml_str(SITE_CONFIG)
        .map_err(|err| JsValue::from_str(&format!("invalid site configuration: {err}")))?;
    let level = config
        .log_level()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    logging::init(level);
    let config = Rc::new(config);

    let window = web_sys::window().ok_or(WebError::Missing("window"))?;
    let document = BrowserDocument::current()?;

    let preferences = Preferences::new(select_store(), document.clone());
    preferences.start(
        &MediaQueryColorScheme::new(),
        &NavigatorLanguage,
        page_translations(),
    );

    let navigation = Navigation::install(&window, document.document())?;
    let reveal = animation::install(&window, document.document(), config.animation.threshold)?;

    let tracker = config
        .issue_tracker()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let service = AccessRequestService::new(GithubLookup::new(Rc::clone(&config)), tracker);
    let form = AccessRequestForm::install(&window, document.document(), service)?;

    tracing::info!(form = form.is_some(), "site ready");
    Ok(SiteHandle {
        preferences,
        _navigation: navigation,
        _reveal: reveal,
        _form: form,
    })
}
