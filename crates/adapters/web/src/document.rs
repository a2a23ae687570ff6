//! The live page as a theme and text surface.

use labsindex_app::ports::{TextSurface, ThemeSurface};
use labsindex_domain::theme::Theme;
use labsindex_domain::translation::TranslationTable;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::error::WebError;

const TRANSLATABLE: &str = "[data-i18n]";
const KEY_ATTR: &str = "data-i18n";
const TRANSLATIONS_GLOBAL: &str = "PAGE_TRANSLATIONS";

/// Handle to `window.document`.
#[derive(Clone)]
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    /// The current page's document.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Missing`] outside a window context.
    pub fn current() -> Result<Self, WebError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(WebError::Missing("document"))?;
        Ok(Self { document })
    }

    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn root(&self) -> Option<HtmlElement> {
        self.document
            .document_element()
            .map(JsCast::unchecked_into::<HtmlElement>)
    }
}

impl ThemeSurface for BrowserDocument {
    fn apply_theme(&self, theme: Theme) {
        if let Some(root) = self.root() {
            let _ = root.dataset().set("theme", theme.as_str());
        }
    }

    fn applied_theme(&self) -> Option<Theme> {
        self.root()?.dataset().get("theme")?.parse().ok()
    }

    fn clear_theme(&self) {
        if let Some(root) = self.root() {
            let _ = root.remove_attribute("data-theme");
        }
    }
}

impl TextSurface for BrowserDocument {
    type Element = Element;

    fn translatable_elements(&self) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(TRANSLATABLE) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn translation_key(&self, element: &Element) -> Option<String> {
        element.get_attribute(KEY_ATTR)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }
}

/// The page's `window.PAGE_TRANSLATIONS` table, if it defines a usable one.
///
/// Malformed entries are logged and dropped; the rest of the table is kept.
#[must_use]
pub fn page_translations() -> Option<TranslationTable> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(TRANSLATIONS_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        tracing::debug!("page defines no translations");
        return None;
    }
    let json: String = match js_sys::JSON::stringify(&value) {
        Ok(json) => json.into(),
        Err(err) => {
            tracing::warn!(error = ?err, "translations are not serializable");
            return None;
        }
    };
    match TranslationTable::from_json(&json) {
        Ok(loaded) => {
            if !loaded.skipped.is_empty() {
                tracing::warn!(skipped = ?loaded.skipped, "dropped malformed translation entries");
            }
            Some(loaded.table)
        }
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable translations");
            None
        }
    }
}
