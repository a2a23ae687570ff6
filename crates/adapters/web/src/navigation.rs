//! Sticky navigation bar and the mobile menu overlay.

use std::cell::Cell;
use std::rc::Rc;

use labsindex_domain::navigation::{MenuState, focus_trap_target, is_scrolled, same_page_anchor};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    Window,
};

use crate::error::WebError;
use crate::listener::Listener;

const SCROLLED_CLASS: &str = "navbar--scrolled";
const OPEN_CLASS: &str = "is-open";
const FOCUSABLE: &str = "a[href], button:not([disabled]), input:not([disabled]), \
    select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex=\"-1\"])";

struct Menu {
    document: Document,
    toggle: Option<HtmlElement>,
    menu: Option<HtmlElement>,
    state: Cell<MenuState>,
}

impl Menu {
    fn sync(&self, state: MenuState) {
        self.state.set(state);
        if let Some(menu) = &self.menu {
            let _ = menu.class_list().toggle_with_force(OPEN_CLASS, state.is_open());
            let _ = menu.set_attribute("aria-hidden", state.aria_hidden());
        }
        if let Some(toggle) = &self.toggle {
            let _ = toggle.set_attribute("aria-expanded", state.aria_expanded());
        }
    }

    fn toggle(&self) {
        let (Some(toggle), Some(menu)) = (&self.toggle, &self.menu) else {
            return;
        };
        let mut state = self.state.get();
        let open = state.toggle();
        self.sync(state);
        if open {
            let first = menu
                .query_selector("a[href], button:not([disabled])")
                .ok()
                .flatten();
            if let Some(first) = first.and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
                let _ = first.focus();
            }
        } else {
            let _ = toggle.focus();
        }
    }

    fn close(&self) {
        let mut state = self.state.get();
        if !state.close() {
            return;
        }
        self.sync(state);
        if let Some(toggle) = &self.toggle {
            let _ = toggle.focus();
        }
    }

    fn on_keydown(&self, event: &KeyboardEvent) {
        if !self.state.get().is_open() {
            return;
        }
        match event.key().as_str() {
            "Escape" => self.close(),
            "Tab" => self.trap_focus(event),
            _ => {}
        }
    }

    fn trap_focus(&self, event: &KeyboardEvent) {
        let Some(menu) = &self.menu else { return };
        let Ok(nodes) = menu.query_selector_all(FOCUSABLE) else {
            return;
        };
        let focusable: Vec<HtmlElement> = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();
        let active = self.document.active_element().and_then(|active| {
            focusable
                .iter()
                .position(|el| el.unchecked_ref::<Element>() == &active)
        });
        if let Some(target) = focus_trap_target(focusable.len(), active, event.shift_key()) {
            event.prevent_default();
            let _ = focusable[target].focus();
        }
    }

    fn on_anchor_click(&self, event: &Event) {
        let href = event
            .current_target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|link| link.get_attribute("href"));
        let Some(href) = href else { return };
        if same_page_anchor(&href).is_none() {
            return;
        }
        if let Ok(Some(section)) = self.document.query_selector(&href) {
            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            section.scroll_into_view_with_scroll_into_view_options(&options);
        }
        self.close();
    }
}

fn update_scrolled(window: &Window, navbar: &Element) {
    let scrolled = is_scrolled(window.scroll_y().unwrap_or(0.0));
    let _ = navbar.class_list().toggle_with_force(SCROLLED_CLASS, scrolled);
}

/// Navigation listeners. Dropping this detaches them all.
pub struct Navigation {
    _listeners: Vec<Listener>,
}

impl Navigation {
    /// Wire `.navbar`, `.navbar__toggle` and `#nav-menu`. Missing pieces are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`WebError`] if a listener cannot be registered.
    pub fn install(window: &Window, document: &Document) -> Result<Self, WebError> {
        let mut listeners = Vec::new();

        if let Ok(Some(navbar)) = document.query_selector(".navbar") {
            update_scrolled(window, &navbar);
            let scroll_window = window.clone();
            listeners.push(Listener::passive(window, "scroll", move |_| {
                update_scrolled(&scroll_window, &navbar);
            })?);
        }

        let menu = Rc::new(Menu {
            document: document.clone(),
            toggle: query_html(document, ".navbar__toggle"),
            menu: document
                .get_element_by_id("nav-menu")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            state: Cell::new(MenuState::default()),
        });
        if let Some(el) = &menu.menu {
            let _ = el.set_attribute("aria-hidden", "true");
        }

        if let Some(toggle) = &menu.toggle {
            let handler = Rc::clone(&menu);
            listeners.push(Listener::new(toggle, "click", move |_| handler.toggle())?);
        }

        let handler = Rc::clone(&menu);
        listeners.push(Listener::new(document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                handler.on_keydown(event);
            }
        })?);

        if let Ok(links) = document.query_selector_all(".navbar__menu a[href^=\"#\"]") {
            for link in (0..links.length()).filter_map(|i| links.item(i)) {
                let handler = Rc::clone(&menu);
                listeners.push(Listener::new(&link, "click", move |event| {
                    handler.on_anchor_click(&event);
                })?);
            }
        }

        tracing::debug!(listeners = listeners.len(), "navigation ready");
        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}
