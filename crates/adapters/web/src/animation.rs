//! Scroll-triggered entrance animations.

use labsindex_domain::animation::RevealStrategy;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use crate::error::WebError;

const ANIMATED: &str = ".animate-on-scroll";
const REVEALED_CLASS: &str = "animate-in";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Live intersection observer; disconnected on drop.
pub struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

fn observer_supported(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn reveal(element: &Element) {
    let _ = element.class_list().add_1(REVEALED_CLASS);
}

fn animated_elements(document: &Document) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(ANIMATED) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Reveal `.animate-on-scroll` elements now or as they scroll into view.
///
/// Returns the observer guard when one was started.
///
/// # Errors
///
/// Returns a [`WebError`] if the observer cannot be constructed.
pub fn install(
    window: &Window,
    document: &Document,
    threshold: f64,
) -> Result<Option<Reveal>, WebError> {
    let elements = animated_elements(document);
    if elements.is_empty() {
        return Ok(None);
    }

    let strategy = RevealStrategy::choose(
        prefers_reduced_motion(window),
        observer_supported(window),
        threshold,
    );
    tracing::debug!(?strategy, count = elements.len(), "entrance animations");

    let RevealStrategy::Observe { threshold } = strategy else {
        elements.iter().for_each(reveal);
        return Ok(None);
    };

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    reveal(&target);
                    observer.unobserve(&target);
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &elements {
        observer.observe(element);
    }

    Ok(Some(Reveal {
        observer,
        _callback: callback,
    }))
}
