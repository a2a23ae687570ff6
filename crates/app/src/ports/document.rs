//! Document ports — the pieces of the page the reconcilers write to.

use std::rc::Rc;

use labsindex_domain::theme::Theme;

/// The root-level theme marker read by the stylesheet.
pub trait ThemeSurface {
    /// Set the marker. Applying the same theme twice changes nothing.
    fn apply_theme(&self, theme: Theme);

    /// Theme currently on the marker, if any valid one is set.
    fn applied_theme(&self) -> Option<Theme>;

    /// Remove the marker entirely.
    fn clear_theme(&self);
}

/// Elements whose text is replaced by translation lookups.
pub trait TextSurface {
    /// Handle to one translatable element.
    type Element;

    /// Every element carrying a translation-key marker, in document order.
    fn translatable_elements(&self) -> Vec<Self::Element>;

    /// The element's translation key. `None` or empty means "skip".
    fn translation_key(&self, element: &Self::Element) -> Option<String>;

    /// Replace the element's visible text.
    fn set_text(&self, element: &Self::Element, text: &str);
}

impl<T: ThemeSurface + ?Sized> ThemeSurface for Rc<T> {
    fn apply_theme(&self, theme: Theme) {
        (**self).apply_theme(theme);
    }

    fn applied_theme(&self) -> Option<Theme> {
        (**self).applied_theme()
    }

    fn clear_theme(&self) {
        (**self).clear_theme();
    }
}

impl<T: TextSurface + ?Sized> TextSurface for Rc<T> {
    type Element = T::Element;

    fn translatable_elements(&self) -> Vec<Self::Element> {
        (**self).translatable_elements()
    }

    fn translation_key(&self, element: &Self::Element) -> Option<String> {
        (**self).translation_key(element)
    }

    fn set_text(&self, element: &Self::Element, text: &str) {
        (**self).set_text(element, text);
    }
}
