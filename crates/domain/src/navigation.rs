//! Navigation bar state: sticky styling, the mobile menu, and its focus trap.

/// Whether the page has scrolled far enough to restyle the bar.
#[must_use]
pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > 0.0
}

/// Fragment of a same-page anchor (`#about` → `about`).
#[must_use]
pub fn same_page_anchor(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Open/closed state of the mobile menu overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Flip the menu and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the menu. Returns `false` when it was already closed, in which
    /// case nothing about the page should change.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Value for `aria-expanded` on the toggle button.
    #[must_use]
    pub fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Value for `aria-hidden` on the menu.
    #[must_use]
    pub fn aria_hidden(self) -> &'static str {
        if self.open { "false" } else { "true" }
    }
}

/// Where focus must wrap to when Tab would leave the open menu.
///
/// `active` is the index of the focused element among the menu's `len`
/// focusable elements. Returns `None` when the browser's default focus
/// movement should proceed.
#[must_use]
pub fn focus_trap_target(len: usize, active: Option<usize>, shift: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match (active, shift) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_scrolled_past_top() {
        assert!(!is_scrolled(0.0));
        assert!(is_scrolled(0.5));
        assert!(is_scrolled(400.0));
    }

    #[test]
    fn should_extract_same_page_fragment() {
        assert_eq!(same_page_anchor("#labs"), Some("labs"));
        assert_eq!(same_page_anchor("/access-request.html"), None);
        assert_eq!(same_page_anchor("https://example.com/#x"), None);
    }

    #[test]
    fn should_start_closed_and_toggle() {
        let mut menu = MenuState::default();
        assert!(!menu.is_open());
        assert_eq!(menu.aria_expanded(), "false");
        assert_eq!(menu.aria_hidden(), "true");

        assert!(menu.toggle());
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.aria_hidden(), "false");

        assert!(!menu.toggle());
    }

    #[test]
    fn should_report_whether_close_changed_anything() {
        let mut menu = MenuState::default();
        assert!(!menu.close());
        menu.toggle();
        assert!(menu.close());
        assert!(!menu.is_open());
    }

    #[test]
    fn should_wrap_tab_from_last_to_first() {
        assert_eq!(focus_trap_target(3, Some(2), false), Some(0));
        assert_eq!(focus_trap_target(3, Some(1), false), None);
    }

    #[test]
    fn should_wrap_shift_tab_from_first_to_last() {
        assert_eq!(focus_trap_target(3, Some(0), true), Some(2));
        assert_eq!(focus_trap_target(3, Some(2), true), None);
    }

    #[test]
    fn should_leave_focus_alone_outside_the_menu() {
        assert_eq!(focus_trap_target(3, None, false), None);
        assert_eq!(focus_trap_target(0, Some(0), false), None);
    }

    #[test]
    fn should_wrap_onto_itself_with_single_element() {
        assert_eq!(focus_trap_target(1, Some(0), false), Some(0));
        assert_eq!(focus_trap_target(1, Some(0), true), Some(0));
    }
}
