#![forbid(unsafe_code)]

//! Header navigation state: scrolled styling and the mobile menu.

use serde::Serialize;

/// Scroll offset past which the header switches to its solid style.
pub const DEFAULT_SCROLLED_THRESHOLD: i32 = 10;

/// Fixed-header state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavMenu {
    scrolled: bool,
    mobile_open: bool,
    #[serde(skip)]
    threshold: i32,
}

impl Default for NavMenu {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLED_THRESHOLD)
    }
}

impl NavMenu {
    #[must_use]
    pub const fn new(threshold: i32) -> Self {
        Self {
            scrolled: false,
            mobile_open: false,
            threshold,
        }
    }

    /// Record the document scroll offset. Returns `true` if the header style flipped.
    pub fn observe_scroll(&mut self, scroll_y: i32) -> bool {
        let scrolled = scroll_y > self.threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    /// Close the mobile menu, e.g. after a nav link was followed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.mobile_open, false)
    }

    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    #[must_use]
    pub const fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_is_strictly_past_threshold() {
        let mut nav = NavMenu::default();
        assert!(!nav.observe_scroll(10));
        assert!(!nav.is_scrolled());
        assert!(nav.observe_scroll(11));
        assert!(nav.is_scrolled());
        assert!(!nav.observe_scroll(400));
        assert!(nav.observe_scroll(0));
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn toggle_and_close() {
        let mut nav = NavMenu::default();
        nav.toggle();
        assert!(nav.is_mobile_open());
        assert!(nav.close());
        assert!(!nav.is_mobile_open());
        assert!(!nav.close());
        nav.toggle();
        nav.toggle();
        assert!(!nav.is_mobile_open());
    }
}
