#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! These are the only inputs the page reacts to besides its own messages:
//! the host reports scroll position changes and viewport resizes. All events
//! derive `Clone`, `PartialEq` and `Eq` for use in tests.
//!
//! # Design Notes
//!
//! - Scroll offsets are document pixels measured from the top (`window.scrollY`)
//! - Offsets are signed; overscroll on some hosts reports small negative values
//! - Clicks are not events here: the view layer translates them into page messages

/// Canonical host event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The document was scrolled.
    Scroll(ScrollEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width in CSS pixels.
        width: u32,
        /// New viewport height in CSS pixels.
        height: u32,
    },
}

impl Event {
    /// Shorthand for a scroll event at document offset `y`.
    #[must_use]
    pub const fn scroll(y: i32) -> Self {
        Self::Scroll(ScrollEvent::new(y))
    }

    /// Whether this event is a scroll event (and therefore coalescable).
    #[must_use]
    pub const fn is_scroll(&self) -> bool {
        matches!(self, Self::Scroll(_))
    }
}

/// A scroll position report from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollEvent {
    /// Vertical document offset in pixels.
    pub y: i32,
}

impl ScrollEvent {
    /// Create a scroll event.
    #[must_use]
    pub const fn new(y: i32) -> Self {
        Self { y }
    }
}

impl From<ScrollEvent> for Event {
    fn from(event: ScrollEvent) -> Self {
        Self::Scroll(event)
    }
}
