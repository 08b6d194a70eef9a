#![forbid(unsafe_code)]

//! Host viewport queries.
//!
//! [`Viewport`] is the seam between page state and the browser: the scroll
//! spy asks it where each section currently sits. [`StaticViewport`] is a
//! plain layout model (sections stacked in document order) used by the step
//! program when the host reports only a scroll offset, and by tests.

use crate::geometry::Bounds;
use crate::host::HostRequest;

/// Layout queries answered by the host.
pub trait Viewport {
    /// Current vertical document scroll offset.
    fn scroll_y(&self) -> i32;

    /// Viewport-relative bounds of the element with id `anchor`, if present.
    fn section_bounds(&self, anchor: &str) -> Option<Bounds>;

    /// Record a scroll offset reported through an event.
    ///
    /// Live hosts answer [`scroll_y`](Self::scroll_y) directly and ignore this.
    fn sync_scroll(&mut self, _y: i32) {}

    /// Record a new viewport height reported through a resize event.
    fn sync_height(&mut self, _height: u32) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionLayout {
    anchor: String,
    /// Document-relative band.
    bounds: Bounds,
}

/// A fixed document layout with a movable scroll offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticViewport {
    height: u32,
    scroll_y: i32,
    sections: Vec<SectionLayout>,
}

impl StaticViewport {
    /// Create an empty layout with the given viewport height.
    #[must_use]
    pub fn new(height: u32) -> Self {
        Self {
            height,
            scroll_y: 0,
            sections: Vec::new(),
        }
    }

    /// Stack sections top to bottom starting at document offset 0.
    #[must_use]
    pub fn stacked<'a>(height: u32, sections: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut viewport = Self::new(height);
        let mut top: i32 = 0;
        for (anchor, section_height) in sections {
            viewport = viewport.with_section(anchor, Bounds::new(top, section_height));
            top = top.saturating_add_unsigned(section_height);
        }
        viewport
    }

    /// Add a section at an explicit document-relative position.
    #[must_use]
    pub fn with_section(mut self, anchor: impl Into<String>, bounds: Bounds) -> Self {
        self.sections.push(SectionLayout {
            anchor: anchor.into(),
            bounds,
        });
        self
    }

    /// Viewport height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Update the viewport height and re-clamp the scroll offset.
    pub fn set_height(&mut self, height: u32) {
        self.height = height;
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll());
    }

    /// Total document height (bottom of the lowest section).
    #[must_use]
    pub fn document_height(&self) -> i32 {
        self.sections
            .iter()
            .map(|s| s.bounds.bottom())
            .max()
            .unwrap_or(0)
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> i32 {
        self.document_height()
            .saturating_sub_unsigned(self.height)
            .max(0)
    }

    /// Record the scroll offset reported by the host.
    ///
    /// Host reports are taken as-is (overscroll included); only
    /// [`scroll_to`](Self::scroll_to) clamps.
    pub fn set_scroll_y(&mut self, y: i32) {
        self.scroll_y = y;
    }

    /// Scroll to `y`, clamped to the reachable range.
    pub fn scroll_to(&mut self, y: i32) {
        self.scroll_y = y.clamp(0, self.max_scroll());
    }

    /// Document-relative top of a section.
    #[must_use]
    pub fn document_top(&self, anchor: &str) -> Option<i32> {
        self.sections
            .iter()
            .find(|s| s.anchor == anchor)
            .map(|s| s.bounds.top)
    }

    /// Execute a host request against this layout.
    ///
    /// Returns `true` if the viewport moved. Scrolls are applied instantly;
    /// animation is a concern of the real host.
    pub fn apply(&mut self, request: &HostRequest) -> bool {
        match request {
            HostRequest::ScrollIntoView { anchor, .. } => match self.document_top(anchor) {
                Some(top) => {
                    let before = self.scroll_y;
                    self.scroll_to(top);
                    tracing::trace!(anchor = %anchor, from = before, to = self.scroll_y, "viewport scrolled");
                    before != self.scroll_y
                }
                None => false,
            },
            HostRequest::ApplyTheme { .. } => false,
        }
    }
}

impl Viewport for StaticViewport {
    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn section_bounds(&self, anchor: &str) -> Option<Bounds> {
        self.sections
            .iter()
            .find(|s| s.anchor == anchor)
            .map(|s| s.bounds.offset(-self.scroll_y))
    }

    fn sync_scroll(&mut self, y: i32) {
        self.set_scroll_y(y);
    }

    fn sync_height(&mut self, height: u32) {
        self.set_height(height);
    }
}
