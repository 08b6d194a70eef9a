#![forbid(unsafe_code)]

//! Scroll spy: which page section is "current".
//!
//! On every (throttled) scroll the spy asks the host [`Viewport`] for each
//! section's bounds and tests them against a fixed reference line near the
//! top of the viewport. The section under the line becomes active and its
//! navigation link is highlighted.
//!
//! # Invariants
//!
//! 1. The active section is always one of the known sections.
//! 2. When several sections touch the line, the lowest `order` wins.
//! 3. When none does, the active section is left alone (no flicker).
//! 4. `on_scroll` is idempotent for unchanged layout.

use std::fmt;

use folio_core::host::HostRequest;
use folio_core::viewport::Viewport;
use serde::Serialize;

/// Reference line, in pixels below the viewport top (clears the fixed header).
pub const DEFAULT_REFERENCE_LINE: i32 = 100;

/// A navigable page region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Element id, also the `#anchor` of its nav link.
    pub id: String,
    /// Nav link label.
    pub label: String,
    /// Vertical order on the page; lower is higher up.
    pub order: i32,
}

impl Section {
    /// Create a section.
    pub fn new(id: impl Into<String>, label: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order,
        }
    }
}

/// Invalid section set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollSpyError {
    /// No sections were given.
    NoSections,
    /// Two sections share an id.
    DuplicateSection(String),
}

impl fmt::Display for ScrollSpyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSections => write!(f, "scroll spy needs at least one section"),
            Self::DuplicateSection(id) => write!(f, "duplicate section id: {id:?}"),
        }
    }
}

impl std::error::Error for ScrollSpyError {}

/// Tracks the section under the reference line.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    /// Sorted by `order`, ties kept in declaration order.
    sections: Vec<Section>,
    active: usize,
    reference_line: i32,
}

impl ScrollSpy {
    /// Create a spy over a static section set. The topmost section starts active.
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Result<Self, ScrollSpyError> {
        let mut sections: Vec<Section> = sections.into_iter().collect();
        if sections.is_empty() {
            return Err(ScrollSpyError::NoSections);
        }
        for (i, section) in sections.iter().enumerate() {
            if sections[..i].iter().any(|s| s.id == section.id) {
                return Err(ScrollSpyError::DuplicateSection(section.id.clone()));
            }
        }
        sections.sort_by_key(|s| s.order);
        Ok(Self {
            sections,
            active: 0,
            reference_line: DEFAULT_REFERENCE_LINE,
        })
    }

    /// Use a different reference line.
    #[must_use]
    pub fn with_reference_line(mut self, line: i32) -> Self {
        self.reference_line = line;
        self
    }

    /// Re-evaluate the active section against the viewport.
    ///
    /// Returns `true` if the active section changed.
    pub fn on_scroll<V: Viewport + ?Sized>(&mut self, viewport: &V) -> bool {
        // Sections are sorted by order, so the first hit is the winner.
        let hit = self.sections.iter().position(|s| {
            viewport
                .section_bounds(&s.id)
                .is_some_and(|b| b.intersects_line(self.reference_line))
        });
        match hit {
            Some(idx) if idx != self.active => {
                tracing::debug!(
                    from = %self.sections[self.active].id,
                    to = %self.sections[idx].id,
                    scroll_y = viewport.scroll_y(),
                    "active section changed"
                );
                self.active = idx;
                true
            }
            _ => false,
        }
    }

    /// Ask the host to bring a section to the top of the viewport.
    ///
    /// Returns `None` for an unknown id. The active section is not touched
    /// here; it follows the scroll events the host sends back.
    #[must_use]
    pub fn navigate_to(&self, id: &str) -> Option<HostRequest> {
        if self.section(id).is_none() {
            tracing::debug!(section = id, "ignoring navigation to unknown section");
            return None;
        }
        Some(HostRequest::scroll_into_view(id))
    }

    /// Id of the active section.
    #[must_use]
    pub fn active_section_id(&self) -> &str {
        &self.sections[self.active].id
    }

    /// Whether `id` is the active section.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_section_id() == id
    }

    /// Look up a section.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Sections, topmost first.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Reference line in viewport pixels.
    #[must_use]
    pub const fn reference_line(&self) -> i32 {
        self.reference_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::Bounds;
    use folio_core::viewport::StaticViewport;
    use std::collections::HashMap;

    /// Viewport that reports whatever bounds a test hands it.
    #[derive(Default)]
    struct FakeViewport {
        bounds: HashMap<&'static str, Bounds>,
    }

    impl Viewport for FakeViewport {
        fn scroll_y(&self) -> i32 {
            0
        }

        fn section_bounds(&self, anchor: &str) -> Option<Bounds> {
            self.bounds.get(anchor).copied()
        }
    }

    fn nav_sections() -> Vec<Section> {
        vec![
            Section::new("home", "Home", 0),
            Section::new("about", "About", 1),
            Section::new("skills", "Skills", 2),
            Section::new("projects", "Projects", 3),
            Section::new("contact", "Contact", 4),
        ]
    }

    fn page() -> StaticViewport {
        StaticViewport::stacked(
            700,
            [
                ("home", 900),
                ("about", 800),
                ("skills", 1_000),
                ("projects", 1_400),
                ("contact", 900),
            ],
        )
    }

    #[test]
    fn starts_on_first_section() {
        let spy = ScrollSpy::new(nav_sections()).unwrap();
        assert_eq!(spy.active_section_id(), "home");
    }

    #[test]
    fn first_section_is_lowest_order_not_first_declared() {
        let spy = ScrollSpy::new(vec![
            Section::new("about", "About", 1),
            Section::new("home", "Home", 0),
        ])
        .unwrap();
        assert_eq!(spy.active_section_id(), "home");
    }

    #[test]
    fn empty_and_duplicate_sets_are_rejected() {
        assert_eq!(
            ScrollSpy::new(Vec::new()).unwrap_err(),
            ScrollSpyError::NoSections
        );
        let err = ScrollSpy::new(vec![
            Section::new("home", "Home", 0),
            Section::new("home", "Again", 1),
        ])
        .unwrap_err();
        assert_eq!(err, ScrollSpyError::DuplicateSection("home".into()));
    }

    #[test]
    fn tracks_section_under_reference_line() {
        let mut spy = ScrollSpy::new(nav_sections()).unwrap();
        let mut vp = page();

        vp.set_scroll_y(850);
        assert!(spy.on_scroll(&vp));
        assert_eq!(spy.active_section_id(), "about");

        vp.set_scroll_y(2_000);
        assert!(spy.on_scroll(&vp));
        assert_eq!(spy.active_section_id(), "skills");
    }

    #[test]
    fn overlapping_sections_resolve_to_lowest_order() {
        let mut spy = ScrollSpy::new(vec![
            Section::new("home", "Home", 0),
            Section::new("about", "About", 1),
        ])
        .unwrap();
        let mut vp = FakeViewport::default();
        vp.bounds.insert("home", Bounds::new(0, 200));
        vp.bounds.insert("about", Bounds::new(50, 200));
        // Move off home first so the tie-break is observable.
        spy.active = 1;
        assert!(spy.on_scroll(&vp));
        assert_eq!(spy.active_section_id(), "home");
    }

    #[test]
    fn boundary_exactly_on_line_counts() {
        let mut spy = ScrollSpy::new(nav_sections()).unwrap();
        let mut vp = FakeViewport::default();
        // home ends exactly on the line, about starts exactly on it.
        vp.bounds.insert("home", Bounds::new(-800, 900));
        vp.bounds.insert("about", Bounds::new(100, 800));
        spy.on_scroll(&vp);
        assert_eq!(spy.active_section_id(), "home");
    }

    #[test]
    fn no_intersection_keeps_previous_section() {
        let mut spy = ScrollSpy::new(nav_sections()).unwrap();
        let mut vp = page();
        vp.set_scroll_y(1_000);
        spy.on_scroll(&vp);
        assert_eq!(spy.active_section_id(), "about");

        let empty = FakeViewport::default();
        assert!(!spy.on_scroll(&empty));
        assert_eq!(spy.active_section_id(), "about");
    }

    #[test]
    fn on_scroll_is_idempotent() {
        let mut spy = ScrollSpy::new(nav_sections()).unwrap();
        let mut vp = page();
        vp.set_scroll_y(3_000);
        assert!(spy.on_scroll(&vp));
        let first = spy.active_section_id().to_string();
        assert!(!spy.on_scroll(&vp));
        assert_eq!(spy.active_section_id(), first);
    }

    #[test]
    fn custom_reference_line() {
        let mut spy = ScrollSpy::new(nav_sections())
            .unwrap()
            .with_reference_line(0);
        let mut vp = page();
        // About's top is 50px below the viewport top: line 0 still sits in home.
        vp.set_scroll_y(850);
        spy.on_scroll(&vp);
        assert_eq!(spy.active_section_id(), "home");
        assert_eq!(spy.reference_line(), 0);
    }

    #[test]
    fn navigate_to_known_section_requests_scroll() {
        let spy = ScrollSpy::new(nav_sections()).unwrap();
        assert_eq!(
            spy.navigate_to("projects"),
            Some(HostRequest::scroll_into_view("projects"))
        );
        // Navigation itself does not move the highlight.
        assert_eq!(spy.active_section_id(), "home");
    }

    #[test]
    fn navigate_to_unknown_section_is_noop() {
        let spy = ScrollSpy::new(nav_sections()).unwrap();
        assert_eq!(spy.navigate_to("blog"), None);
    }

    #[test]
    fn navigation_round_trip_through_viewport() {
        let mut spy = ScrollSpy::new(nav_sections()).unwrap();
        let mut vp = page();
        let request = spy.navigate_to("contact").unwrap();
        assert!(vp.apply(&request));
        spy.on_scroll(&vp);
        assert_eq!(spy.active_section_id(), "contact");
    }
}
