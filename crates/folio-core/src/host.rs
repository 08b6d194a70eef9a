#![forbid(unsafe_code)]

//! Requests the page makes of its host environment.
//!
//! The page never scrolls the window or edits the document itself. It
//! returns these values and the host executes them.

use serde::Serialize;

/// How the host should perform a scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Jump immediately.
    Instant,
}

/// A side effect to be executed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostRequest {
    /// Scroll so the top of the anchored element aligns with the viewport top.
    ScrollIntoView {
        /// Element id of the target section.
        anchor: String,
        /// Scroll animation.
        behavior: ScrollBehavior,
    },
    /// Replace the palette class and color scheme on the document root.
    ApplyTheme {
        /// Palette class to add after removing every other palette class.
        palette_class: String,
        /// `light`, `dark` or `system`.
        color_scheme: String,
    },
}

impl HostRequest {
    /// Smooth scroll to a section anchor.
    #[must_use]
    pub fn scroll_into_view(anchor: impl Into<String>) -> Self {
        Self::ScrollIntoView {
            anchor: anchor.into(),
            behavior: ScrollBehavior::Smooth,
        }
    }

    /// Stable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScrollIntoView { .. } => "scroll_into_view",
            Self::ApplyTheme { .. } => "apply_theme",
        }
    }
}
