#![forbid(unsafe_code)]

//! Geometric primitives.

/// A vertical band on screen, the part of a bounding box the scroll spy cares about.
///
/// Coordinates are viewport-relative CSS pixels (origin at the top of the
/// viewport), so `top` goes negative once a section has scrolled past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    /// Top edge.
    pub top: i32,
    /// Height in pixels.
    pub height: u32,
}

impl Bounds {
    /// Create a new band.
    #[inline]
    pub const fn new(top: i32, height: u32) -> Self {
        Self { top, height }
    }

    /// Bottom edge. Saturates instead of overflowing.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        let bottom = self.top as i64 + self.height as i64;
        if bottom > i32::MAX as i64 {
            i32::MAX
        } else {
            bottom as i32
        }
    }

    /// Whether the horizontal line at `y` touches this band.
    ///
    /// Both edges are inclusive: a band whose top or bottom sits exactly on
    /// the line counts as intersecting.
    #[inline]
    pub const fn intersects_line(&self, y: i32) -> bool {
        self.top <= y && self.bottom() >= y
    }

    /// The same band shifted vertically by `dy`.
    #[inline]
    pub const fn offset(&self, dy: i32) -> Self {
        Self {
            top: self.top.saturating_add(dy),
            height: self.height,
        }
    }
}
