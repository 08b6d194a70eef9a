#![forbid(unsafe_code)]

//! Scroll coalescing and throttling.
//!
//! Browsers fire scroll events at display rate or faster. Recomputing the
//! scroll spy on every one is wasted work, so [`ScrollCoalescer`] keeps only
//! the latest scroll position and releases it at most once per interval.
//!
//! # Design
//!
//! - **Leading edge**: the first scroll after a quiet period passes through.
//! - **Latest wins**: scrolls inside the interval replace the pending one.
//! - **Trailing edge**: the caller drains the pending scroll with
//!   [`take_due`](ScrollCoalescer::take_due) once the interval has elapsed,
//!   or forces it out with [`flush`](ScrollCoalescer::flush).
//!
//! Non-scroll events always pass through untouched. Time is supplied by the
//! caller so the coalescer stays deterministic.
//!
//! ```
//! use core::time::Duration;
//! use folio_core::event::Event;
//! use folio_core::scroll_coalescer::ScrollCoalescer;
//!
//! let mut c = ScrollCoalescer::new(Duration::from_millis(16));
//! let t0 = Duration::ZERO;
//! assert_eq!(c.push(Event::scroll(10), t0), Some(Event::scroll(10)));
//! assert_eq!(c.push(Event::scroll(20), t0), None);
//! assert_eq!(c.push(Event::scroll(30), t0), None);
//! assert_eq!(c.take_due(Duration::from_millis(16)), Some(Event::scroll(30)));
//! ```

use core::time::Duration;

use crate::event::{Event, ScrollEvent};

/// Default minimum spacing between released scroll events (~one frame at 60 Hz).
pub const DEFAULT_SCROLL_INTERVAL: Duration = Duration::from_millis(16);

/// Throttles scroll events to a minimum interval, latest position wins.
///
/// Not thread-safe; owned by the single event-processing loop.
#[derive(Debug, Clone)]
pub struct ScrollCoalescer {
    interval: Duration,
    /// When the last scroll event was released, if ever.
    last_emit: Option<Duration>,
    /// Latest scroll held back by the throttle.
    pending: Option<ScrollEvent>,
    /// Scrolls merged into `pending` since it was created.
    merged: u32,
}

impl Default for ScrollCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_INTERVAL)
    }
}

impl ScrollCoalescer {
    /// Create a coalescer with the given minimum interval.
    ///
    /// A zero interval disables throttling: every scroll passes through.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
            merged: 0,
        }
    }

    /// Push an event observed at time `now`.
    ///
    /// Returns `Some(event)` if the event should be processed immediately,
    /// or `None` if it was held back as the pending scroll.
    pub fn push(&mut self, event: Event, now: Duration) -> Option<Event> {
        let Event::Scroll(scroll) = event else {
            return Some(event);
        };

        if self.pending.is_none() && self.window_open(now) {
            self.last_emit = Some(now);
            return Some(Event::Scroll(scroll));
        }

        if self.pending.is_some() {
            self.merged = self.merged.saturating_add(1);
        }
        self.pending = Some(scroll);
        None
    }

    /// Release the pending scroll if the interval has elapsed at `now`.
    pub fn take_due(&mut self, now: Duration) -> Option<Event> {
        if self.pending.is_some() && self.window_open(now) {
            self.release(now)
        } else {
            None
        }
    }

    /// Release the pending scroll regardless of the interval.
    pub fn flush(&mut self, now: Duration) -> Option<Event> {
        self.release(now)
    }

    /// Whether a scroll is being held back.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending scroll becomes releasable by [`take_due`](Self::take_due).
    ///
    /// `None` when nothing is held back. The deadline counts from the last
    /// release, not from the latest push.
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Duration> {
        self.pending.as_ref()?;
        Some(
            self.last_emit
                .map_or(Duration::ZERO, |last| last.saturating_add(self.interval)),
        )
    }

    fn window_open(&self, now: Duration) -> bool {
        match self.last_emit {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        }
    }

    fn release(&mut self, now: Duration) -> Option<Event> {
        let scroll = self.pending.take()?;
        if self.merged > 0 {
            tracing::trace!(merged = self.merged, y = scroll.y, "coalesced scroll released");
        }
        self.merged = 0;
        self.last_emit = Some(now);
        Some(Event::Scroll(scroll))
    }
}
