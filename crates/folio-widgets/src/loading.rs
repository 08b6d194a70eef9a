#![forbid(unsafe_code)]

//! Splash screen shown while the page settles.
//!
//! The store itself has no clock. Whoever owns it schedules a one-shot timer
//! for [`LoadingScreen::duration`] and calls [`LoadingScreen::finish`] when
//! it fires; dropping the owner drops the timer with it.

use std::time::Duration;

/// Default splash duration.
pub const DEFAULT_LOADING_DURATION: Duration = Duration::from_millis(2_500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingScreen {
    visible: bool,
    duration: Duration,
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new(DEFAULT_LOADING_DURATION)
    }
}

impl LoadingScreen {
    /// A visible splash that should hide after `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            visible: !duration.is_zero(),
            duration,
        }
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide the splash. Returns `false` if it was already hidden.
    pub fn finish(&mut self) -> bool {
        if self.visible {
            tracing::debug!(after_ms = self.duration.as_millis() as u64, "loading screen hidden");
        }
        std::mem::replace(&mut self.visible, false)
    }
}
