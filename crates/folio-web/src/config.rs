#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Defaults match the live site. Every knob can be overridden from the
//! environment:
//!
//! | variable                   | unit | default |
//! |----------------------------|------|---------|
//! | `FOLIO_REFERENCE_LINE`     | px   | 100     |
//! | `FOLIO_SCROLLED_THRESHOLD` | px   | 10      |
//! | `FOLIO_SUCCESS_RESET_MS`   | ms   | 5000    |
//! | `FOLIO_LOADING_MS`         | ms   | 2500    |
//! | `FOLIO_SUBMIT_LATENCY_MS`  | ms   | 1500    |
//! | `FOLIO_SCROLL_THROTTLE_MS` | ms   | 16      |
//!
//! A value that does not parse is ignored with a warning.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use folio_core::scroll_coalescer::DEFAULT_SCROLL_INTERVAL;
use folio_widgets::contact_form::SUCCESS_RESET_AFTER;
use folio_widgets::loading::DEFAULT_LOADING_DURATION;
use folio_widgets::nav_menu::DEFAULT_SCROLLED_THRESHOLD;
use folio_widgets::scroll_spy::DEFAULT_REFERENCE_LINE;

/// Simulated delivery delay before the transport is called.
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(1_500);

/// Tunables for [`PortfolioPage`](crate::page::PortfolioPage) and the step program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioConfig {
    /// Scroll-spy reference line, px below the viewport top.
    pub reference_line: i32,
    /// Scroll offset past which the header is styled as scrolled.
    pub scrolled_threshold: i32,
    /// How long "Message Sent!" stays up.
    pub success_reset: Duration,
    /// Splash screen duration. Zero disables it.
    pub loading: Duration,
    /// Delay before the transport is called. Zero calls it immediately.
    pub submit_latency: Duration,
    /// Minimum spacing between processed scroll events.
    pub scroll_throttle: Duration,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            reference_line: DEFAULT_REFERENCE_LINE,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
            success_reset: SUCCESS_RESET_AFTER,
            loading: DEFAULT_LOADING_DURATION,
            submit_latency: DEFAULT_SUBMIT_LATENCY,
            scroll_throttle: DEFAULT_SCROLL_INTERVAL,
        }
    }
}

impl PortfolioConfig {
    /// Defaults overridden by `FOLIO_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = parse(&lookup, "FOLIO_REFERENCE_LINE") {
            config.reference_line = v;
        }
        if let Some(v) = parse(&lookup, "FOLIO_SCROLLED_THRESHOLD") {
            config.scrolled_threshold = v;
        }
        if let Some(ms) = parse(&lookup, "FOLIO_SUCCESS_RESET_MS") {
            config.success_reset = Duration::from_millis(ms);
        }
        if let Some(ms) = parse(&lookup, "FOLIO_LOADING_MS") {
            config.loading = Duration::from_millis(ms);
        }
        if let Some(ms) = parse(&lookup, "FOLIO_SUBMIT_LATENCY_MS") {
            config.submit_latency = Duration::from_millis(ms);
        }
        if let Some(ms) = parse(&lookup, "FOLIO_SCROLL_THROTTLE_MS") {
            config.scroll_throttle = Duration::from_millis(ms);
        }
        config
    }

    #[must_use]
    pub fn with_reference_line(mut self, px: i32) -> Self {
        self.reference_line = px;
        self
    }

    #[must_use]
    pub fn with_scrolled_threshold(mut self, px: i32) -> Self {
        self.scrolled_threshold = px;
        self
    }

    #[must_use]
    pub fn with_success_reset(mut self, after: Duration) -> Self {
        self.success_reset = after;
        self
    }

    #[must_use]
    pub fn with_loading(mut self, duration: Duration) -> Self {
        self.loading = duration;
        self
    }

    #[must_use]
    pub fn with_submit_latency(mut self, latency: Duration) -> Self {
        self.submit_latency = latency;
        self
    }

    #[must_use]
    pub fn with_scroll_throttle(mut self, interval: Duration) -> Self {
        self.scroll_throttle = interval;
        self
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable config value");
            None
        }
    }
}
