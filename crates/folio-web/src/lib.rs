#![forbid(unsafe_code)]

//! `folio-web` runs the portfolio page inside a browser host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes scroll and
//!   resize events and executes the [`HostRequest`] values handed back.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`. It provides the building
//! blocks a thin JS shim wraps: the [`step_program::StepProgram`] runner, the
//! composed [`page::PortfolioPage`] model, and its configuration.

pub mod catalog;
pub mod config;
pub mod page;
pub mod step_program;

use core::time::Duration;
use std::collections::VecDeque;

use folio_core::event::Event;
use folio_core::host::HostRequest;

pub use config::PortfolioConfig;
pub use page::{PageMsg, PageView, PortfolioPage};
pub use step_program::{StepProgram, StepResult};

/// Web runner error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebBackendError {
    /// `init` was called twice.
    AlreadyInitialized,
    /// `step` was called before `init`.
    NotInitialized,
    /// The view could not be serialized for the host.
    View(String),
}

impl core::fmt::Display for WebBackendError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "step program already initialized"),
            Self::NotInitialized => write!(f, "step program not initialized"),
            Self::View(msg) => write!(f, "view serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for WebBackendError {}

impl From<serde_json::Error> for WebBackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::View(err.to_string())
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// Host-driven event source.
///
/// The host is responsible for pushing [`Event`] values and updating size.
#[derive(Debug, Clone)]
pub struct WebEventSource {
    size: (u32, u32),
    queue: VecDeque<Event>,
}

impl WebEventSource {
    /// Create a new event source with an initial viewport size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            queue: VecDeque::new(),
        }
    }

    /// Current viewport size.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Update the current size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Push an event into the queue.
    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Pop the oldest pending event.
    pub fn read_event(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Captured outputs for host consumption.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WebOutputs {
    /// Host requests in the order they were issued.
    pub host_requests: Vec<HostRequest>,
    /// Log lines written by the page.
    pub logs: Vec<String>,
    /// Last rendered view, as JSON.
    pub view_json: Option<String>,
}

impl WebOutputs {
    /// The host requests as a JSON array.
    pub fn host_requests_json(&self) -> Result<String, WebBackendError> {
        Ok(serde_json::to_string(&self.host_requests)?)
    }
}
