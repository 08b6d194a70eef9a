#![forbid(unsafe_code)]

//! Core: host events, viewport geometry, host requests, and scroll throttling.
//!
//! Nothing in this crate touches a real browser. The host pushes [`event::Event`]
//! values in, answers layout queries through [`viewport::Viewport`], and executes
//! the [`host::HostRequest`] values the page hands back.

pub mod event;
pub mod geometry;
pub mod host;
pub mod scroll_coalescer;
pub mod viewport;

pub use event::{Event, ScrollEvent};
pub use geometry::Bounds;
pub use host::{HostRequest, ScrollBehavior};
pub use scroll_coalescer::ScrollCoalescer;
pub use viewport::{StaticViewport, Viewport};
