#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! The Elm-style core that every page store plugs into.
//!
//! # Key Components
//!
//! - [`Model`] - Trait for page state and behavior
//! - [`Cmd`] - Commands for side effects (host requests, timers, external calls)
//! - [`TimerQueue`] - Keyed, cancellable one-shot timers
//! - [`ProgramSimulator`] - Deterministic runner for tests
//!
//! # How it fits in the system
//! `folio-runtime` sits between host input (`folio-core`) and the stores in
//! `folio-widgets`. The browser-facing runner lives in `folio-web`.

pub mod program;
pub mod simulator;
pub mod timer;

pub use program::{Cmd, Model, TaskSpec};
pub use simulator::{CmdRecord, ProgramSimulator};
pub use timer::{TimerKey, TimerQueue};
