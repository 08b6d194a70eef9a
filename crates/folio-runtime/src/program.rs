#![forbid(unsafe_code)]

//! Elm-style model and command types.
//!
//! A page is a [`Model`]: it receives messages, mutates its own state in
//! `update`, and describes side effects as [`Cmd`] values. The runner that
//! owns the model (a [`ProgramSimulator`](crate::simulator::ProgramSimulator)
//! in tests, the host-driven step program in the browser) executes them.
//!
//! # Example
//!
//! ```
//! use folio_core::event::Event;
//! use folio_runtime::program::{Cmd, Model};
//!
//! struct Counter {
//!     value: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Scrolled,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(_: Event) -> Self {
//!         Msg::Scrolled
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!     type View = i32;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         if let Msg::Increment = msg {
//!             self.value += 1;
//!         }
//!         Cmd::none()
//!     }
//!
//!     fn view(&self) -> i32 {
//!         self.value
//!     }
//! }
//! ```

use core::time::Duration;

use folio_core::event::Event;
use folio_core::host::HostRequest;

use crate::timer::TimerKey;

/// The application model.
///
/// Implementations own every piece of page state; nothing is ambient.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state.
    /// Must be convertible from host events.
    type Message: From<Event> + Send + 'static;

    /// Snapshot handed to the rendering layer.
    type View;

    /// Initialize the model with startup commands.
    ///
    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands
    /// for any side effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Derive the current view.
    fn view(&self) -> Self::View;
}

/// Metadata for tasks, used in logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSpec {
    /// Optional task name.
    pub name: Option<String>,
}

impl TaskSpec {
    /// Attach a name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Commands represent side effects to be executed by the runner.
///
/// Commands are returned from `init()` and `update()` to schedule timers,
/// ask the host for something, or run an external call.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Emit a log line to the host console.
    Log(String),
    /// Hand a request to the host environment.
    Host(HostRequest),
    /// Deliver `msg` after `after` has elapsed on the runner's clock.
    ///
    /// Scheduling under a key that is already pending replaces the earlier
    /// timer; it never fires.
    Schedule {
        /// Timer slot.
        key: TimerKey,
        /// Delay from now.
        after: Duration,
        /// Message delivered when the timer fires.
        msg: M,
    },
    /// Cancel the timer pending under a key, if any.
    Cancel(TimerKey),
    /// Run an external call and feed its result back as a message.
    ///
    /// The page has no threads; runners execute the closure after the
    /// current update has returned, so the model always observes the state
    /// it set before the result arrives.
    Task(TaskSpec, Box<dyn FnOnce() -> M + Send>),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
            Self::Host(req) => f.debug_tuple("Host").field(req).finish(),
            Self::Schedule { key, after, msg } => f
                .debug_struct("Schedule")
                .field("key", key)
                .field("after", after)
                .field("msg", msg)
                .finish(),
            Self::Cancel(key) => f.debug_tuple("Cancel").field(key).finish(),
            Self::Task(spec, _) => f.debug_struct("Task").field("spec", spec).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a log command.
    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a host request command.
    #[inline]
    pub fn host(request: HostRequest) -> Self {
        Self::Host(request)
    }

    /// Schedule `msg` under `key` after `after`.
    #[inline]
    pub fn schedule(key: TimerKey, after: Duration, msg: M) -> Self {
        Self::Schedule { key, after, msg }
    }

    /// Cancel the timer under `key`.
    #[inline]
    pub fn cancel(key: TimerKey) -> Self {
        Self::Cancel(key)
    }

    /// Create a batch of commands.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    /// Create a named external call command.
    pub fn task_named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(TaskSpec::default().with_name(name), Box::new(f))
    }

    /// Whether this is the no-op command.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Return a stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Batch(_) => "Batch",
            Self::Log(_) => "Log",
            Self::Host(_) => "Host",
            Self::Schedule { .. } => "Schedule",
            Self::Cancel(_) => "Cancel",
            Self::Task(..) => "Task",
        }
    }

    /// Count the leaf commands (everything except `None` and containers).
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}
