#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] without a browser. Events can be
//! injected, messages sent directly, and the clock advanced by hand so timer
//! behavior is exact and repeatable.
//!
//! # Example
//!
//! ```ignore
//! use folio_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(page);
//! sim.init();
//! sim.send(PageMsg::SetProjectFilter("ml".into()));
//! sim.advance(Duration::from_secs(5));
//! assert_eq!(sim.view().projects.items.len(), 8);
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use folio_core::event::Event;
use folio_core::host::HostRequest;

use crate::program::{Cmd, Model, TaskSpec};
use crate::timer::{TimerKey, TimerQueue};

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Batch of commands.
    Batch(usize),
    /// Log message emitted.
    Log(String),
    /// Host request emitted.
    Host(HostRequest),
    /// Timer scheduled.
    Schedule {
        /// Slot.
        key: TimerKey,
        /// Delay.
        after: Duration,
    },
    /// Timer cancelled.
    Cancel(TimerKey),
    /// External call executed.
    Task(Option<String>),
    /// Timer fired.
    Fired(TimerKey),
}

type BoxedTask<Msg> = Box<dyn FnOnce() -> Msg + Send>;

/// Deterministic simulator for [`Model`] testing.
pub struct ProgramSimulator<M: Model> {
    /// The application model.
    model: M,
    /// Simulated monotonic clock.
    now: Duration,
    /// Pending timers.
    timers: TimerQueue<M::Message>,
    /// External calls waiting for the current update to finish.
    tasks: VecDeque<(TaskSpec, BoxedTask<M::Message>)>,
    /// Record of all executed commands.
    command_log: Vec<CmdRecord>,
    /// Host requests emitted via `Cmd::Host`.
    host_requests: Vec<HostRequest>,
    /// Log messages emitted via `Cmd::Log`.
    logs: Vec<String>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            now: Duration::ZERO,
            timers: TimerQueue::new(),
            tasks: VecDeque::new(),
            command_log: Vec::new(),
            host_requests: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Initialize the model by calling `Model::init()` and executing returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.drain_tasks();
    }

    /// Inject host events into the model.
    ///
    /// Each event is converted to a message via `From<Event>` and dispatched
    /// through `Model::update()`.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            self.send(M::Message::from(event.clone()));
        }
    }

    /// Inject a single host event into the model.
    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Send a specific message to the model.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
        self.drain_tasks();
    }

    /// Advance the clock by `dt`, firing every timer that falls due on the way.
    ///
    /// Timers fire at their own deadlines, so a timer scheduled while another
    /// fires is measured from that deadline. Returns the number fired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let target = self.now.saturating_add(dt);
        let mut fired = 0;
        while let Some(deadline) = self.timers.next_deadline() {
            if deadline > target {
                break;
            }
            self.now = self.now.max(deadline);
            if let Some((key, msg)) = self.timers.pop_due(self.now) {
                fired += 1;
                self.command_log.push(CmdRecord::Fired(key));
                self.send(msg);
            }
        }
        self.now = target;
        fired
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Derive the model's view.
    pub fn view(&self) -> M::View {
        self.model.view()
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether a timer is pending under `key`.
    pub fn is_timer_pending(&self, key: TimerKey) -> bool {
        self.timers.is_pending(key)
    }

    /// Absolute deadline of the timer under `key`.
    pub fn timer_deadline(&self, key: TimerKey) -> Option<Duration> {
        self.timers.deadline(key)
    }

    /// Host requests emitted so far.
    pub fn host_requests(&self) -> &[HostRequest] {
        &self.host_requests
    }

    /// Take the host requests, leaving the list empty.
    pub fn take_host_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.host_requests)
    }

    /// Get all log messages emitted via `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    /// Clear the command log.
    pub fn clear_command_log(&mut self) {
        self.command_log.clear();
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
            Cmd::Host(request) => {
                self.command_log.push(CmdRecord::Host(request.clone()));
                self.host_requests.push(request);
            }
            Cmd::Schedule { key, after, msg } => {
                self.command_log.push(CmdRecord::Schedule { key, after });
                self.timers.schedule(key, self.now.saturating_add(after), msg);
            }
            Cmd::Cancel(key) => {
                self.command_log.push(CmdRecord::Cancel(key));
                self.timers.cancel(key);
            }
            Cmd::Task(spec, f) => {
                self.tasks.push_back((spec, f));
            }
        }
    }

    fn drain_tasks(&mut self) {
        while let Some((spec, f)) = self.tasks.pop_front() {
            self.command_log.push(CmdRecord::Task(spec.name));
            let msg = f();
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }
}
