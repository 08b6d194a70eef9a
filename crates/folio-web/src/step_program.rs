#![forbid(unsafe_code)]

//! Step-based program runner for the browser.
//!
//! [`StepProgram`] drives a [`Model`] through init / event / update / view
//! cycles without threads or blocking. The host (JavaScript) controls the
//! event loop:
//!
//! 1. Push events via [`StepProgram::push_event`].
//! 2. Advance time via [`StepProgram::advance_time`].
//! 3. Call [`StepProgram::step`] to process pending events, fire due timers,
//!    and re-render if anything changed.
//! 4. Read host requests and the rendered view via [`StepProgram::take_outputs`].
//!
//! Scroll events are throttled through a [`ScrollCoalescer`]: the first
//! scroll after a quiet period is handled at once, later ones collapse into
//! the latest position and are released by a later step.
//!
//! # Example
//!
//! ```ignore
//! use folio_web::step_program::StepProgram;
//! use folio_core::event::Event;
//! use core::time::Duration;
//!
//! let mut prog = StepProgram::new(page, 1280, 800);
//! prog.init()?;
//!
//! // Host-driven frame loop
//! prog.push_event(Event::scroll(420));
//! prog.advance_time(Duration::from_millis(16));
//! let result = prog.step()?;
//!
//! if result.rendered {
//!     let outputs = prog.take_outputs();
//!     // Hand outputs.view_json to the renderer, execute outputs.host_requests...
//! }
//! ```

use core::time::Duration;
use std::collections::VecDeque;

use folio_core::event::Event;
use folio_core::scroll_coalescer::ScrollCoalescer;
use folio_runtime::program::{Cmd, Model, TaskSpec};
use folio_runtime::timer::TimerQueue;
use serde::Serialize;

use crate::{DeterministicClock, WebBackendError, WebEventSource, WebOutputs};

type BoxedTask<Msg> = Box<dyn FnOnce() -> Msg + Send>;

/// Result of a single [`StepProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether a view was rendered during this step.
    pub rendered: bool,
    /// Number of events handed to the model during this step.
    pub events_processed: u32,
    /// Number of timers that fired during this step.
    pub timers_fired: u32,
    /// Whether a throttled scroll is still waiting for a later step.
    pub scroll_pending: bool,
    /// Current render index (monotonically increasing).
    pub render_idx: u64,
}

/// Host-driven, non-blocking program runner.
///
/// # Lifecycle
///
/// 1. [`StepProgram::new`]: create with model and initial viewport size.
/// 2. [`StepProgram::init`]: call once to initialize the model and render the first view.
/// 3. [`StepProgram::step`]: call repeatedly from the host event loop (e.g., `requestAnimationFrame`).
/// 4. Read outputs after each step via [`StepProgram::take_outputs`].
pub struct StepProgram<M: Model> {
    model: M,
    events: WebEventSource,
    clock: DeterministicClock,
    outputs: WebOutputs,
    timers: TimerQueue<M::Message>,
    tasks: VecDeque<(TaskSpec, BoxedTask<M::Message>)>,
    scrolls: ScrollCoalescer,
    initialized: bool,
    dirty: bool,
    render_idx: u64,
}

impl<M> StepProgram<M>
where
    M: Model,
    M::View: Serialize,
{
    /// Create a new step program with the given model and initial viewport size.
    #[must_use]
    pub fn new(model: M, width: u32, height: u32) -> Self {
        Self {
            model,
            events: WebEventSource::new(width, height),
            clock: DeterministicClock::new(),
            outputs: WebOutputs::default(),
            timers: TimerQueue::new(),
            tasks: VecDeque::new(),
            scrolls: ScrollCoalescer::default(),
            initialized: false,
            dirty: true,
            render_idx: 0,
        }
    }

    /// Use a different scroll throttle interval. Zero disables throttling.
    #[must_use]
    pub fn with_scroll_interval(mut self, interval: Duration) -> Self {
        self.scrolls = ScrollCoalescer::new(interval);
        self
    }

    /// Initialize the model and render the first view.
    ///
    /// Must be called exactly once before [`step`](Self::step).
    pub fn init(&mut self) -> Result<(), WebBackendError> {
        if self.initialized {
            return Err(WebBackendError::AlreadyInitialized);
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.drain_tasks();
        self.render()
    }

    /// Process pending events, fire due timers, and render if dirty.
    pub fn step(&mut self) -> Result<StepResult, WebBackendError> {
        if !self.initialized {
            return Err(WebBackendError::NotInitialized);
        }
        let now = self.clock.now();

        // 1. Pending events, with scrolls throttled.
        let mut events_processed: u32 = 0;
        while let Some(event) = self.events.read_event() {
            if let Some(event) = self.scrolls.push(event, now) {
                events_processed += 1;
                self.handle_event(event);
            }
        }

        // 2. Trailing-edge scroll whose interval has elapsed.
        if let Some(event) = self.scrolls.take_due(now) {
            events_processed += 1;
            self.handle_event(event);
        }

        // 3. Timers, earliest deadline first.
        let mut timers_fired: u32 = 0;
        while let Some((key, msg)) = self.timers.pop_due(now) {
            tracing::debug!(timer = %key, now_ms = now.as_millis() as u64, "timer fired");
            timers_fired += 1;
            self.dispatch(msg);
        }

        // 4. Render if dirty.
        let rendered = if self.dirty {
            self.render()?;
            true
        } else {
            false
        };

        Ok(StepResult {
            rendered,
            events_processed,
            timers_fired,
            scroll_pending: self.scrolls.has_pending(),
            render_idx: self.render_idx,
        })
    }

    /// Push a host event into the event queue.
    ///
    /// Events are processed on the next [`step`](Self::step) call.
    pub fn push_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = &event {
            self.events.set_size(*width, *height);
        }
        self.events.push_event(event);
    }

    /// Deliver a message from the view layer (a click, a keystroke) right away.
    pub fn send(&mut self, msg: M::Message) {
        self.dispatch(msg);
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Resize the viewport. Processed on the next [`step`](Self::step) call.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.push_event(Event::Resize { width, height });
    }

    /// Handle any throttled scroll now, regardless of interval.
    pub fn flush_scroll(&mut self) {
        if let Some(event) = self.scrolls.flush(self.clock.now()) {
            self.handle_event(event);
        }
    }

    /// Take the captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs {
        std::mem::take(&mut self.outputs)
    }

    /// Read the captured outputs without consuming them.
    pub fn outputs(&self) -> &WebOutputs {
        &self.outputs
    }

    /// When the host should call [`step`](Self::step) next to fire a timer or
    /// release a throttled scroll, as an absolute clock value.
    pub fn next_wakeup(&self) -> Option<Duration> {
        match (self.timers.next_deadline(), self.scrolls.pending_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Access the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutably access the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Current view, without rendering.
    pub fn view(&self) -> M::View {
        self.model.view()
    }

    /// Whether the program has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current render index.
    pub fn render_idx(&self) -> u64 {
        self.render_idx
    }

    /// Current viewport dimensions.
    pub fn size(&self) -> (u32, u32) {
        self.events.size()
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // --- Private helpers ---

    fn handle_event(&mut self, event: Event) {
        self.dispatch(M::Message::from(event));
    }

    fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute_cmd(cmd);
        self.drain_tasks();
    }

    fn render(&mut self) -> Result<(), WebBackendError> {
        let json = serde_json::to_string(&self.model.view())?;
        self.outputs.view_json = Some(json);
        self.dirty = false;
        self.render_idx += 1;
        Ok(())
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Log(text) => {
                self.outputs.logs.push(text);
            }
            Cmd::Host(request) => {
                tracing::debug!(request = request.name(), "host request");
                self.outputs.host_requests.push(request);
            }
            Cmd::Schedule { key, after, msg } => {
                let deadline = self.clock.now().saturating_add(after);
                self.timers.schedule(key, deadline, msg);
            }
            Cmd::Cancel(key) => {
                self.timers.cancel(key);
            }
            Cmd::Task(spec, f) => {
                // No threads: run after the current update has returned.
                self.tasks.push_back((spec, f));
            }
        }
    }

    fn drain_tasks(&mut self) {
        while let Some((spec, f)) = self.tasks.pop_front() {
            tracing::debug!(task = spec.name.as_deref().unwrap_or("<anon>"), "running task");
            let msg = f();
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_runtime::timer::TimerKey;
    use pretty_assertions::assert_eq;

    // ---- Test model ----

    const BUMP: TimerKey = TimerKey::new("bump");

    #[derive(Default)]
    struct Tracker {
        scrolls: Vec<i32>,
        bumps: u32,
        size: Option<(u32, u32)>,
    }

    #[derive(Debug)]
    enum TrackerMsg {
        Scrolled(i32),
        Resized(u32, u32),
        Bump,
        ScheduleBump(u64),
        Fetch,
    }

    impl From<Event> for TrackerMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Scroll(s) => Self::Scrolled(s.y),
                Event::Resize { width, height } => Self::Resized(width, height),
            }
        }
    }

    #[derive(Serialize)]
    struct TrackerView {
        last_scroll: Option<i32>,
        bumps: u32,
    }

    impl Model for Tracker {
        type Message = TrackerMsg;
        type View = TrackerView;

        fn update(&mut self, msg: TrackerMsg) -> Cmd<TrackerMsg> {
            match msg {
                TrackerMsg::Scrolled(y) => {
                    self.scrolls.push(y);
                    Cmd::none()
                }
                TrackerMsg::Resized(w, h) => {
                    self.size = Some((w, h));
                    Cmd::log(format!("resized to {w}x{h}"))
                }
                TrackerMsg::Bump => {
                    self.bumps += 1;
                    Cmd::none()
                }
                TrackerMsg::ScheduleBump(ms) => {
                    Cmd::schedule(BUMP, Duration::from_millis(ms), TrackerMsg::Bump)
                }
                TrackerMsg::Fetch => Cmd::task_named("fetch", || TrackerMsg::Bump),
            }
        }

        fn view(&self) -> TrackerView {
            TrackerView {
                last_scroll: self.scrolls.last().copied(),
                bumps: self.bumps,
            }
        }
    }

    fn program() -> StepProgram<Tracker> {
        let mut prog = StepProgram::new(Tracker::default(), 1280, 800);
        prog.init().unwrap();
        prog
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ---- Lifecycle ----

    #[test]
    fn init_renders_first_view() {
        let prog = program();
        assert!(prog.is_initialized());
        assert_eq!(prog.render_idx(), 1);
        assert_eq!(
            prog.outputs().view_json.as_deref(),
            Some(r#"{"last_scroll":null,"bumps":0}"#)
        );
    }

    #[test]
    fn init_twice_is_an_error() {
        let mut prog = program();
        assert_eq!(prog.init(), Err(WebBackendError::AlreadyInitialized));
    }

    #[test]
    fn step_before_init_is_an_error() {
        let mut prog = StepProgram::new(Tracker::default(), 1, 1);
        assert_eq!(prog.step(), Err(WebBackendError::NotInitialized));
    }

    #[test]
    fn idle_step_does_not_render() {
        let mut prog = program();
        let result = prog.step().unwrap();
        assert!(!result.rendered);
        assert_eq!(result.events_processed, 0);
        assert_eq!(result.render_idx, 1);
    }

    // ---- Scroll throttling ----

    #[test]
    fn burst_of_scrolls_collapses_to_first_and_latest() {
        let mut prog = program();
        for y in [10, 20, 30, 40] {
            prog.push_event(Event::scroll(y));
        }
        let result = prog.step().unwrap();
        assert_eq!(result.events_processed, 1);
        assert!(result.scroll_pending);
        assert_eq!(prog.model().scrolls, vec![10]);
        assert_eq!(prog.next_wakeup(), Some(ms(16)));

        prog.advance_time(ms(16));
        let result = prog.step().unwrap();
        assert_eq!(result.events_processed, 1);
        assert!(!result.scroll_pending);
        assert_eq!(prog.model().scrolls, vec![10, 40]);
    }

    #[test]
    fn wakeup_tracks_last_released_scroll() {
        let mut prog = program();
        prog.push_event(Event::scroll(10));
        prog.step().unwrap();

        prog.advance_time(ms(10));
        prog.push_event(Event::scroll(20));
        let result = prog.step().unwrap();
        assert_eq!(result.events_processed, 0);
        assert!(result.scroll_pending);
        assert_eq!(prog.next_wakeup(), Some(ms(16)));

        prog.set_time(ms(16));
        let result = prog.step().unwrap();
        assert_eq!(result.events_processed, 1);
        assert_eq!(prog.model().scrolls, vec![10, 20]);
        assert_eq!(prog.next_wakeup(), None);
    }

    #[test]
    fn zero_interval_passes_every_scroll() {
        let mut prog = StepProgram::new(Tracker::default(), 1280, 800).with_scroll_interval(ms(0));
        prog.init().unwrap();
        for y in [1, 2, 3] {
            prog.push_event(Event::scroll(y));
        }
        prog.step().unwrap();
        assert_eq!(prog.model().scrolls, vec![1, 2, 3]);
    }

    #[test]
    fn flush_releases_pending_scroll() {
        let mut prog = program();
        prog.push_event(Event::scroll(5));
        prog.push_event(Event::scroll(6));
        prog.step().unwrap();
        prog.flush_scroll();
        assert_eq!(prog.model().scrolls, vec![5, 6]);
    }

    #[test]
    fn resize_updates_size_and_logs() {
        let mut prog = program();
        prog.resize(390, 844);
        assert_eq!(prog.size(), (390, 844));
        prog.step().unwrap();
        assert_eq!(prog.model().size, Some((390, 844)));
        assert_eq!(prog.take_outputs().logs, vec!["resized to 390x844"]);
    }

    // ---- Timers and tasks ----

    #[test]
    fn timer_fires_once_deadline_reached() {
        let mut prog = program();
        prog.dispatch(TrackerMsg::ScheduleBump(100));
        assert_eq!(prog.next_wakeup(), Some(ms(100)));

        prog.advance_time(ms(99));
        assert_eq!(prog.step().unwrap().timers_fired, 0);
        prog.advance_time(ms(1));
        let result = prog.step().unwrap();
        assert_eq!(result.timers_fired, 1);
        assert!(result.rendered);
        assert_eq!(prog.view().bumps, 1);
        assert_eq!(prog.pending_timers(), 0);
    }

    #[test]
    fn rescheduling_replaces_timer() {
        let mut prog = program();
        prog.dispatch(TrackerMsg::ScheduleBump(100));
        prog.advance_time(ms(50));
        prog.dispatch(TrackerMsg::ScheduleBump(100));
        prog.advance_time(ms(60));
        assert_eq!(prog.step().unwrap().timers_fired, 0);
        prog.advance_time(ms(40));
        assert_eq!(prog.step().unwrap().timers_fired, 1);
        assert_eq!(prog.view().bumps, 1);
    }

    #[test]
    fn tasks_run_after_update() {
        let mut prog = program();
        prog.dispatch(TrackerMsg::Fetch);
        assert_eq!(prog.view().bumps, 1);
    }

    #[test]
    fn set_time_never_rewinds() {
        let mut prog = program();
        prog.set_time(ms(500));
        prog.set_time(ms(100));
        assert_eq!(prog.now(), ms(500));
    }
}
