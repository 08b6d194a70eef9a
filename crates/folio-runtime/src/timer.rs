#![forbid(unsafe_code)]

//! Keyed, cancellable one-shot timers.
//!
//! Timers replace fire-and-forget `setTimeout` calls. Each pending timer
//! lives in a named slot ([`TimerKey`]); scheduling into an occupied slot
//! replaces the old timer and cancelling empties the slot, so a superseded
//! timer can never fire.
//!
//! # How it works
//!
//! 1. `Cmd::Schedule` inserts `(key, now + after, msg)`
//! 2. The runner advances its clock and pops due timers one at a time
//! 3. Each popped message goes through `Model::update`, which may schedule
//!    or cancel further timers before the next pop
//!
//! Timers with equal deadlines fire in scheduling order.

use core::fmt;
use core::time::Duration;

/// Name of a timer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerKey(&'static str);

impl TimerKey {
    /// Create a key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Slot name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug)]
struct PendingTimer<M> {
    key: TimerKey,
    deadline: Duration,
    seq: u64,
    msg: M,
}

/// A small set of pending one-shot timers, at most one per key.
#[derive(Debug)]
pub struct TimerQueue<M> {
    pending: Vec<PendingTimer<M>>,
    next_seq: u64,
}

impl<M> Default for TimerQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> TimerQueue<M> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `msg` to fire at the absolute time `deadline`.
    ///
    /// Returns `true` if a pending timer under the same key was replaced.
    pub fn schedule(&mut self, key: TimerKey, deadline: Duration, msg: M) -> bool {
        let replaced = self.remove(key);
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(PendingTimer {
            key,
            deadline,
            seq,
            msg,
        });
        tracing::trace!(
            key = key.name(),
            deadline_ms = deadline.as_millis() as u64,
            replaced,
            "timer scheduled"
        );
        replaced
    }

    /// Cancel the timer under `key`. Returns `true` if one was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let removed = self.remove(key);
        if removed {
            tracing::trace!(key = key.name(), "timer cancelled");
        }
        removed
    }

    /// Whether a timer is pending under `key`.
    #[must_use]
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.iter().any(|t| t.key == key)
    }

    /// Deadline of the timer under `key`.
    #[must_use]
    pub fn deadline(&self, key: TimerKey) -> Option<Duration> {
        self.pending
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.deadline)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Remove and return the earliest timer due at `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerKey, M)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(i, _)| i)?;
        let timer = self.pending.swap_remove(idx);
        tracing::trace!(key = timer.key.name(), "timer fired");
        Some((timer.key, timer.msg))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn remove(&mut self, key: TimerKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.key != key);
        before != self.pending.len()
    }
}
