//! Single-shot timers on a logical clock.
//!
//! A [`Schedule`] holds at most one pending timer per kind: scheduling a kind
//! that is already pending replaces it, so timers are never stacked. Time only
//! moves when the owner calls [`Schedule::pop_due`] / [`Schedule::settle`],
//! which keeps every timer-driven rule testable without sleeping.

use std::time::Duration;

/// Cancellation handle for one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct PendingTimer<K> {
    id: TimerId,
    kind: K,
    deadline: Duration,
}

#[derive(Debug, Clone)]
pub struct Schedule<K> {
    now: Duration,
    pending: Vec<PendingTimer<K>>,
    next_id: u64,
}

impl<K: Copy + PartialEq> Default for Schedule<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + PartialEq> Schedule<K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `kind` after `delay`, replacing any pending timer of that kind.
    pub fn schedule(&mut self, kind: K, delay: Duration) -> TimerId {
        self.cancel(kind);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            kind,
            deadline: self.now + delay,
        });
        id
    }

    /// Cancel the pending timer of this kind. Returns whether one existed.
    pub fn cancel(&mut self, kind: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind != kind);
        self.pending.len() != before
    }

    /// Cancel through a handle. A handle whose timer already fired or was
    /// replaced is a no-op.
    pub fn cancel_id(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: K) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    /// Time left before `kind` fires, if it is pending.
    pub fn remaining(&self, kind: K) -> Option<Duration> {
        self.pending
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.deadline.saturating_sub(self.now))
    }

    /// Remove and return the earliest timer due at or before `until`, moving
    /// the clock to its deadline. Equal deadlines fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<K> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.id.0))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.deadline);
        Some(timer.kind)
    }

    /// Move the clock to `until` once every due timer has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
