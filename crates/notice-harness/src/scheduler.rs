#![forbid(unsafe_code)]

//! Virtual-clock [`Scheduler`].

use std::collections::BTreeMap;
use std::time::Duration;

use notice_core::{Scheduler, TimerId};

/// Timers ordered by due time, then by scheduling order.
///
/// Nothing fires on its own; the caller pops due timers and hands them to
/// the notifier.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    queue: BTreeMap<(Duration, u64), TimerId>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock. Never moves it backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Number of timers waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest waiting timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Pop the earliest timer due at or before `target`, advancing the
    /// clock to its due time.
    pub fn pop_due(&mut self, target: Duration) -> Option<TimerId> {
        let (&(due, seq), _) = self.queue.first_key_value()?;
        if due > target {
            return None;
        }
        let timer = self.queue.remove(&(due, seq))?;
        self.set_now(due);
        Some(timer)
    }

    /// Pop the earliest timer regardless of due time.
    pub fn pop_next(&mut self) -> Option<TimerId> {
        let ((due, _), timer) = self.queue.pop_first()?;
        self.set_now(due);
        Some(timer)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        self.seq += 1;
        self.queue.insert((self.now + delay, self.seq), timer);
    }

    fn cancel(&mut self, timer: TimerId) {
        self.queue.retain(|_, t| *t != timer);
    }
}
