//! Last-writer-wins debouncing of a single value slot.

use std::time::{Duration, Instant};

use tracing::trace;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
    serial: u64,
}

/// Delays a value until it has stayed unchanged for a fixed window.
///
/// Each [`Debouncer::schedule`] supersedes the pending value, so at most one
/// update is ever in flight. Callers pass the current time explicitly, which
/// keeps the debouncer usable from any event loop and deterministic in tests.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
    issued: u64,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            issued: 0,
        }
    }

    /// Schedules `value` to fire at `now + window`, cancelling any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.issued += 1;
        if let Some(previous) = self.pending.take() {
            trace!(superseded = previous.serial, serial = self.issued, "debounce rescheduled");
        }
        self.pending = Some(Pending {
            value,
            deadline: now + self.window,
            serial: self.issued,
        });
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Time left before the pending value fires, zero once due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Releases the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.deadline <= now);
        if due {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    /// Releases the pending value now, as if its deadline had passed.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}
