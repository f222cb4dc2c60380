use std::time::{Duration, Instant};
use tracing::debug;

/// Source of monotonic time for the scheduler
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Handle to a scheduled timer. Never reused within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<E> {
    handle: TimerHandle,
    deadline: Instant,
    event: E,
}

/// One-shot, cancellable timers polled from the event loop.
///
/// Nothing fires on its own: the owner calls [`Scheduler::pop_due`] on every
/// tick and handles the returned events on the same thread.
pub struct Scheduler<E> {
    clock: Box<dyn Clock>,
    next_handle: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Scheduler<E> {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            next_handle: 1,
            timers: Vec::new(),
        }
    }

    /// Schedule `event` to become due after `delay`
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            deadline: self.clock.now() + delay,
            event,
        });
        debug!(handle = handle.0, delay_ms = delay.as_millis() as u64, "timer scheduled");
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        let cancelled = self.timers.len() != before;
        if cancelled {
            debug!(handle = handle.0, "timer cancelled");
        }
        cancelled
    }

    /// Time left before the timer fires (zero if overdue).
    /// None once it has fired or been cancelled.
    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        let now = self.clock.now();
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.deadline.saturating_duration_since(now))
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Remove and return every due event, earliest deadline first.
    /// Timers sharing a deadline fire in the order they were scheduled.
    pub fn pop_due(&mut self) -> Vec<E> {
        let now = self.clock.now();
        let (mut due, pending): (Vec<Timer<E>>, Vec<Timer<E>>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;

        due.sort_by_key(|t| (t.deadline, t.handle));
        due.into_iter().map(|t| t.event).collect()
    }
}
