/// Time source and single-owner timer slots
///
/// Timers are deadlines, not callbacks: the host delivers ticks and each
/// state machine checks its own slot. Every transition is a plain function
/// of `now`, so tests drive them with a `ManualClock`.

use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock for tests; advancing it never sleeps
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Instant>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: std::rc::Rc::new(std::cell::Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    deadline: Instant,
}

impl TimerHandle {
    #[cfg(test)]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Holds at most one pending timer.
///
/// Arming always replaces the previous handle, so a slot can never have
/// two instances of the same timer in flight.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next_id: u64,
    pending: Option<TimerHandle>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending and arm a fresh timer due at `deadline`
    pub fn arm_at(&mut self, deadline: Instant) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            deadline,
        };
        self.pending = Some(handle);
        handle
    }

    pub fn arm(&mut self, now: Instant, after: Duration) -> TimerHandle {
        self.arm_at(now + after)
    }

    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Remove and return the pending timer if its deadline has passed
    pub fn take_expired(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some(handle) if handle.deadline <= now => self.pending.take(),
            _ => None,
        }
    }
}
