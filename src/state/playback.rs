/// Automatic slide advancement
///
/// Two states: stopped (no timer) and running (exactly one repeating
/// deadline). Running is derived from the slot, so the handle can never
/// exist without the state.

use std::time::{Duration, Instant};

use super::clock::TimerSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running,
}

#[derive(Debug)]
pub struct PlaybackTimer {
    interval: Duration,
    slot: TimerSlot,
}

impl PlaybackTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            slot: TimerSlot::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.slot.pending().is_some() {
            PlaybackState::Running
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == PlaybackState::Running
    }

    #[cfg(test)]
    pub fn handle(&self) -> Option<super::clock::TimerHandle> {
        self.slot.pending()
    }

    /// Start or stop the repeating tick
    pub fn toggle(&mut self, now: Instant) -> PlaybackState {
        match self.state() {
            PlaybackState::Stopped => {
                self.slot.arm(now, self.interval);
            }
            PlaybackState::Running => {
                self.slot.cancel();
            }
        }
        self.state()
    }

    /// After manual navigation: count the interval from `now`.
    /// Does nothing while stopped.
    pub fn restart(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        self.slot.arm(now, self.interval);
        true
    }

    /// Returns true if a tick is due; the next one is armed one interval
    /// after the expired deadline, or after `now` if the host fell behind.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(expired) = self.slot.take_expired(now) else {
            return false;
        };

        let next = expired.deadline() + self.interval;
        if next > now {
            self.slot.arm_at(next);
        } else {
            self.slot.arm(now, self.interval);
        }
        true
    }

    /// Control label for the play/pause button
    pub fn label(&self) -> &'static str {
        match self.state() {
            PlaybackState::Stopped => "▶",
            PlaybackState::Running => "⏸",
        }
    }
}
