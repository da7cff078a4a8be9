/// Idle-driven visibility of the controls overlay

use std::time::{Duration, Instant};

use super::clock::TimerSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Visible while a countdown is pending, hidden once it expires.
/// Any activity shows the overlay and restarts the countdown.
#[derive(Debug)]
pub struct VisibilityTimer {
    idle_timeout: Duration,
    slot: TimerSlot,
}

impl VisibilityTimer {
    /// Starts visible with the countdown already running
    pub fn new(now: Instant, idle_timeout: Duration) -> Self {
        let mut slot = TimerSlot::new();
        slot.arm(now, idle_timeout);
        Self { idle_timeout, slot }
    }

    pub fn state(&self) -> Visibility {
        if self.slot.pending().is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state() == Visibility::Visible
    }

    #[cfg(test)]
    pub fn handle(&self) -> Option<super::clock::TimerHandle> {
        self.slot.pending()
    }

    pub fn activity(&mut self, now: Instant) -> Visibility {
        self.slot.arm(now, self.idle_timeout);
        Visibility::Visible
    }

    /// Returns true if the overlay just went hidden
    pub fn poll(&mut self, now: Instant) -> bool {
        self.slot.take_expired(now).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: Duration = Duration::from_millis(3000);

    #[test]
    fn test_starts_visible_with_countdown() {
        let timer = VisibilityTimer::new(Instant::now(), IDLE);
        assert_eq!(timer.state(), Visibility::Visible);
        assert!(timer.handle().is_some());
    }

    #[test]
    fn test_hides_after_idle_timeout() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::new(start, IDLE);

        assert!(!timer.poll(start + Duration::from_millis(2999)));
        assert!(timer.is_visible());

        assert!(timer.poll(start + IDLE));
        assert_eq!(timer.state(), Visibility::Hidden);
        assert!(timer.handle().is_none());
    }

    #[test]
    fn test_activity_restarts_countdown() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::new(start, IDLE);
        let first = timer.handle();

        let moved = start + Duration::from_millis(2000);
        timer.activity(moved);
        assert_ne!(timer.handle(), first);

        assert!(!timer.poll(start + IDLE));
        assert!(timer.poll(moved + IDLE));
    }

    #[test]
    fn test_activity_while_hidden_shows_overlay() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::new(start, IDLE);
        timer.poll(start + IDLE);
        assert!(!timer.is_visible());

        let later = start + Duration::from_secs(10);
        assert_eq!(timer.activity(later), Visibility::Visible);
        assert_eq!(timer.handle().map(|h| h.deadline()), Some(later + IDLE));
    }

    #[test]
    fn test_hidden_stays_hidden_without_activity() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::new(start, IDLE);
        assert!(timer.poll(start + IDLE));
        assert!(!timer.poll(start + Duration::from_secs(60)));
        assert!(!timer.is_visible());
    }
}
