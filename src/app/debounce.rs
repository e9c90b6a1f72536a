//! Generation-token debouncing on top of Zellij timers.
//!
//! Zellij's `set_timeout` cannot be cancelled and its `Timer` event does not
//! say which timeout fired. Because every timeout started here uses the same
//! delay, timers fire in the order they were started, so each `Timer` event
//! can be paired with the oldest outstanding schedule. A schedule only fires
//! if it is still the newest one and has not been cancelled.

use std::collections::VecDeque;
use std::time::Duration;

/// Default quiet period before a suggestion fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    cancelled_through: u64,
    outstanding: VecDeque<u64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            cancelled_through: 0,
            outstanding: VecDeque::new(),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Supersedes any earlier schedule and returns the timeout to start.
    pub fn schedule(&mut self) -> Duration {
        self.generation += 1;
        self.outstanding.push_back(self.generation);
        self.delay
    }

    /// Consumes one timer event; returns `true` if the debounced action
    /// should run now.
    pub fn on_timer(&mut self) -> bool {
        let Some(fired) = self.outstanding.pop_front() else {
            tracing::trace!("timer without outstanding debounce schedule");
            return false;
        };

        fired == self.generation && fired > self.cancelled_through
    }

    /// Cancels the pending schedule, if any. Timers already started still
    /// arrive but are absorbed by [`Debouncer::on_timer`].
    pub fn cancel(&mut self) {
        self.cancelled_through = self.generation;
    }

    /// Whether a schedule is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.generation > self.cancelled_through && self.outstanding.back() == Some(&self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_schedule_fires_once() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.schedule(), Duration::from_millis(300));
        assert!(debouncer.is_pending());

        assert!(debouncer.on_timer());
        assert!(!debouncer.is_pending());
        assert!(!debouncer.on_timer());
    }

    #[test]
    fn burst_collapses_to_last_timer() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        for _ in 0..3 {
            debouncer.schedule();
        }

        assert!(!debouncer.on_timer());
        assert!(!debouncer.on_timer());
        assert!(debouncer.on_timer());
    }

    #[test]
    fn cancel_absorbs_outstanding_timers() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule();
        debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        assert!(!debouncer.on_timer());
        assert!(!debouncer.on_timer());
    }

    #[test]
    fn schedule_after_cancel_fires_again() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule();
        debouncer.cancel();
        debouncer.schedule();

        assert!(!debouncer.on_timer());
        assert!(debouncer.on_timer());
    }
}
