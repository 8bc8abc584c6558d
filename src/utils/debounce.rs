//! Trailing-edge debounce timer

use std::time::Duration;

use tokio::time::Instant;

/// Collapses a burst of triggers into a single firing once a quiescence
/// window has elapsed since the last trigger.
///
/// Each `trigger` re-arms the deadline, discarding any pending one; the
/// owner polls [`fire_if_elapsed`](Debouncer::fire_if_elapsed) from its
/// event-loop tick, or sleeps until [`deadline`](Debouncer::deadline) in a
/// `select!`-style loop.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer, replacing any pending deadline.
    pub fn trigger(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The instant the pending firing is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once per armed deadline, after it has elapsed.
    pub fn fire_if_elapsed(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_window() {
        let mut debounce = Debouncer::new(Duration::from_millis(300));
        debounce.trigger();

        tokio::time::advance(Duration::from_millis(299)).await;
        assert!(!debounce.fire_if_elapsed());
        assert!(debounce.is_pending());

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(debounce.fire_if_elapsed());
        assert!(!debounce.fire_if_elapsed());
        assert!(!debounce.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_resets_the_window() {
        let mut debounce = Debouncer::new(Duration::from_millis(300));
        debounce.trigger();

        tokio::time::advance(Duration::from_millis(200)).await;
        debounce.trigger();

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(!debounce.fire_if_elapsed());

        tokio::time::advance(Duration::from_millis(101)).await;
        assert!(debounce.fire_if_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_deadline() {
        let mut debounce = Debouncer::new(Duration::from_millis(300));
        debounce.trigger();
        debounce.cancel();

        tokio::time::advance(Duration::from_millis(400)).await;
        assert!(!debounce.fire_if_elapsed());
    }
}
