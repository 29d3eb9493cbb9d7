use std::time::{Duration, Instant};

/// Coalesces bursts of resize notifications into one deferred application.
///
/// Every notification pushes the deadline to `now + delay`; [`ResizeDebouncer::poll`] reports
/// readiness once a poll happens at or after the deadline.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    /// Debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Quiet period that must elapse after the last notification.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a resize notification at `now`.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// `true` while a notification is waiting to be applied.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Return `true` exactly once per burst, when `now` has reached the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending notification.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/resize.rs"]
mod tests;
