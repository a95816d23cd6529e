use std::time::{Duration, Instant};

/// Resize debounce used by [`super::ChartContainer`] unless configured.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Trailing-edge debouncer driven by caller-supplied timestamps.
///
/// A burst of [`trigger`](Debouncer::trigger) calls fires once, `interval`
/// after the last call in the burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    interval: Duration,
    last_event: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_event: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records an event. Events older than the pending one are ignored.
    pub fn trigger(&mut self, at: Instant) {
        self.last_event = Some(match self.last_event {
            Some(last) if last > at => last,
            _ => at,
        });
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.last_event.is_some()
    }

    /// When the pending burst will fire, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.last_event.map(|last| last + self.interval)
    }

    /// Returns `true` exactly once per burst, when `now` has reached the
    /// deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.last_event = None;
    }
}
