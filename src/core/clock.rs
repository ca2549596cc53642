//! Wall-clock sources for the timed-mode decay loop.
//!
//! The session only reads the clock when it is polled, so a manual clock is
//! enough to drive decay deterministically in tests.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Real time via `chrono::Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle while the
/// session owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.now.set(to);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::default())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let handle = clock.clone();
        let start = clock.now();

        handle.advance(Duration::seconds(90));

        assert_eq!(clock.now() - start, Duration::seconds(90));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::default();
        let target = DateTime::<Utc>::default() + Duration::days(3);
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
