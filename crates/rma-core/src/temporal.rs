//! # Temporal Types
//!
//! UTC-only time handling for the Returns Stack. All timestamps are stored
//! as `chrono::DateTime<Utc>`; local time conversion is a presentation
//! concern handled outside this core.
//!
//! ## Design Decision
//!
//! Deadline arithmetic and audit timestamps must be deterministic under
//! test. Nothing in the workspace calls `Utc::now()` directly except
//! [`SystemClock`]; everything else receives a [`Clock`] (or an explicit
//! `now` argument) so that tests can pin or advance time at will.

use chrono::{DateTime, Utc};

/// A source of the present time.
///
/// Injected into the engine at construction. Production code uses
/// [`SystemClock`]; tests use [`FixedClock`].
pub trait Clock: Send + Sync {
    /// The current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock: reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a settable instant, for deterministic tests.
#[derive(Debug)]
pub struct FixedClock {
    instant: std::sync::RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock pinned to the given instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: std::sync::RwLock::new(instant),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.write().expect("fixed clock lock poisoned") = instant;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.instant.write().expect("fixed clock lock poisoned");
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.read().expect("fixed clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn fixed_clock_is_pinned() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let clock = FixedClock::new(t0);
        assert_eq!(clock.now(), t0);
        assert_eq!(clock.now(), t0);
    }

    #[test]
    fn fixed_clock_advances() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let clock = FixedClock::new(t0);
        clock.advance(Duration::days(3));
        assert_eq!(clock.now(), t0 + Duration::days(3));
    }

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
