use chrono::{DateTime, Duration, Utc};

/// Shared notion of "now" for services and tests.
///
/// Widget timestamps, debounce deadlines, and notice expiries all read time
/// through a `Clock`, so tests freeze it and step it forward manually.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Real wall-clock time.
    #[default]
    System,
    /// Frozen time, advanced explicitly.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock frozen at the given instant.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Current time according to this clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Step a frozen clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(at) = self {
            *at += delta;
        }
    }

    /// Returns true when this clock is frozen.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic timestamp for tests (2025-01-15T10:40:00Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_736_937_600;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` frozen at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_in_steps() {
        let mut clock = fixed_clock();
        let start = clock.now();

        clock.advance(Duration::milliseconds(400));
        clock.advance(Duration::milliseconds(600));

        assert_eq!(clock.now(), start + Duration::seconds(1));
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::System;
        clock.advance(Duration::hours(1));
        assert!(!clock.is_fixed());
    }

    #[test]
    fn fixed_clock_is_stable_between_reads() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
    }
}
