//! Wall-clock source used to anchor relative times

use time::OffsetDateTime;

/// Resolved times below this value are offsets from "now" (RFC 8428, 4.5.3).
pub const RELATIVE_TIME_THRESHOLD: f64 = 268_435_456.0; // 2^28

/// Source of the current time, in seconds since the Unix epoch
pub trait Clock {
    fn now(&self) -> f64;
}

/// The system wall clock, truncated to whole seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        OffsetDateTime::now_utc().unix_timestamp() as f64
    }
}

/// A clock frozen at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Anchor `time` at `now` if it is relative, otherwise return it unchanged
pub fn to_absolute(time: f64, now: f64) -> f64 {
    if time < RELATIVE_TIME_THRESHOLD {
        time + now
    } else {
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_two_to_the_28() {
        assert_eq!(RELATIVE_TIME_THRESHOLD, 2f64.powi(28));
    }

    #[test]
    fn test_to_absolute_boundary() {
        let now = 1_700_000_000.0;
        assert_eq!(to_absolute(RELATIVE_TIME_THRESHOLD, now), 268_435_456.0);
        assert_eq!(
            to_absolute(RELATIVE_TIME_THRESHOLD - 1.0, now),
            268_435_455.0 + now
        );
        assert_eq!(to_absolute(-5.0, now), now - 5.0);
        assert_eq!(to_absolute(0.0, now), now);
    }

    #[test]
    fn test_system_clock_is_absolute() {
        let now = SystemClock.now();
        assert!(now >= RELATIVE_TIME_THRESHOLD);
        assert_eq!(now.fract(), 0.0);
    }
}
