use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Time source for quiz sessions; fixed in tests so elapsed times are deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Advance a fixed clock by `delta`. No effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Whole seconds spent on a quiz attempt.
///
/// Displays as `m:ss` (minutes unpadded, seconds zero-padded to two digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ElapsedTime {
    secs: u64,
}

impl ElapsedTime {
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Elapsed whole seconds between two instants, truncating sub-second parts.
    ///
    /// A `to` earlier than `from` yields zero.
    #[must_use]
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        let secs = (to - from).num_seconds();
        Self {
            secs: u64::try_from(secs).unwrap_or(0),
        }
    }

    #[must_use]
    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    #[must_use]
    pub fn minutes(&self) -> u64 {
        self.secs / 60
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.secs % 60
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes(), self.seconds())
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

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

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_minutes_and_padded_seconds() {
        assert_eq!(ElapsedTime::from_secs(0).to_string(), "0:00");
        assert_eq!(ElapsedTime::from_secs(65).to_string(), "1:05");
        assert_eq!(ElapsedTime::from_secs(600).to_string(), "10:00");
    }

    #[test]
    fn elapsed_truncates_partial_seconds() {
        let start = fixed_now();
        let end = start + Duration::milliseconds(59_999);
        assert_eq!(ElapsedTime::between(start, end).as_secs(), 59);
    }

    #[test]
    fn elapsed_clamps_reversed_range_to_zero() {
        let start = fixed_now();
        let end = start - Duration::seconds(5);
        assert_eq!(ElapsedTime::between(start, end), ElapsedTime::default());
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(90));
    }
}
