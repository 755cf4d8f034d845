//! Wall-clock capability used when creating logs.

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let instant = DateTime::parse_from_rfc3339("2019-03-04T15:04:05-05:00").unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now().timestamp(), 1551729845);
    }
}
