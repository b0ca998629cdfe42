use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

/// Source of write timestamps for the store-access layer.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock that never hands out the same or an earlier instant twice.
///
/// Two writes landing within the same clock tick still get strictly
/// increasing timestamps.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_nanos: AtomicI64,
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX - 1);
        let mut prev = self.last_nanos.load(Ordering::Relaxed);
        loop {
            let next = wall.max(prev.saturating_add(1));
            match self.last_nanos.compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return Utc.timestamp_nanos(next),
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_strictly_increase() {
        let clock = SystemClock::default();
        let mut last = clock.now();
        for _ in 0..1_000 {
            let next = clock.now();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn saturates_at_the_representable_limit() {
        let clock = SystemClock { last_nanos: AtomicI64::new(i64::MAX) };
        assert_eq!(clock.now().timestamp_nanos_opt(), Some(i64::MAX));
        assert_eq!(clock.now().timestamp_nanos_opt(), Some(i64::MAX));
    }
}
