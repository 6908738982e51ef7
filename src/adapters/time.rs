//! Time sources backing audit timestamps.

use crate::domain::entities::Timestamp;
use crate::ports::outbound::TimeSource;

/// Default time source using system time.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Fixed time source for tests: returns a constant until changed.
pub struct FixedTimeSource {
    now: std::sync::atomic::AtomicU64,
}

impl FixedTimeSource {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: std::sync::atomic::AtomicU64::new(now),
        }
    }

    /// Move the clock. Subsequent `now()` calls return `now`.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, std::sync::atomic::Ordering::Relaxed);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(std::sync::atomic::Ordering::Relaxed)
    }
}
