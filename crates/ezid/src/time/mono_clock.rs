use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::{CUSTOM_EPOCH, TimeSource};

/// A monotonic time source that returns elapsed time since construction,
/// offset from a user-defined epoch.
///
/// This avoids wall-clock adjustments (e.g., NTP corrections) while still
/// aligning timestamps to a fixed origin. The wall clock is read exactly once,
/// when the clock is built, to compute that offset.
///
/// Copies share the same anchor and therefore report the same ticks.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch_offset: u64, // in milliseconds
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to [`CUSTOM_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(CUSTOM_EPOCH)
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock using `epoch` (a [`Duration`] since
    /// 1970-01-01 UTC) as tick zero.
    ///
    /// If the system clock reads earlier than `epoch` the offset saturates to
    /// zero, so ticks start counting from construction instead.
    ///
    /// # Example
    ///
    /// ```
    /// use ezid::{MonotonicClock, TimeSource};
    /// use std::time::{Duration, SystemTime, UNIX_EPOCH};
    ///
    /// let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
    /// let clock = MonotonicClock::with_epoch(now);
    ///
    /// let a = clock.current_millis();
    /// std::thread::sleep(Duration::from_millis(2));
    /// assert!(clock.current_millis() >= a);
    /// ```
    #[must_use]
    pub fn with_epoch(epoch: Duration) -> Self {
        let start = Instant::now();
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let epoch_offset = system_now.saturating_sub(epoch).as_millis() as u64;
        Self {
            start,
            epoch_offset,
        }
    }

    /// Milliseconds between the epoch and construction.
    #[must_use]
    pub const fn epoch_offset(&self) -> u64 {
        self.epoch_offset
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.epoch_offset + self.start.elapsed().as_millis() as u64
    }
}
