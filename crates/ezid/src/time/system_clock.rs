use std::time::{SystemTime, UNIX_EPOCH};

use crate::UnixTimeSource;

/// Wall-clock [`UnixTimeSource`] backed by [`SystemTime`].
///
/// The 96-bit layout only has second resolution and tolerates the wall clock
/// moving, so no monotonic anchoring is applied. Reads before 1970 report 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl UnixTimeSource for SystemClock {
    fn unix_seconds(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_current_unix_seconds() {
        // 2025-01-01T00:00:00Z
        assert!(SystemClock.unix_seconds() >= 1_735_689_600);
    }
}
