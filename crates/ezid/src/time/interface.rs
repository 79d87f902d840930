use core::time::Duration;
use std::sync::Arc;

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH: Duration = Duration::from_millis(1_735_689_600_000);

/// A source of millisecond ticks for the 64-bit snowflake layout.
///
/// Implementations must never go backwards within a process. The generator
/// treats a smaller tick as a fatal clock regression.
///
/// # Example
///
/// ```
/// use ezid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// A source of whole unix seconds for the 96-bit layout.
pub trait UnixTimeSource {
    /// Seconds since 1970-01-01T00:00:00Z, truncated to 32 bits.
    fn unix_seconds(&self) -> u32;
}

impl<T: UnixTimeSource + ?Sized> UnixTimeSource for &T {
    fn unix_seconds(&self) -> u32 {
        (**self).unix_seconds()
    }
}

impl<T: UnixTimeSource + ?Sized> UnixTimeSource for Arc<T> {
    fn unix_seconds(&self) -> u32 {
        (**self).unix_seconds()
    }
}
