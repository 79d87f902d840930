use core::sync::atomic::Ordering;
use std::sync::OnceLock;

use portable_atomic::AtomicU32;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    EzId, IdFormat, RandSource, SystemClock, ThreadRandom, UnixTimeSource,
    layout::{MAX_EZID_GENERATOR_ID, MAX_EZID_SEQUENCE, pack_ezid},
};

/// A lock-free 96-bit allocator: unix seconds, a random 40-bit generator id
/// and a 24-bit sequence.
///
/// Each call performs one atomic increment. The sequence wraps silently after
/// 2^24 ids; two ids from the same instance collide only if that many are
/// allocated within one second. Uniqueness across instances relies on their
/// random generator ids differing, so it is probabilistic.
///
/// ```
/// use ezid::{EzId, SystemClock, ThreadRandom, TimeRandomGenerator};
///
/// let generator = TimeRandomGenerator::new(SystemClock, &ThreadRandom);
/// let a: EzId = generator.next_id();
/// let b: EzId = generator.next_id();
/// assert_ne!(a, b);
/// assert_eq!(a.generator_id(), b.generator_id());
/// ```
#[derive(Debug)]
pub struct TimeRandomGenerator<T: UnixTimeSource = SystemClock> {
    generator_id: u64,
    #[cfg(feature = "cache-padded")]
    sequence: crossbeam_utils::CachePadded<AtomicU32>,
    #[cfg(not(feature = "cache-padded"))]
    sequence: AtomicU32,
    time: T,
}

impl TimeRandomGenerator<SystemClock> {
    /// The process-wide instance, created on first use with [`SystemClock`]
    /// and [`ThreadRandom`].
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<TimeRandomGenerator> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let generator = Self::new(SystemClock, &ThreadRandom);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                generator_id = generator.generator_id,
                "initialized global time-random generator"
            );
            generator
        })
    }
}

impl<T: UnixTimeSource> TimeRandomGenerator<T> {
    /// Creates an allocator with a random generator id and sequence start.
    ///
    /// The generator id is two 32-bit draws combined and masked to 40 bits; a
    /// third draw seeds the sequence.
    pub fn new<R: RandSource<u32>>(time: T, rng: &R) -> Self {
        let hi = u64::from(rng.rand());
        let lo = u64::from(rng.rand());
        let sequence = rng.rand();
        Self::from_components((hi << 32) | lo, sequence, time)
    }

    /// Creates an allocator from explicit state. `generator_id` is masked to
    /// 40 bits. The first id carries `sequence + 1`.
    #[must_use]
    pub fn from_components(generator_id: u64, sequence: u32, time: T) -> Self {
        let sequence = AtomicU32::new(sequence);
        Self {
            generator_id: generator_id & MAX_EZID_GENERATOR_ID,
            #[cfg(feature = "cache-padded")]
            sequence: crossbeam_utils::CachePadded::new(sequence),
            #[cfg(not(feature = "cache-padded"))]
            sequence,
            time,
        }
    }

    #[must_use]
    pub const fn generator_id(&self) -> u64 {
        self.generator_id
    }

    /// Allocates the next raw 12-byte id.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_raw(&self) -> [u8; 12] {
        let timestamp = self.time.unix_seconds();
        let sequence = self
            .sequence
            .fetch_add(1, Ordering::Relaxed)
            .wrapping_add(1)
            & MAX_EZID_SEQUENCE;
        pack_ezid(timestamp, self.generator_id, sequence)
    }

    /// Allocates and formats the next id.
    pub fn next_id<F: IdFormat>(&self) -> EzId<F> {
        EzId::from_bytes(self.next_raw())
    }
}
