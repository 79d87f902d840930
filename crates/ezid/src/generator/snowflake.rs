use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{IdGenStatus, Mutex, MutexGuard};
use crate::{
    ConfigError, GeneratorError, MonotonicClock, TimeSource,
    layout::{MAX_GENERATOR_ID, MAX_SEQUENCE, MAX_TIMESTAMP, pack_compact},
};

#[derive(Debug)]
struct State {
    last_tick: u64,
    sequence: u64,
}

impl State {
    /// Advances to `now`, returning the sequence to embed or `None` when the
    /// tick is exhausted.
    fn advance(&mut self, now: u64) -> Result<Option<u64>, GeneratorError> {
        match now.cmp(&self.last_tick) {
            Ordering::Greater => {
                self.last_tick = now;
                self.sequence = 0;
            }
            Ordering::Equal if self.sequence < MAX_SEQUENCE => self.sequence += 1,
            Ordering::Equal => return Ok(None),
            Ordering::Less => return Err(cold_clock_behind(now, self.last_tick)),
        }
        Ok(Some(self.sequence))
    }
}

#[cold]
#[inline(never)]
fn cold_clock_behind(now: u64, last: u64) -> GeneratorError {
    #[cfg(feature = "tracing")]
    tracing::warn!(now, last, "clock moved backwards; refusing to issue id");
    GeneratorError::ClockRegression { now, last }
}

/// A lock-based 64-bit snowflake generator.
///
/// Every call takes the instance mutex, reads the clock and updates the
/// sequence while holding it, so ids from one instance are strictly
/// increasing integers and distinct across threads. Share it by reference or
/// behind an `Arc`.
///
/// ```
/// use ezid::SnowflakeGenerator;
///
/// let generator = SnowflakeGenerator::with_generator_id(3).unwrap();
/// let a = generator.next_id().unwrap();
/// let b = generator.next_id().unwrap();
/// assert!(b > a);
/// assert!(SnowflakeGenerator::with_generator_id(1024).is_err());
/// ```
#[derive(Debug)]
pub struct SnowflakeGenerator<T: TimeSource = MonotonicClock> {
    generator_id: u64,
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    time: T,
}

impl SnowflakeGenerator<MonotonicClock> {
    /// Creates a generator over a fresh [`MonotonicClock`] anchored at
    /// [`CUSTOM_EPOCH`](crate::CUSTOM_EPOCH).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGeneratorId`] unless
    /// `0 <= generator_id <= 1023`.
    pub fn with_generator_id(generator_id: i64) -> Result<Self, ConfigError> {
        Self::new(generator_id, MonotonicClock::default())
    }
}

impl<T: TimeSource> SnowflakeGenerator<T> {
    /// Creates a generator for `generator_id` reading ticks from `time`.
    ///
    /// The clock is not read here: state starts at tick 0, so the first id
    /// carries sequence 0 in whatever tick it is allocated. Use
    /// [`SnowflakeGenerator::from_components`] to resume from a known tick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGeneratorId`] unless
    /// `0 <= generator_id <= 1023`.
    pub fn new(generator_id: i64, time: T) -> Result<Self, ConfigError> {
        Self::from_components(generator_id, 0, 0, time)
    }

    /// Creates a generator from explicit state, e.g. to resume after the last
    /// issued tick and sequence. Both are masked to their field widths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGeneratorId`] unless
    /// `0 <= generator_id <= 1023`.
    pub fn from_components(
        generator_id: i64,
        last_tick: u64,
        sequence: u64,
        time: T,
    ) -> Result<Self, ConfigError> {
        let generator_id = u64::try_from(generator_id)
            .ok()
            .filter(|&id| id <= MAX_GENERATOR_ID)
            .ok_or(ConfigError::InvalidGeneratorId {
                id: generator_id,
                max: MAX_GENERATOR_ID,
            })?;

        let state = Mutex::new(State {
            last_tick: last_tick & MAX_TIMESTAMP,
            sequence: sequence & MAX_SEQUENCE,
        });
        Ok(Self {
            generator_id,
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(state),
            #[cfg(not(feature = "cache-padded"))]
            state,
            time,
        })
    }

    #[must_use]
    pub const fn generator_id(&self) -> u64 {
        self.generator_id
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, GeneratorError> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }

    /// Allocates the next id.
    ///
    /// When the 4096 sequence values of the current millisecond are spent,
    /// this spins while holding the lock until the clock moves on.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::ClockRegression`] if the clock reports a tick
    ///   earlier than one already issued
    /// - [`GeneratorError::LockPoisoned`] if another thread panicked while
    ///   holding the lock (std mutex only)
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<u64, GeneratorError> {
        let mut state = self.lock()?;
        loop {
            let now = self.time.current_millis() & MAX_TIMESTAMP;
            match state.advance(now)? {
                Some(sequence) => {
                    return Ok(pack_compact(state.last_tick, self.generator_id, sequence));
                }
                None => core::hint::spin_loop(),
            }
        }
    }

    /// Allocates the next id without waiting.
    ///
    /// Returns [`IdGenStatus::Pending`] instead of spinning when the current
    /// millisecond is exhausted.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::next_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Result<IdGenStatus<u64>, GeneratorError> {
        let mut state = self.lock()?;
        let now = self.time.current_millis() & MAX_TIMESTAMP;
        Ok(match state.advance(now)? {
            Some(sequence) => IdGenStatus::Ready {
                id: pack_compact(state.last_tick, self.generator_id, sequence),
            },
            None => IdGenStatus::Pending { yield_for: 1 },
        })
    }
}
