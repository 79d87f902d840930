use core::marker::PhantomData;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{IdGenStatus, SnowflakeGenerator};
use crate::{
    CompactEzId, ConfigError, DashedCompact, GeneratorError, IdFormat, MonotonicClock, TimeSource,
};

/// A [`SnowflakeGenerator`] that hands out formatted [`CompactEzId`] values.
///
/// ```
/// use ezid::{CompactEzId, CompactEzIdGenerator, PlainCompact};
///
/// let generator = CompactEzIdGenerator::<PlainCompact>::with_generator_id(12).unwrap();
/// let id: CompactEzId<PlainCompact> = generator.next_id().unwrap();
/// assert_eq!(id.as_str().len(), 13);
/// assert_eq!(id.generator_id(), 12);
/// ```
#[derive(Debug)]
pub struct CompactEzIdGenerator<F: IdFormat = DashedCompact, T: TimeSource = MonotonicClock> {
    inner: SnowflakeGenerator<T>,
    _format: PhantomData<fn() -> F>,
}

impl<F: IdFormat> CompactEzIdGenerator<F, MonotonicClock> {
    /// See [`SnowflakeGenerator::with_generator_id`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGeneratorId`] unless
    /// `0 <= generator_id <= 1023`.
    pub fn with_generator_id(generator_id: i64) -> Result<Self, ConfigError> {
        SnowflakeGenerator::with_generator_id(generator_id).map(Self::from_generator)
    }
}

impl<F: IdFormat, T: TimeSource> CompactEzIdGenerator<F, T> {
    /// See [`SnowflakeGenerator::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGeneratorId`] unless
    /// `0 <= generator_id <= 1023`.
    pub fn new(generator_id: i64, time: T) -> Result<Self, ConfigError> {
        SnowflakeGenerator::new(generator_id, time).map(Self::from_generator)
    }

    /// Wraps an existing generator.
    #[must_use]
    pub const fn from_generator(inner: SnowflakeGenerator<T>) -> Self {
        Self {
            inner,
            _format: PhantomData,
        }
    }

    /// The wrapped generator.
    #[must_use]
    pub const fn inner(&self) -> &SnowflakeGenerator<T> {
        &self.inner
    }

    #[must_use]
    pub const fn generator_id(&self) -> u64 {
        self.inner.generator_id()
    }

    /// Allocates and formats the next id.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::next_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<CompactEzId<F>, GeneratorError> {
        self.inner.next_id().map(CompactEzId::from_u64)
    }

    /// Non-blocking variant of [`CompactEzIdGenerator::next_id`].
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::poll_id`].
    pub fn poll_id(&self) -> Result<IdGenStatus<CompactEzId<F>>, GeneratorError> {
        self.inner
            .poll_id()
            .map(|status| status.map(CompactEzId::from_u64))
    }
}
