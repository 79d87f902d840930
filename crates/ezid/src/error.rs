use crate::{BitWidth, ParseError};

/// A result type defaulting to the crate-wide [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Why a separator layout was rejected.
///
/// Built in `const` context by [`FormatConfig::new`], so every field is a
/// plain integer.
///
/// [`FormatConfig::new`]: crate::FormatConfig::new
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum SeparatorConfigError {
    /// Separator positions were listed but the separator is `None`.
    #[error("{count} separator position(s) given without a separator character")]
    PositionsWithoutSeparator {
        /// Number of positions supplied.
        count: usize,
    },
    /// A position lies past the last encoded symbol.
    #[error("separator position {position} is out of range for a {width}-bit id (max {max})")]
    PositionOutOfRange {
        /// The offending position.
        position: u8,
        /// Bit width of the id being formatted.
        width: u8,
        /// Largest accepted position.
        max: u8,
    },
}

/// Errors raised while building generators or formats.
///
/// These are caller mistakes and are reported when the value is constructed,
/// never later while generating ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The snowflake generator id does not fit in 10 bits.
    #[error("generator id {id} is out of range (expected 0..={max})")]
    InvalidGeneratorId {
        /// Requested generator id.
        id: i64,
        /// Largest accepted generator id.
        max: u64,
    },
    /// The separator layout is invalid.
    #[error("invalid separator configuration: {0}")]
    InvalidSeparatorConfig(#[from] SeparatorConfigError),
    /// A value of one width was handed to a format of another.
    #[error("format expects {expected:?} ids but was given {actual:?}")]
    WidthMismatch {
        /// Width declared by the format.
        expected: BitWidth,
        /// Width of the value supplied.
        actual: BitWidth,
    },
}

/// Errors raised by a running generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum GeneratorError {
    /// The clock reported a tick earlier than one already issued.
    #[error("clock moved backwards: now {now} ms, last issued {last} ms")]
    ClockRegression {
        /// Tick reported by the clock.
        now: u64,
        /// Last tick embedded in an id.
        last: u64,
    },
    /// Another thread panicked while holding the generator lock.
    ///
    /// `parking_lot` mutexes do not poison, so this variant is absent with the
    /// `parking-lot` feature.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
impl<T> From<std::sync::PoisonError<std::sync::MutexGuard<'_, T>>> for GeneratorError {
    fn from(_: std::sync::PoisonError<std::sync::MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

/// Every error `ezid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// See [`GeneratorError`].
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<SeparatorConfigError> for Error {
    fn from(err: SeparatorConfigError) -> Self {
        Self::Config(err.into())
    }
}
