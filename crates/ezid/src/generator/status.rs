/// The outcome of a non-blocking [`SnowflakeGenerator::poll_id`] call.
///
/// - [`IdGenStatus::Ready`] carries a freshly allocated id.
/// - [`IdGenStatus::Pending`] means all 4096 sequence values of the current
///   millisecond are spent; retry once `yield_for` more milliseconds have
///   passed.
///
/// [`SnowflakeGenerator::poll_id`]: crate::SnowflakeGenerator::poll_id
///
/// # Example
///
/// ```
/// use ezid::{IdGenStatus, SnowflakeGenerator, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let generator = SnowflakeGenerator::from_components(0, 1, 4095, FixedTime).unwrap();
/// match generator.poll_id().unwrap() {
///     IdGenStatus::Ready { id } => println!("ID: {id}"),
///     IdGenStatus::Pending { yield_for } => assert_eq!(yield_for, 1),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus<T> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: T,
    },
    /// The sequence is exhausted for the current tick.
    Pending {
        /// Milliseconds to wait before polling again.
        yield_for: u64,
    },
}

impl<T> IdGenStatus<T> {
    /// Maps a ready id, leaving `Pending` untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> IdGenStatus<U> {
        match self {
            Self::Ready { id } => IdGenStatus::Ready { id: f(id) },
            Self::Pending { yield_for } => IdGenStatus::Pending { yield_for },
        }
    }
}
