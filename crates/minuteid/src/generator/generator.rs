use crate::{
    AnySource, DiscriminatorSource, Identifier, MonotonicCounter, RandomSource, Result, Strategy,
    SystemClock, TimeSource,
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Produces identifiers from a clock and a discriminator source.
///
/// The generator itself holds no mutable state; any shared state lives in
/// the source (e.g., a [`MonotonicCounter`]). It is `Send + Sync` whenever
/// its parts are, so one instance can serve many threads.
///
/// # Example
/// ```
/// use minuteid::{Generator, MonotonicCounter, SystemClock};
///
/// let generator = Generator::new(SystemClock, MonotonicCounter::new());
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert!(a < b);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Generator<S, T = SystemClock> {
    source: S,
    clock: T,
}

impl<S, T> Generator<S, T>
where
    S: DiscriminatorSource,
    T: TimeSource,
{
    /// Creates a generator reading time from `clock` and discriminators from
    /// `source`.
    pub const fn new(clock: T, source: S) -> Self {
        Self { source, clock }
    }

    /// Generates an identifier for the clock's current minute.
    ///
    /// The time is validated before a discriminator is drawn, so an
    /// out-of-range clock never consumes a counter value.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::PastEpoch`] and [`Error::FutureRange`] from the
    /// time split, and any error from the discriminator source.
    ///
    /// [`Error::PastEpoch`]: crate::Error::PastEpoch
    /// [`Error::FutureRange`]: crate::Error::FutureRange
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<Identifier> {
        Identifier::generate_at(self.clock.now(), &self.source)
    }

    /// Generates an identifier, panicking on failure.
    ///
    /// A thin convenience over [`Self::generate`] for callers that treat any
    /// generation failure as fatal.
    ///
    /// # Panics
    ///
    /// Panics with the error message if [`Self::generate`] fails.
    #[track_caller]
    pub fn must_generate(&self) -> Identifier {
        match self.generate() {
            Ok(id) => id,
            Err(e) => panic!("identifier generation failed: {e}"),
        }
    }

    /// Returns the discriminator source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the clock.
    pub const fn clock(&self) -> &T {
        &self.clock
    }
}

impl Generator<AnySource> {
    /// Creates a system-clock generator for a runtime-selected strategy.
    ///
    /// # Example
    /// ```
    /// use minuteid::{Generator, Strategy};
    ///
    /// let strategy: Strategy = "counter".parse().unwrap();
    /// let generator = Generator::from_strategy(strategy);
    /// assert_eq!(generator.source().strategy(), Strategy::Counter);
    /// ```
    #[must_use]
    pub fn from_strategy(strategy: Strategy) -> Self {
        Self::new(SystemClock, strategy.build())
    }
}

impl Generator<&'static MonotonicCounter> {
    /// Creates a system-clock generator backed by the process-wide
    /// [`MonotonicCounter::global`].
    #[must_use]
    pub fn global_counter() -> Self {
        Self::new(SystemClock, MonotonicCounter::global())
    }
}

impl Generator<RandomSource> {
    /// Creates a system-clock generator drawing discriminators from the
    /// thread-local CSPRNG.
    #[must_use]
    pub fn random() -> Self {
        Self::new(SystemClock, RandomSource::default())
    }
}
