use crate::Base32Error;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `minuteid` can produce.
///
/// Every failure is returned to the immediate caller. Nothing in the crate
/// retries, wraps around, or swallows an error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The supplied time precedes the 2020-01-01T00:00:00Z epoch.
    #[error("time is before the 2020-01-01T00:00:00Z epoch")]
    PastEpoch,

    /// The supplied time lies beyond the 15-bit day range.
    #[error("time is {days} days past the epoch, beyond the supported range")]
    FutureRange {
        /// Whole days elapsed since the epoch.
        days: u64,
    },

    /// A discriminator does not fit in 14 bits.
    ///
    /// Returned both for caller-supplied values above `16383` and when a
    /// [`MonotonicCounter`] has handed out all 16384 values of the current
    /// minute.
    ///
    /// [`MonotonicCounter`]: crate::MonotonicCounter
    #[error("discriminator {value} exceeds the 14-bit maximum of 16383")]
    DiscriminatorOverflow {
        /// The offending (or next, for an exhausted counter) value.
        value: u32,
    },

    /// Crockford Base32 text could not be decoded.
    #[error(transparent)]
    Base32(#[from] Base32Error),

    /// Integer conversion received a negative value.
    #[error("identifier value {value} is negative")]
    NegativeValue {
        /// The rejected integer.
        value: i64,
    },

    /// Integer conversion received a value with a bit set above bit 39.
    #[error("identifier value {value:#x} exceeds 40 bits")]
    RangeOverflow {
        /// The rejected integer.
        value: i64,
    },

    /// The entropy source failed or came up short.
    #[error("entropy source failed: {0}")]
    Entropy(#[source] std::io::Error),

    /// The counter lock was poisoned by a panicking thread.
    ///
    /// Not available with the `parking-lot` feature, whose mutexes do not
    /// poison.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("counter lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
