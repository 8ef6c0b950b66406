use crate::{
    DiscriminatorSource, Error, MAX_DISCRIMINATOR, MinuteStamp, Result,
    generator::{Mutex, MutexGuard},
    split,
};
use std::{sync::OnceLock, time::SystemTime};
#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CounterState {
    minute: MinuteStamp,
    last: u16,
}

/// A per-minute monotonic discriminator counter guarded by a mutex.
///
/// The first call in a new minute returns `0`; each later call in the same
/// minute returns the previous value plus one. After `16383` has been handed
/// out, further calls in that minute fail with
/// [`Error::DiscriminatorOverflow`] until the minute changes. Values never
/// wrap around.
///
/// Uniqueness holds only among callers sharing the same counter instance.
/// Independent counters (other instances, other processes, a restarted
/// process) may issue the same values for the same minute.
///
/// A single lock serializes each call end to end: check the minute, reset or
/// increment, return.
///
/// ## See Also
/// - [`RandomSource`]
///
/// [`RandomSource`]: crate::RandomSource
#[derive(Debug, Default)]
pub struct MonotonicCounter {
    state: Mutex<Option<CounterState>>,
}

impl MonotonicCounter {
    /// Creates an independent counter with no minute observed yet.
    ///
    /// # Example
    /// ```
    /// use minuteid::MonotonicCounter;
    /// use std::time::{Duration, UNIX_EPOCH};
    ///
    /// let counter = MonotonicCounter::new();
    /// let t = UNIX_EPOCH + Duration::from_secs(1_723_995_000);
    /// assert_eq!(counter.next(t).unwrap(), 0);
    /// assert_eq!(counter.next(t).unwrap(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide counter, creating it on first use.
    ///
    /// Every caller in the process shares this instance, so identifiers built
    /// from it are unique within the process for a given minute. Use
    /// [`Self::new`] for an isolated counter (e.g., in tests).
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<MonotonicCounter> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Returns the next discriminator for the minute containing `now`.
    ///
    /// # Errors
    ///
    /// - [`Error::PastEpoch`] / [`Error::FutureRange`] if `now` cannot be
    ///   represented by an identifier
    /// - [`Error::DiscriminatorOverflow`] once 16384 values have been issued
    ///   for this minute
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (not with `parking-lot`)
    pub fn next(&self, now: SystemTime) -> Result<u16> {
        self.next_at(split(now)?)
    }

    /// Returns the next discriminator for an already split minute.
    ///
    /// Any minute different from the last observed one, earlier or later,
    /// restarts the sequence at `0`.
    ///
    /// # Errors
    ///
    /// See [`Self::next`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_at(&self, stamp: MinuteStamp) -> Result<u16> {
        let mut state = self.lock()?;
        if let Some(current) = state.as_mut().filter(|s| s.minute == stamp) {
            if current.last >= MAX_DISCRIMINATOR {
                #[cfg(feature = "tracing")]
                tracing::warn!(?stamp, "discriminator counter exhausted for minute");
                return Err(Error::DiscriminatorOverflow {
                    value: u32::from(current.last) + 1,
                });
            }
            current.last += 1;
            return Ok(current.last);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?stamp, "discriminator counter rolled over to new minute");
        *state = Some(CounterState {
            minute: stamp,
            last: 0,
        });
        Ok(0)
    }

    /// Returns the last observed minute and the value issued for it, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if the lock is poisoned (not with
    /// `parking-lot`).
    pub fn last_issued(&self) -> Result<Option<(MinuteStamp, u16)>> {
        Ok(self.lock()?.map(|s| (s.minute, s.last)))
    }

    /// Forgets the observed minute, so the next call starts again at `0`.
    ///
    /// Only safe when no identifiers for the current minute will be issued
    /// afterwards, e.g. between test cases.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if the lock is poisoned (not with
    /// `parking-lot`).
    pub fn reset(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock(&self) -> Result<MutexGuard<'_, Option<CounterState>>> {
        Ok(self.state.lock()?)
    }

    #[cfg(feature = "parking-lot")]
    #[allow(clippy::unnecessary_wraps)]
    fn lock(&self) -> Result<MutexGuard<'_, Option<CounterState>>> {
        Ok(self.state.lock())
    }
}

impl DiscriminatorSource for MonotonicCounter {
    fn next_discriminator(&self, stamp: MinuteStamp) -> Result<u16> {
        self.next_at(stamp)
    }
}
