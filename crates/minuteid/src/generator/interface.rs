use crate::{MinuteStamp, Result};
use std::sync::Arc;

/// A supplier of 14-bit discriminators, the field that separates identifiers
/// created within the same minute.
///
/// Two strategies ship with the crate:
///
/// - [`MonotonicCounter`]: gap-free, strictly increasing values per minute,
///   unique within one shared counter
/// - [`RandomSource`]: uniform 14-bit draws from an [`EntropySource`],
///   probabilistically unique with no coordination
///
/// [`AnySource`] selects between them at runtime.
///
/// [`MonotonicCounter`]: crate::MonotonicCounter
/// [`RandomSource`]: crate::RandomSource
/// [`EntropySource`]: crate::EntropySource
/// [`AnySource`]: crate::AnySource
pub trait DiscriminatorSource {
    /// Returns the discriminator for an identifier stamped with `stamp`.
    ///
    /// The value is always at most [`MAX_DISCRIMINATOR`].
    ///
    /// # Errors
    ///
    /// Strategy specific; see the implementing type.
    ///
    /// [`MAX_DISCRIMINATOR`]: crate::MAX_DISCRIMINATOR
    fn next_discriminator(&self, stamp: MinuteStamp) -> Result<u16>;
}

impl<S: DiscriminatorSource + ?Sized> DiscriminatorSource for &S {
    fn next_discriminator(&self, stamp: MinuteStamp) -> Result<u16> {
        (**self).next_discriminator(stamp)
    }
}

impl<S: DiscriminatorSource + ?Sized> DiscriminatorSource for Arc<S> {
    fn next_discriminator(&self, stamp: MinuteStamp) -> Result<u16> {
        (**self).next_discriminator(stamp)
    }
}
