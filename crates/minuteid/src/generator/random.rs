use crate::{
    DiscriminatorSource, EntropySource, Error, MAX_DISCRIMINATOR, MinuteStamp, Result,
    ThreadRandom,
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A discriminator source drawing 14 uniformly random bits per identifier.
///
/// Each draw reads exactly two bytes from the entropy source, combines them
/// big-endian and keeps the low 14 bits. There is no retry and no collision
/// detection: `n` identifiers created in the same minute collide with
/// probability of roughly `n² / 32768`.
///
/// ## See Also
/// - [`MonotonicCounter`]
///
/// [`MonotonicCounter`]: crate::MonotonicCounter
#[derive(Clone, Debug, Default)]
pub struct RandomSource<E = ThreadRandom> {
    entropy: E,
}

impl<E: EntropySource> RandomSource<E> {
    /// Creates a random source over the given entropy supplier.
    ///
    /// # Example
    /// ```
    /// use minuteid::{RandomSource, ReadEntropy};
    ///
    /// let source = RandomSource::new(ReadEntropy::new(&[0xFF_u8, 0xFF][..]));
    /// assert_eq!(source.next().unwrap(), 0x3FFF);
    /// ```
    pub const fn new(entropy: E) -> Self {
        Self { entropy }
    }

    /// Draws a 14-bit discriminator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entropy`] wrapping the underlying failure if the
    /// source errors or cannot supply two bytes.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next(&self) -> Result<u16> {
        let mut buf = [0_u8; 2];
        self.entropy.fill_bytes(&mut buf).map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, "entropy source failed");
            Error::Entropy(e)
        })?;
        Ok(u16::from_be_bytes(buf) & MAX_DISCRIMINATOR)
    }

    /// Returns the underlying entropy supplier.
    pub const fn entropy(&self) -> &E {
        &self.entropy
    }
}

impl<E: EntropySource> DiscriminatorSource for RandomSource<E> {
    fn next_discriminator(&self, _stamp: MinuteStamp) -> Result<u16> {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReadEntropy;
    use std::io;

    struct FailingEntropy;
    impl EntropySource for FailingEntropy {
        fn fill_bytes(&self, _dest: &mut [u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn combines_two_bytes_big_endian_and_masks() {
        let source = RandomSource::new(ReadEntropy::new(&[0x12_u8, 0x34, 0xC0, 0x01][..]));
        assert_eq!(source.next().unwrap(), 0x1234);
        // Top two bits of the 16-bit draw are discarded.
        assert_eq!(source.next().unwrap(), 0x0001);
    }

    #[test]
    fn short_read_is_entropy_error() {
        let source = RandomSource::new(ReadEntropy::new(&[0x12_u8][..]));
        let err = source.next().unwrap_err();
        match err {
            Error::Entropy(cause) => assert_eq!(cause.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failing_source_is_wrapped() {
        let source = RandomSource::new(FailingEntropy);
        assert!(matches!(source.next(), Err(Error::Entropy(e)) if e.to_string() == "gone"));
    }

    #[test]
    fn thread_random_stays_in_range() {
        let source = RandomSource::<ThreadRandom>::default();
        let mut seen_high = false;
        for _ in 0..10_000 {
            let value = source.next().unwrap();
            assert!(value <= MAX_DISCRIMINATOR);
            seen_high |= value > MAX_DISCRIMINATOR / 2;
        }
        assert!(seen_high);
    }
}
