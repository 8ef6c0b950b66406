use std::io;

/// A trait for blocking byte suppliers used to draw random discriminators.
///
/// Implementations must either fill `dest` completely or fail; a short read is
/// an error. There is no internal timeout, so callers that need deadlines
/// should wrap their source.
///
/// # Example
/// ```
/// use minuteid::EntropySource;
///
/// struct FixedBytes;
/// impl EntropySource for FixedBytes {
///     fn fill_bytes(&self, dest: &mut [u8]) -> std::io::Result<()> {
///         dest.fill(0xAB);
///         Ok(())
///     }
/// }
///
/// let mut buf = [0; 2];
/// FixedBytes.fill_bytes(&mut buf).unwrap();
/// assert_eq!(buf, [0xAB, 0xAB]);
/// ```
pub trait EntropySource {
    /// Fills `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the source fails or cannot
    /// supply enough bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> io::Result<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for &E {
    fn fill_bytes(&self, dest: &mut [u8]) -> io::Result<()> {
        (**self).fill_bytes(dest)
    }
}
