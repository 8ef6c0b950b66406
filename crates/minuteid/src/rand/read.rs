use crate::{EntropySource, generator::Mutex};
use std::io::{self, Read};

/// An [`EntropySource`] adapting any [`Read`] implementation, e.g. a file
/// handle on `/dev/urandom` or a fixed buffer in tests.
///
/// Reads are serialized behind a mutex and use [`Read::read_exact`], so a
/// stream that runs dry yields [`io::ErrorKind::UnexpectedEof`].
///
/// # Example
/// ```
/// use minuteid::{EntropySource, ReadEntropy};
///
/// let source = ReadEntropy::new(&[0x12_u8, 0x34][..]);
/// let mut buf = [0; 2];
/// source.fill_bytes(&mut buf).unwrap();
/// assert_eq!(buf, [0x12, 0x34]);
/// assert!(source.fill_bytes(&mut buf).is_err());
/// ```
#[derive(Debug)]
pub struct ReadEntropy<R> {
    reader: Mutex<R>,
}

impl<R: Read> ReadEntropy<R> {
    /// Wraps `reader` as an entropy source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }

    /// Returns the wrapped reader.
    ///
    /// # Errors
    ///
    /// Fails only if the lock was poisoned (not with `parking-lot`).
    pub fn into_inner(self) -> io::Result<R> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.reader.into_inner())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            self.reader.into_inner().map_err(|_| poisoned())
        }
    }
}

impl<R: Read> EntropySource for ReadEntropy<R> {
    fn fill_bytes(&self, dest: &mut [u8]) -> io::Result<()> {
        #[cfg(feature = "parking-lot")]
        let mut reader = self.reader.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut reader = self.reader.lock().map_err(|_| poisoned())?;

        reader.read_exact(dest)
    }
}

#[cfg(not(feature = "parking-lot"))]
fn poisoned() -> io::Error {
    io::Error::other("entropy reader lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_stream_is_unexpected_eof() {
        let source = ReadEntropy::new(&[0x01_u8][..]);
        let mut buf = [0; 2];
        let err = source.fill_bytes(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn consumes_stream_in_order() {
        let source = ReadEntropy::new(&[1_u8, 2, 3, 4][..]);
        let mut buf = [0; 2];
        source.fill_bytes(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        source.fill_bytes(&mut buf).unwrap();
        assert_eq!(buf, [3, 4]);
        assert!(source.into_inner().unwrap().is_empty());
    }

    #[test]
    fn thread_and_os_sources_fill_buffers() {
        use crate::{OsRandom, ThreadRandom};

        let mut buf = [0_u8; 64];
        ThreadRandom.fill_bytes(&mut buf).unwrap();
        // 64 zero bytes from a CSPRNG would be a 2^-512 event.
        assert!(buf.iter().any(|&b| b != 0));

        let mut buf = [0_u8; 64];
        OsRandom.fill_bytes(&mut buf).unwrap();
        assert!(buf.iter().any(|&b| b != 0));
    }
}
