use crate::EntropySource;
use rand::{TryRngCore, rngs::OsRng};
use std::io;

/// An [`EntropySource`] reading straight from the operating system's CSPRNG.
///
/// Slower than [`ThreadRandom`] since every draw is a syscall, but surfaces
/// OS-level failures instead of relying on a seeded user-space generator.
///
/// [`ThreadRandom`]: crate::ThreadRandom
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl EntropySource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> io::Result<()> {
        OsRng.try_fill_bytes(dest).map_err(io::Error::other)
    }
}
