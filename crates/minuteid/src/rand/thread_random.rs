use crate::EntropySource;
use rand::{RngCore, rng};
use std::io;

/// An [`EntropySource`] backed by the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically. It never fails.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does not store the RNG itself; it accesses the
/// thread-local generator on each call and may be shared freely.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl EntropySource for ThreadRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> io::Result<()> {
        rng().fill_bytes(dest);
        Ok(())
    }
}
