use std::time::SystemTime;

/// A trait for wall-clock sources.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. Only minute resolution matters to identifiers, but
/// the full [`SystemTime`] is handed over so callers decide nothing about
/// truncation.
///
/// # Example
///
/// ```
/// use minuteid::TimeSource;
/// use std::time::{Duration, SystemTime, UNIX_EPOCH};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> SystemTime {
///         UNIX_EPOCH + Duration::from_secs(1_723_995_000)
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(
///     time.now().duration_since(UNIX_EPOCH).unwrap().as_secs(),
///     1_723_995_000
/// );
/// ```
pub trait TimeSource {
    /// Returns the current wall-clock time.
    fn now(&self) -> SystemTime;
}

/// The operating system's wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> SystemTime {
        #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
        {
            use web_time::web::SystemTimeExt;
            web_time::SystemTime::now().to_std()
        }
        #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
        {
            SystemTime::now()
        }
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}
