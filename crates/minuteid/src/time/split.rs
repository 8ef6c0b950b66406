use crate::{DAYS_MASK, Error, Result};
use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier epoch: Wednesday, January 1, 2020 00:00:00 UTC, as a duration
/// since the Unix epoch.
pub const EPOCH: Duration = Duration::from_secs(1_577_836_800);

/// Largest representable day count (15 bits).
pub const MAX_DAYS: u16 = DAYS_MASK as u16;

/// Number of minutes in a UTC day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_DAY: u64 = 24 * 60 * SECS_PER_MINUTE;

/// A point in time truncated to the minute and expressed relative to
/// [`EPOCH`].
///
/// Ordering follows time: days first, then minute of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteStamp {
    /// Whole days since [`EPOCH`], at most [`MAX_DAYS`].
    pub days: u16,
    /// Minute within the UTC day, below [`MINUTES_PER_DAY`].
    pub minute_of_day: u16,
}

impl MinuteStamp {
    /// Returns the wall-clock instant at the start of this minute.
    #[must_use]
    pub fn to_system_time(self) -> SystemTime {
        compose(self.days, self.minute_of_day)
    }
}

/// Converts a wall-clock time into days since [`EPOCH`] and minute of the UTC
/// day. Seconds and anything finer are truncated.
///
/// # Errors
///
/// - [`Error::PastEpoch`] if `t` precedes [`EPOCH`]
/// - [`Error::FutureRange`] if `t` is 32768 or more days past [`EPOCH`]
///
/// # Example
///
/// ```
/// use minuteid::{MinuteStamp, split};
/// use std::time::{Duration, UNIX_EPOCH};
///
/// // 2024-08-18T15:30:42Z
/// let t = UNIX_EPOCH + Duration::from_secs(1_723_995_042);
/// assert_eq!(
///     split(t).unwrap(),
///     MinuteStamp { days: 1691, minute_of_day: 930 }
/// );
/// ```
pub fn split(t: SystemTime) -> Result<MinuteStamp> {
    let since_unix = t.duration_since(UNIX_EPOCH).map_err(|_| Error::PastEpoch)?;
    let elapsed = since_unix.checked_sub(EPOCH).ok_or(Error::PastEpoch)?;

    let secs = elapsed.as_secs();
    let days = secs / SECS_PER_DAY;
    if days > u64::from(MAX_DAYS) {
        return Err(Error::FutureRange { days });
    }
    // EPOCH is midnight UTC, so the remainder is the UTC time of day.
    let minute_of_day = (secs % SECS_PER_DAY) / SECS_PER_MINUTE;

    #[allow(clippy::cast_possible_truncation)]
    let stamp = MinuteStamp {
        days: days as u16,
        minute_of_day: minute_of_day as u16,
    };
    Ok(stamp)
}

/// Maps a day count and minute of day back to a wall-clock instant.
///
/// The result always has zero seconds. Out-of-range minutes (possible only
/// for hand-crafted values) simply carry into the following day.
#[must_use]
pub fn compose(days: u16, minute_of_day: u16) -> SystemTime {
    let secs = u64::from(days) * SECS_PER_DAY + u64::from(minute_of_day) * SECS_PER_MINUTE;
    UNIX_EPOCH + EPOCH + Duration::from_secs(secs)
}
