use crate::{
    Components, DiscriminatorSource, ENCODED_LEN, Error, MAX_DISCRIMINATOR, MinuteStamp,
    RandomSource, Result, SystemClock, TOTAL_BITS, ThreadRandom, TimeSource, VALUE_MASK, compose,
    decode_base32, encode_base32, pack, split, unpack,
};
use core::{fmt, str::FromStr};
use std::time::SystemTime;

/// A compact, chronologically sortable 40-bit identifier.
///
/// The packed value holds, from most to least significant bit, 15 bits of
/// days since 2020-01-01 UTC, 11 bits of minute of the UTC day and a 14-bit
/// discriminator. Numeric order is therefore chronological order at minute
/// resolution, with ties broken by the discriminator.
///
/// The text form is eight Crockford Base32 characters whose lexicographic
/// order matches the numeric order.
///
/// # Example
/// ```
/// use minuteid::Identifier;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// // 2024-08-18T15:30:00Z
/// let t = UNIX_EPOCH + Duration::from_secs(1_723_995_000);
/// let id = Identifier::from_components(t, 1234).unwrap();
///
/// assert_eq!(id.to_string(), "1MVEH16J");
/// assert_eq!(id.days(), 1691);
/// assert_eq!(id.minute_of_day(), 930);
/// assert_eq!(id.discriminator(), 1234);
/// assert_eq!("1mveh16j".parse::<Identifier>().unwrap(), id);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Identifier {
    id: u64,
}

impl Identifier {
    /// The smallest identifier, `00000000`.
    pub const MIN: Self = Self { id: 0 };
    /// The largest identifier, `ZZZZZZZZ`.
    pub const MAX: Self = Self { id: VALUE_MASK };

    /// Generates an identifier for the current time using the thread-local
    /// CSPRNG for the discriminator.
    ///
    /// Stateless: two calls within the same minute are distinct only with
    /// high probability. Use a [`Generator`] over a [`MonotonicCounter`] when
    /// gap-free, strictly increasing identifiers are needed.
    ///
    /// # Errors
    ///
    /// Fails if the system clock is outside the representable range.
    ///
    /// [`Generator`]: crate::Generator
    /// [`MonotonicCounter`]: crate::MonotonicCounter
    pub fn try_now() -> Result<Self> {
        Self::generate_at(SystemClock.now(), &RandomSource::new(ThreadRandom))
    }

    /// Like [`Self::try_now`], panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is before 2020-01-01 or beyond the 15-bit
    /// day range.
    #[must_use]
    #[track_caller]
    pub fn now() -> Self {
        match Self::try_now() {
            Ok(id) => id,
            Err(e) => panic!("identifier generation failed: {e}"),
        }
    }

    /// Generates an identifier for `t`, drawing the discriminator from
    /// `source`.
    ///
    /// The time is split (and validated) before the source is consulted.
    ///
    /// # Errors
    ///
    /// - [`Error::PastEpoch`] / [`Error::FutureRange`] for an unrepresentable
    ///   `t`
    /// - any error of the discriminator source
    pub fn generate_at<S>(t: SystemTime, source: &S) -> Result<Self>
    where
        S: DiscriminatorSource + ?Sized,
    {
        let stamp = split(t)?;
        let discriminator = source.next_discriminator(stamp)?;
        Self::from_stamp(stamp, discriminator)
    }

    /// Builds an identifier from an explicit time and discriminator, for
    /// deterministic generation or cross-process coordination.
    ///
    /// # Errors
    ///
    /// - [`Error::DiscriminatorOverflow`] if `discriminator > 16383`
    /// - [`Error::PastEpoch`] / [`Error::FutureRange`] for an unrepresentable
    ///   `t`
    pub fn from_components(t: SystemTime, discriminator: u16) -> Result<Self> {
        if discriminator > MAX_DISCRIMINATOR {
            return Err(Error::DiscriminatorOverflow {
                value: u32::from(discriminator),
            });
        }
        Self::from_stamp(split(t)?, discriminator)
    }

    /// Builds an identifier from an already split minute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DiscriminatorOverflow`] if `discriminator > 16383`.
    pub fn from_stamp(stamp: MinuteStamp, discriminator: u16) -> Result<Self> {
        pack(stamp.days, stamp.minute_of_day, discriminator).map(Self::from_raw_unchecked)
    }

    /// Decodes the 8-character Crockford Base32 form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Base32`] if the text has the wrong length or contains
    /// a character outside the alphabet.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(Self::from_raw_unchecked(decode_base32(s)?))
    }

    /// Converts the signed integer form back into an identifier.
    ///
    /// # Errors
    ///
    /// - [`Error::NegativeValue`] if `value < 0`
    /// - [`Error::RangeOverflow`] if any bit above bit 39 is set
    pub fn from_integer(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(Error::NegativeValue { value });
        }
        if value >> TOTAL_BITS != 0 {
            return Err(Error::RangeOverflow { value });
        }
        #[allow(clippy::cast_sign_loss)]
        let raw = value as u64;
        Ok(Self::from_raw_unchecked(raw))
    }

    const fn from_raw_unchecked(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the packed value as a non-negative `i64`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_integer(&self) -> i64 {
        // Never wraps: at most 40 bits are set.
        self.id as i64
    }

    /// Returns the packed value.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Returns the text form as ASCII bytes without allocating.
    #[must_use]
    pub const fn encode(&self) -> [u8; ENCODED_LEN] {
        encode_base32(self.id)
    }

    /// Returns the 8-character Crockford Base32 text form.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.encode().iter().copied().map(char::from).collect()
    }

    /// Returns the start of the identifier's minute.
    ///
    /// Seconds and sub-seconds of the original time are not stored, so the
    /// result always falls on a whole minute.
    #[must_use]
    pub fn to_system_time(&self) -> SystemTime {
        let c = self.components();
        compose(c.days, c.minute_of_day)
    }

    /// Returns all three packed fields.
    #[must_use]
    pub const fn components(&self) -> Components {
        unpack(self.id)
    }

    /// Whole days since 2020-01-01 UTC.
    #[must_use]
    pub const fn days(&self) -> u16 {
        self.components().days
    }

    /// Minute of the UTC day.
    #[must_use]
    pub const fn minute_of_day(&self) -> u16 {
        self.components().minute_of_day
    }

    /// The discriminator field.
    #[must_use]
    pub const fn discriminator(&self) -> u16 {
        self.components().discriminator
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.encode();
        // Crockford Base32 output is always ASCII.
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.pad(s)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.components();
        f.debug_struct("Identifier")
            .field("id", &format_args!("{} (0x{:x})", self.id, self.id))
            .field("text", &format_args!("{self}"))
            .field("days", &c.days)
            .field("minute_of_day", &c.minute_of_day)
            .field("discriminator", &c.discriminator)
            .finish()
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<i64> for Identifier {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::from_integer(value)
    }
}

impl From<Identifier> for i64 {
    fn from(id: Identifier) -> Self {
        id.to_integer()
    }
}

impl From<Identifier> for u64 {
    fn from(id: Identifier) -> Self {
        id.to_raw()
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        Self::parse(other).is_ok_and(|id| id == *self)
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
