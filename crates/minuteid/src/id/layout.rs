use crate::{Error, Result};

/// Width of the day-count field.
pub const DAYS_BITS: u32 = 15;
/// Width of the minute-of-day field.
pub const MINUTE_BITS: u32 = 11;
/// Width of the discriminator field.
pub const DISCRIMINATOR_BITS: u32 = 14;
/// Total number of significant bits in an identifier.
pub const TOTAL_BITS: u32 = DAYS_BITS + MINUTE_BITS + DISCRIMINATOR_BITS;

pub const DISCRIMINATOR_SHIFT: u32 = 0;
pub const MINUTE_SHIFT: u32 = DISCRIMINATOR_SHIFT + DISCRIMINATOR_BITS;
pub const DAYS_SHIFT: u32 = MINUTE_SHIFT + MINUTE_BITS;

pub const DAYS_MASK: u64 = (1 << DAYS_BITS) - 1;
pub const MINUTE_MASK: u64 = (1 << MINUTE_BITS) - 1;
pub const DISCRIMINATOR_MASK: u64 = (1 << DISCRIMINATOR_BITS) - 1;
/// Mask covering all 40 significant bits.
pub const VALUE_MASK: u64 = (1 << TOTAL_BITS) - 1;

/// Largest discriminator that fits the 14-bit field.
pub const MAX_DISCRIMINATOR: u16 = DISCRIMINATOR_MASK as u16;

const _: () = {
    // The packed value must leave the top 24 bits of a u64 clear, so the
    // integer form always fits a non-negative i64.
    assert!(TOTAL_BITS == 40, "layout must be exactly 40 bits");
};

/// The three logical fields of an identifier.
///
/// ```text
///  Bit Index:  39         25 24            14 13                0
///              +------------+----------------+------------------+
///  Field:      | days (15)  | minute (11)    | discriminator(14)|
///              +------------+----------------+------------------+
///              |<-- MSB ---------- 40 bits ------------ LSB -->|
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Components {
    /// Whole days since 2020-01-01 UTC.
    pub days: u16,
    /// Minute within the UTC day.
    pub minute_of_day: u16,
    /// Counter value or random draw separating IDs of the same minute.
    pub discriminator: u16,
}

/// Packs the three fields into the low 40 bits of a `u64`.
///
/// `days` and `minute_of_day` are expected to come from [`split`], which
/// already enforces their ranges.
///
/// # Errors
///
/// Returns [`Error::DiscriminatorOverflow`] if `discriminator` exceeds
/// [`MAX_DISCRIMINATOR`].
///
/// [`split`]: crate::split
pub fn pack(days: u16, minute_of_day: u16, discriminator: u16) -> Result<u64> {
    if discriminator > MAX_DISCRIMINATOR {
        return Err(Error::DiscriminatorOverflow {
            value: u32::from(discriminator),
        });
    }
    debug_assert!(u64::from(days) <= DAYS_MASK);
    debug_assert!(u64::from(minute_of_day) <= MINUTE_MASK);

    let d = (u64::from(days) & DAYS_MASK) << DAYS_SHIFT;
    let m = (u64::from(minute_of_day) & MINUTE_MASK) << MINUTE_SHIFT;
    let r = u64::from(discriminator) << DISCRIMINATOR_SHIFT;
    Ok(d | m | r)
}

/// Splits a packed value back into its fields.
///
/// Total over every input: bits above bit 39 are ignored and no range check
/// is performed on the extracted fields.
#[must_use]
pub const fn unpack(value: u64) -> Components {
    Components {
        days: ((value >> DAYS_SHIFT) & DAYS_MASK) as u16,
        minute_of_day: ((value >> MINUTE_SHIFT) & MINUTE_MASK) as u16,
        discriminator: ((value >> DISCRIMINATOR_SHIFT) & DISCRIMINATOR_MASK) as u16,
    }
}
