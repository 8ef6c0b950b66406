use crate::{Base32Error, id::VALUE_MASK};

/// Length of the text form of an [`Identifier`].
///
/// [`Identifier`]: crate::Identifier
pub const ENCODED_LEN: usize = 8;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 5;
const CHAR_MASK: u64 = 0x1F;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 128] = {
    let mut lut = [NO_VALUE; 128];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes the low 40 bits of `value` as eight Crockford Base32 characters,
/// most significant group first.
///
/// Bits above bit 39 are ignored. The output is always canonical uppercase
/// ASCII, so its lexicographic order matches the numeric order of the input.
///
/// # Example
///
/// ```
/// use minuteid::encode_base32;
///
/// assert_eq!(&encode_base32(0), b"00000000");
/// assert_eq!(&encode_base32((1 << 40) - 1), b"ZZZZZZZZ");
/// ```
#[must_use]
pub const fn encode_base32(value: u64) -> [u8; ENCODED_LEN] {
    let mut buf = [0_u8; ENCODED_LEN];
    let mut acc = value & VALUE_MASK;
    let mut i = ENCODED_LEN;
    while i > 0 {
        i -= 1;
        buf[i] = ALPHABET[(acc & CHAR_MASK) as usize];
        acc >>= BITS_PER_CHAR;
    }
    buf
}

/// Decodes eight Crockford Base32 characters into a 40-bit value.
///
/// Decoding is case-insensitive and folds `I`, `i`, `L`, `l` to `1` and
/// `O`, `o` to `0`.
///
/// # Errors
///
/// - [`Base32Error::InvalidLength`] if `encoded` is not exactly
///   [`ENCODED_LEN`] characters long
/// - [`Base32Error::InvalidCharacter`] naming the first character outside the
///   accepted set
pub fn decode_base32(encoded: &str) -> Result<u64, Base32Error> {
    let len = encoded.chars().count();
    if len != ENCODED_LEN {
        return Err(Base32Error::InvalidLength { len });
    }

    let mut acc = 0_u64;
    for (index, character) in encoded.chars().enumerate() {
        let val = if character.is_ascii() {
            LOOKUP[character as usize]
        } else {
            NO_VALUE
        };
        if val == NO_VALUE {
            return Err(Base32Error::InvalidCharacter { character, index });
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(val);
    }

    Ok(acc)
}
