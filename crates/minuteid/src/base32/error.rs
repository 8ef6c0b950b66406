/// Errors produced while decoding Crockford Base32 text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base32Error {
    /// The input is not exactly [`ENCODED_LEN`] characters long.
    ///
    /// [`ENCODED_LEN`]: crate::ENCODED_LEN
    #[error("invalid length: expected 8 characters, got {len}")]
    InvalidLength {
        /// Number of characters in the rejected input.
        len: usize,
    },

    /// The input contains a character outside the Crockford alphabet and its
    /// `I`/`L`/`O` aliases.
    #[error("invalid character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character position within the input.
        index: usize,
    },
}
