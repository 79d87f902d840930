/// Errors produced while decoding or parsing identifier text.
///
/// These are ordinary, expected failures (e.g. validating user input) and are
/// the only errors that `try_parse` style APIs swallow.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input does not have the fixed length required by the format.
    #[error("invalid length: expected {expected} characters, got {actual}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Length of the rejected input in bytes.
        actual: usize,
    },

    /// The input contains a character outside the Crockford alphabet.
    #[error("invalid character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the text handed to the decoder.
        index: usize,
    },

    /// Decoding produced a different number of bytes than the layout holds.
    ///
    /// This indicates a bug in the caller's length bookkeeping rather than bad
    /// user input.
    #[error("decoded {actual} bytes, expected {expected}")]
    DecodedLengthMismatch {
        /// Byte width of the target layout.
        expected: usize,
        /// Bytes produced by the decoder.
        actual: usize,
    },
}
