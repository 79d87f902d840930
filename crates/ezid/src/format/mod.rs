//! Separator-aware text layout.
//!
//! A [`FormatConfig`] turns a bare base32 encoding into the fixed-length text
//! users see (`2Q6-NP1R000-000`) and validates such text on the way back in.
mod config;
mod separator;
mod text;

pub use config::*;
pub use separator::*;
pub use text::*;

use crate::{ParseError, base32};

/// Inserts the separators described by `config` into a bare encoding.
///
/// # Errors
///
/// - [`ParseError::InvalidLength`] unless `encoded` has exactly
///   [`FormatConfig::encoded_len`] bytes
/// - [`ParseError::InvalidCharacter`] for any character outside the alphabet
///
/// ```
/// use ezid::{FormatConfig, format};
///
/// let text = format::format("0000000000000", &FormatConfig::DEFAULT_COMPACT).unwrap();
/// assert_eq!(text.as_str(), "000-0000000-000");
/// ```
pub fn format(encoded: &str, config: &FormatConfig) -> Result<IdText, ParseError> {
    let expected = config.encoded_len();
    if encoded.len() != expected {
        return Err(ParseError::InvalidLength {
            expected,
            actual: encoded.len(),
        });
    }
    if let Some((index, character)) = encoded
        .char_indices()
        .find(|&(_, c)| !c.is_ascii() || !base32::is_symbol(c as u8))
    {
        return Err(ParseError::InvalidCharacter { character, index });
    }
    Ok(config.format_encoded(encoded.as_bytes()))
}

/// Removes the separators from formatted text, returning the bare encoding.
///
/// See [`FormatConfig::strip`] for the checks applied.
///
/// # Errors
///
/// [`ParseError::InvalidLength`] or [`ParseError::InvalidCharacter`].
///
/// ```
/// use ezid::{FormatConfig, format};
///
/// let bare = format::parse("ZZZ-ZZZZZZZ-ZQY", &FormatConfig::DEFAULT_COMPACT).unwrap();
/// assert_eq!(bare.as_str(), "ZZZZZZZZZZZQY");
/// assert!(format::parse("ZZZ-ZZZZZZZ-ZQ", &FormatConfig::DEFAULT_COMPACT).is_err());
/// ```
pub fn parse(formatted: &str, config: &FormatConfig) -> Result<IdText, ParseError> {
    config.strip(formatted)
}
