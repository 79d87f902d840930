use core::{fmt, str::FromStr};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{IdText, Separator};
use crate::{
    ConfigError, Error, ParseError, SeparatorConfigError,
    base32::{self, decode_to_array, encode_to_buf},
};

/// Supported raw id widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitWidth {
    /// Snowflake layout, one `u64`.
    Bits64,
    /// Time-random layout, 12 bytes.
    Bits96,
}

impl BitWidth {
    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits64 => 64,
            Self::Bits96 => 96,
        }
    }

    /// Width in bytes.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Bits64 => 8,
            Self::Bits96 => 12,
        }
    }

    /// Number of base32 symbols in the bare encoding: 13 or 20.
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        base32::encoded_len(self.byte_len())
    }

    /// Largest accepted separator position.
    #[must_use]
    pub const fn max_position(self) -> u8 {
        (self.encoded_len() - 1) as u8
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Returned when a string names no supported [`BitWidth`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported bit width {0:?} (expected 64 or 96)")]
pub struct UnsupportedWidth(pub String);

impl FromStr for BitWidth {
    type Err = UnsupportedWidth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "64" => Ok(Self::Bits64),
            "96" => Ok(Self::Bits96),
            _ => Err(UnsupportedWidth(s.to_owned())),
        }
    }
}

/// Describes how an encoded id is laid out as text.
///
/// Positions are offsets into the **output**: while writing the encoded
/// symbols, a separator is emitted whenever the text written so far is as long
/// as a listed position. With the 64-bit default `{3, 11}` this yields
/// `XXX-XXXXXXX-XXX`.
///
/// Positions are kept as a bit set, so duplicates collapse and the order in
/// which they are listed does not matter.
///
/// ```
/// use ezid::{BitWidth, FormatConfig, Separator};
///
/// let config = FormatConfig::new(BitWidth::Bits64, Separator::Underscore, &[4, 9]).unwrap();
/// assert_eq!(config.total_len(), 15);
/// assert_eq!(config.format_u64(0).unwrap().as_str(), "0000_0000_00000");
///
/// assert!(FormatConfig::new(BitWidth::Bits64, Separator::None, &[3]).is_err());
/// assert!(FormatConfig::new(BitWidth::Bits64, Separator::Dash, &[13]).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatConfig {
    width: BitWidth,
    separator: Separator,
    positions: u32,
}

impl FormatConfig {
    /// Default 64-bit layout: `XXX-XXXXXXX-XXX`.
    pub const DEFAULT_COMPACT: Self = match Self::new(BitWidth::Bits64, Separator::Dash, &[3, 11])
    {
        Ok(config) => config,
        Err(_) => panic!("invalid default compact format"),
    };

    /// Default 96-bit layout: `XXXXX-XXXXXXXXXX-XXXXX`.
    pub const DEFAULT_EZID: Self = match Self::new(BitWidth::Bits96, Separator::Dash, &[5, 16]) {
        Ok(config) => config,
        Err(_) => panic!("invalid default ezid format"),
    };

    /// Validates and builds a layout.
    ///
    /// Usable in `const` context; [`id_format!`](crate::id_format) relies on
    /// this to reject bad layouts at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeparatorConfig`] when positions are
    /// given with [`Separator::None`], or when a position exceeds
    /// [`BitWidth::max_position`].
    pub const fn new(
        width: BitWidth,
        separator: Separator,
        positions: &[u8],
    ) -> Result<Self, ConfigError> {
        if matches!(separator, Separator::None) && !positions.is_empty() {
            return Err(ConfigError::InvalidSeparatorConfig(
                SeparatorConfigError::PositionsWithoutSeparator {
                    count: positions.len(),
                },
            ));
        }

        let max = width.max_position();
        let mut mask = 0_u32;
        let mut i = 0;
        while i < positions.len() {
            let position = positions[i];
            if position > max {
                return Err(ConfigError::InvalidSeparatorConfig(
                    SeparatorConfigError::PositionOutOfRange {
                        position,
                        width: width.bits(),
                        max,
                    },
                ));
            }
            mask |= 1 << position;
            i += 1;
        }

        Ok(Self {
            width,
            separator,
            positions: mask,
        })
    }

    /// The default layout for a width.
    #[must_use]
    pub const fn default_for(width: BitWidth) -> Self {
        match width {
            BitWidth::Bits64 => Self::DEFAULT_COMPACT,
            BitWidth::Bits96 => Self::DEFAULT_EZID,
        }
    }

    #[must_use]
    pub const fn width(&self) -> BitWidth {
        self.width
    }

    #[must_use]
    pub const fn separator(&self) -> Separator {
        self.separator
    }

    /// Separator positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=self.width.max_position()).filter(|&p| self.has_position(p as usize))
    }

    /// Number of separators in the formatted text.
    #[must_use]
    pub const fn separator_count(&self) -> usize {
        self.positions.count_ones() as usize
    }

    /// Length of the bare encoding.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.width.encoded_len()
    }

    /// Length of every formatted id under this layout.
    #[must_use]
    pub const fn total_len(&self) -> usize {
        self.encoded_len() + self.separator_count()
    }

    #[inline]
    const fn has_position(&self, offset: usize) -> bool {
        offset < u32::BITS as usize && self.positions & (1 << offset) != 0
    }

    fn check_width(&self, actual: BitWidth) -> Result<(), ConfigError> {
        if self.width == actual {
            Ok(())
        } else {
            Err(ConfigError::WidthMismatch {
                expected: self.width,
                actual,
            })
        }
    }

    /// Encodes and formats a 64-bit raw id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WidthMismatch`] if this is a 96-bit layout.
    pub fn format_u64(&self, raw: u64) -> Result<IdText, ConfigError> {
        self.check_width(BitWidth::Bits64)?;
        Ok(self.format_u64_unchecked(raw))
    }

    /// Encodes and formats a 96-bit raw id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WidthMismatch`] if this is a 64-bit layout.
    pub fn format_bytes(&self, raw: &[u8; 12]) -> Result<IdText, ConfigError> {
        self.check_width(BitWidth::Bits96)?;
        Ok(self.format_bytes_unchecked(raw))
    }

    /// Parses formatted text back into a 64-bit raw id.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::WidthMismatch`] if this is a 96-bit layout
    /// - any [`ParseError`] from [`FormatConfig::strip`]
    pub fn parse_u64(&self, text: &str) -> Result<u64, Error> {
        self.check_width(BitWidth::Bits64)?;
        Ok(self.parse_u64_unchecked(text)?)
    }

    /// Parses formatted text back into a 96-bit raw id.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::WidthMismatch`] if this is a 64-bit layout
    /// - any [`ParseError`] from [`FormatConfig::strip`]
    pub fn parse_bytes(&self, text: &str) -> Result<[u8; 12], Error> {
        self.check_width(BitWidth::Bits96)?;
        Ok(self.parse_bytes_unchecked(text)?)
    }

    /// Inserts separators into a bare encoding.
    ///
    /// `encoded` must be exactly [`FormatConfig::encoded_len`] alphabet
    /// symbols.
    pub(crate) fn format_encoded(&self, encoded: &[u8]) -> IdText {
        debug_assert_eq!(encoded.len(), self.encoded_len());

        let mut text = IdText::EMPTY;
        let separator = self.separator.as_byte();
        for &symbol in encoded {
            if let Some(separator) = separator {
                while self.has_position(text.len()) {
                    text.push(separator);
                }
            }
            text.push(symbol);
        }
        text
    }

    pub(crate) fn format_u64_unchecked(&self, raw: u64) -> IdText {
        let mut buf = [0_u8; base32::encoded_len(8)];
        encode_to_buf(&raw.to_le_bytes(), &mut buf);
        self.format_encoded(&buf)
    }

    pub(crate) fn format_bytes_unchecked(&self, raw: &[u8; 12]) -> IdText {
        let mut buf = [0_u8; base32::encoded_len(12)];
        encode_to_buf(raw, &mut buf);
        self.format_encoded(&buf)
    }

    pub(crate) fn parse_u64_unchecked(&self, text: &str) -> Result<u64, ParseError> {
        let encoded = self.strip(text)?;
        decode_to_array::<8>(encoded.as_str()).map(u64::from_le_bytes)
    }

    pub(crate) fn parse_bytes_unchecked(&self, text: &str) -> Result<[u8; 12], ParseError> {
        let encoded = self.strip(text)?;
        decode_to_array::<12>(encoded.as_str())
    }

    /// Validates formatted text and returns its bare encoding.
    ///
    /// Checks run in order and stop at the first failure:
    ///
    /// 1. the input is exactly [`FormatConfig::total_len`] bytes long
    /// 2. every character other than the separator belongs to the alphabet,
    ///    so a foreign separator is reported as an invalid character
    /// 3. exactly [`FormatConfig::encoded_len`] symbols remain
    ///
    /// Separator placement is not re-checked once the counts line up.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidLength`] for either length check,
    /// [`ParseError::InvalidCharacter`] with the byte offset into `text` for
    /// the alphabet check.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn strip(&self, text: &str) -> Result<IdText, ParseError> {
        let expected = self.total_len();
        if text.len() != expected {
            return Err(ParseError::InvalidLength {
                expected,
                actual: text.len(),
            });
        }

        let separator = self.separator.as_char();
        let mut encoded = IdText::EMPTY;
        for (index, character) in text.char_indices() {
            if Some(character) == separator {
                continue;
            }
            if !character.is_ascii() || !base32::is_symbol(character as u8) {
                return Err(ParseError::InvalidCharacter { character, index });
            }
            encoded.push(character as u8);
        }

        // Only reachable when separators sit where symbols belong.
        if encoded.len() != self.encoded_len() {
            return Err(ParseError::InvalidLength {
                expected: self.encoded_len(),
                actual: encoded.len(),
            });
        }
        Ok(encoded)
    }
}

impl fmt::Debug for FormatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Positions<'a>(&'a FormatConfig);
        impl fmt::Debug for Positions<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.0.positions()).finish()
            }
        }

        f.debug_struct("FormatConfig")
            .field("width", &self.width)
            .field("separator", &self.separator)
            .field("positions", &Positions(self))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: BitWidth, separator: Separator, positions: &[u8]) -> FormatConfig {
        FormatConfig::new(width, separator, positions).unwrap()
    }

    #[test]
    fn defaults_have_expected_lengths() {
        assert_eq!(FormatConfig::DEFAULT_COMPACT.total_len(), 15);
        assert_eq!(FormatConfig::DEFAULT_EZID.total_len(), 22);
        assert_eq!(
            FormatConfig::DEFAULT_COMPACT.positions().collect::<Vec<_>>(),
            [3, 11]
        );
        assert_eq!(
            FormatConfig::DEFAULT_EZID.positions().collect::<Vec<_>>(),
            [5, 16]
        );
    }

    #[test]
    fn compact_boundary_literals() {
        let c = FormatConfig::DEFAULT_COMPACT;
        assert_eq!(c.format_u64(0).unwrap().as_str(), "000-0000000-000");
        assert_eq!(
            c.format_u64(i64::MAX as u64).unwrap().as_str(),
            "ZZZ-ZZZZZZZ-ZQY"
        );
        assert_eq!(
            c.format_u64(i64::MIN as u64).unwrap().as_str(),
            "000-0000000-080"
        );

        assert_eq!(c.parse_u64("000-0000000-000").unwrap(), 0);
        assert_eq!(c.parse_u64("ZZZ-ZZZZZZZ-ZQY").unwrap(), i64::MAX as u64);
        assert_eq!(c.parse_u64("000-0000000-080").unwrap(), i64::MIN as u64);
    }

    #[test]
    fn ezid_default_layout() {
        let c = FormatConfig::DEFAULT_EZID;
        let text = c.format_bytes(&[0; 12]).unwrap();
        assert_eq!(text.as_str(), "00000-0000000000-00000");

        let raw = c.parse_bytes("070AB-47XF6Q8NH0-YPA40").unwrap();
        assert_eq!(c.format_bytes(&raw).unwrap().as_str(), "070AB-47XF6Q8NH0-YPA40");
    }

    #[test]
    fn stripping_separators_yields_the_bare_encoding() {
        for raw in [0, 1, 0xDEAD_BEEF, u64::MAX] {
            let text = FormatConfig::DEFAULT_COMPACT.format_u64(raw).unwrap();
            let bare: String = text.as_str().chars().filter(|&c| c != '-').collect();
            assert_eq!(bare, base32::encode_u64(raw));
        }
    }

    #[test]
    fn adjacent_and_leading_positions() {
        let c = config(BitWidth::Bits64, Separator::Dash, &[0, 3, 4]);
        assert_eq!(c.total_len(), 16);
        assert_eq!(c.format_u64(0).unwrap().as_str(), "-00--00000000000");
        assert_eq!(c.parse_u64("-00--00000000000").unwrap(), 0);

        let last = config(BitWidth::Bits64, Separator::Underscore, &[12]);
        assert_eq!(last.format_u64(0).unwrap().as_str(), "000000000000_0");
    }

    #[test]
    fn duplicate_positions_collapse() {
        let c = config(BitWidth::Bits64, Separator::Dash, &[11, 3, 3, 11]);
        assert_eq!(c, FormatConfig::DEFAULT_COMPACT);
    }

    #[test]
    fn plain_layout_is_the_bare_encoding() {
        let c = config(BitWidth::Bits96, Separator::None, &[]);
        assert_eq!(c.total_len(), 20);
        assert_eq!(
            c.format_bytes(&[0xFF; 12]).unwrap().as_str(),
            "ZZZZZZZZZZZZZZZZZZZG"
        );
    }

    #[test]
    fn rejects_positions_without_separator() {
        assert_eq!(
            FormatConfig::new(BitWidth::Bits64, Separator::None, &[3, 11]),
            Err(ConfigError::InvalidSeparatorConfig(
                SeparatorConfigError::PositionsWithoutSeparator { count: 2 }
            ))
        );
    }

    #[test]
    fn rejects_out_of_range_positions() {
        assert_eq!(
            FormatConfig::new(BitWidth::Bits64, Separator::Dash, &[3, 13]),
            Err(ConfigError::InvalidSeparatorConfig(
                SeparatorConfigError::PositionOutOfRange {
                    position: 13,
                    width: 64,
                    max: 12,
                }
            ))
        );
        assert!(FormatConfig::new(BitWidth::Bits96, Separator::Dash, &[19]).is_ok());
        assert!(FormatConfig::new(BitWidth::Bits96, Separator::Dash, &[20]).is_err());
    }

    #[test]
    fn width_mismatch_is_reported() {
        assert_eq!(
            FormatConfig::DEFAULT_EZID.format_u64(1),
            Err(ConfigError::WidthMismatch {
                expected: BitWidth::Bits96,
                actual: BitWidth::Bits64,
            })
        );
        assert!(matches!(
            FormatConfig::DEFAULT_COMPACT.parse_bytes("00000-0000000000-00000"),
            Err(Error::Config(ConfigError::WidthMismatch { .. }))
        ));
    }

    #[test]
    fn strip_checks_total_length_first() {
        let c = FormatConfig::DEFAULT_COMPACT;
        assert_eq!(
            c.strip(""),
            Err(ParseError::InvalidLength {
                expected: 15,
                actual: 0,
            })
        );
        assert_eq!(
            c.strip("000-0000000-00"),
            Err(ParseError::InvalidLength {
                expected: 15,
                actual: 14,
            })
        );
        assert_eq!(
            c.strip("000-0000000-0000"),
            Err(ParseError::InvalidLength {
                expected: 15,
                actual: 16,
            })
        );
    }

    #[test]
    fn strip_checks_symbol_count() {
        let c = FormatConfig::DEFAULT_COMPACT;
        assert_eq!(
            c.strip("000000000000000"),
            Err(ParseError::InvalidLength {
                expected: 13,
                actual: 15,
            })
        );
        assert_eq!(
            c.strip("000-0000000--00"),
            Err(ParseError::InvalidLength {
                expected: 13,
                actual: 12,
            })
        );
    }

    #[test]
    fn strip_reports_character_offset_in_input() {
        let c = FormatConfig::DEFAULT_COMPACT;
        assert_eq!(
            c.strip("000-0000000-00U"),
            Err(ParseError::InvalidCharacter {
                character: 'U',
                index: 14,
            })
        );
        assert_eq!(
            c.strip("000_0000000_000"),
            Err(ParseError::InvalidCharacter {
                character: '_',
                index: 3,
            })
        );
        assert_eq!(
            c.strip("abc-0000000-000"),
            Err(ParseError::InvalidCharacter {
                character: 'a',
                index: 0,
            })
        );
    }

    #[test]
    fn foreign_separator_is_an_invalid_character() {
        assert_eq!(
            FormatConfig::DEFAULT_COMPACT.strip("2Q6_NP1R000_000"),
            Err(ParseError::InvalidCharacter {
                character: '_',
                index: 3,
            })
        );
        assert_eq!(
            FormatConfig::DEFAULT_EZID.strip("070AB_47XF6Q8NH0_YPA40"),
            Err(ParseError::InvalidCharacter {
                character: '_',
                index: 5,
            })
        );
        // Same length, but a dash where the plain layout expects a symbol.
        let plain = FormatConfig::new(BitWidth::Bits64, Separator::None, &[]).unwrap();
        assert_eq!(
            plain.strip("2Q6-NP1R00000"),
            Err(ParseError::InvalidCharacter {
                character: '-',
                index: 3,
            })
        );
    }

    #[test]
    fn strip_tolerates_misplaced_separators() {
        let c = FormatConfig::DEFAULT_COMPACT;
        let encoded = c.strip("0000-000000-000").unwrap();
        assert_eq!(encoded.as_str(), "0000000000000");
        assert_eq!(c.parse_u64("0000-000000-000").unwrap(), 0);
    }

    #[test]
    fn non_canonical_padding_is_normalized() {
        // The last symbol carries one padding bit; `1` sets it.
        let c = FormatConfig::DEFAULT_COMPACT;
        let raw = c.parse_u64("000-0000000-001").unwrap();
        assert_eq!(raw, 0);
        assert_eq!(c.format_u64(raw).unwrap().as_str(), "000-0000000-000");
    }

    #[test]
    fn width_round_trips_through_text() {
        assert_eq!("64".parse(), Ok(BitWidth::Bits64));
        assert_eq!("96".parse(), Ok(BitWidth::Bits96));
        assert!("128".parse::<BitWidth>().is_err());
        assert_eq!(BitWidth::Bits96.to_string(), "96");
        assert_eq!(BitWidth::Bits64.max_position(), 12);
        assert_eq!(BitWidth::Bits96.max_position(), 19);
    }

    #[test]
    fn debug_lists_positions() {
        assert_eq!(
            format!("{:?}", FormatConfig::DEFAULT_COMPACT),
            "FormatConfig { width: Bits64, separator: Dash, positions: {3, 11} }"
        );
    }
}
