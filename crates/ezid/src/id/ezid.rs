use core::{cmp::Ordering, fmt, hash, marker::PhantomData, str::FromStr};

use super::layout::{pack_ezid, unpack_ezid};
use crate::{BitWidth, DashedEzId, EzIdType, FormatConfig, IdFormat, IdText, ParseError};

/// A 96-bit time-random id together with its formatted text.
///
/// Layout: 32-bit unix seconds, 40-bit generator id, 24-bit sequence. See
/// [`TimeRandomGenerator`](crate::TimeRandomGenerator) for how the fields are
/// filled.
///
/// ```
/// use ezid::EzId;
///
/// let id: EzId = EzId::from_components(1_750_000_000, 0xAB_CDEF_0123, 42);
/// assert_eq!(id.timestamp(), 1_750_000_000);
/// assert_eq!(id.generator_id(), 0xAB_CDEF_0123);
/// assert_eq!(id.sequence(), 42);
/// assert_eq!(id.as_str().len(), 22);
/// assert_eq!(id.as_str().parse::<EzId>().unwrap(), id);
/// ```
pub struct EzId<F: IdFormat = DashedEzId> {
    raw: [u8; 12],
    text: IdText,
    _format: PhantomData<fn() -> F>,
}

impl<F: IdFormat> EzId<F> {
    const CONFIG: FormatConfig = {
        assert!(
            matches!(F::CONFIG.width(), BitWidth::Bits96),
            "EzId requires a 96-bit format"
        );
        F::CONFIG
    };

    /// Wraps 12 raw bytes.
    #[must_use]
    pub fn from_bytes(raw: [u8; 12]) -> Self {
        Self {
            raw,
            text: Self::CONFIG.format_bytes_unchecked(&raw),
            _format: PhantomData,
        }
    }

    /// Packs components. `generator_id` is masked to 40 bits and `sequence`
    /// to 24 bits.
    #[must_use]
    pub fn from_components(timestamp: u32, generator_id: u64, sequence: u32) -> Self {
        Self::from_bytes(pack_ezid(timestamp, generator_id, sequence))
    }

    /// The sentinel id: all-zero bytes, text `00000-0000000000-00000` by
    /// default.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_bytes([0; 12])
    }

    /// Parses formatted text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidLength`] or
    /// [`ParseError::InvalidCharacter`]; see
    /// [`FormatConfig::strip`](crate::FormatConfig::strip).
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Self::CONFIG.parse_bytes_unchecked(s).map(Self::from_bytes)
    }

    /// Parses formatted text, returning `None` on failure.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 12] {
        self.raw
    }

    /// Unix seconds at allocation.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        unpack_ezid(&self.raw).0
    }

    /// The 40-bit identity of the allocating generator.
    #[must_use]
    pub const fn generator_id(&self) -> u64 {
        unpack_ezid(&self.raw).1
    }

    /// The 24-bit sequence.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        unpack_ezid(&self.raw).2
    }

    /// The formatted text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// The formatted text as a copyable value.
    #[must_use]
    pub const fn text(&self) -> IdText {
        self.text
    }

    /// Re-renders the same raw bytes in another 96-bit format.
    #[must_use]
    pub fn reformat<G: IdFormat>(&self) -> EzId<G> {
        EzId::from_bytes(self.raw)
    }
}

impl<F: IdFormat> EzIdType for EzId<F> {
    const WIDTH: BitWidth = BitWidth::Bits96;

    fn config() -> FormatConfig {
        Self::CONFIG
    }

    fn as_str(&self) -> &str {
        self.text.as_str()
    }

    fn parse(s: &str) -> Result<Self, ParseError> {
        Self::parse(s)
    }
}

impl<F: IdFormat> Clone for EzId<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: IdFormat> Copy for EzId<F> {}

impl<F: IdFormat> Default for EzId<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: IdFormat> PartialEq for EzId<F> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl<F: IdFormat> Eq for EzId<F> {}

impl<F: IdFormat> PartialOrd for EzId<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: IdFormat> Ord for EzId<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl<F: IdFormat> hash::Hash for EzId<F> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl<F: IdFormat> fmt::Display for EzId<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<F: IdFormat> fmt::Debug for EzId<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EzId")
            .field("text", &self.as_str())
            .field("timestamp", &self.timestamp())
            .field("generator_id", &self.generator_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl<F: IdFormat> FromStr for EzId<F> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<F: IdFormat> TryFrom<&str> for EzId<F> {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl<F: IdFormat> AsRef<str> for EzId<F> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<F: IdFormat> From<[u8; 12]> for EzId<F> {
    fn from(raw: [u8; 12]) -> Self {
        Self::from_bytes(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlainEzId, UnderscoreEzId};

    #[test]
    fn sentinel() {
        let empty = EzId::<DashedEzId>::default();
        assert_eq!(empty.as_str(), "00000-0000000000-00000");
        assert_eq!(empty.to_bytes(), [0; 12]);
        assert_eq!(EzId::<DashedEzId>::try_parse("garbage").unwrap_or_default(), empty);
    }

    #[test]
    fn example_text_round_trips() {
        let id = EzId::<DashedEzId>::parse("070AB-47XF6Q8NH0-YPA40").unwrap();
        assert_eq!(id.as_str(), "070AB-47XF6Q8NH0-YPA40");
        assert_eq!(EzId::<DashedEzId>::from_bytes(id.to_bytes()), id);
    }

    #[test]
    fn fixed_lengths() {
        for raw in [[0_u8; 12], [0xFF; 12], [0x5A; 12]] {
            assert_eq!(EzId::<DashedEzId>::from_bytes(raw).as_str().len(), 22);
            assert_eq!(EzId::<PlainEzId>::from_bytes(raw).as_str().len(), 20);
            assert_eq!(EzId::<UnderscoreEzId>::from_bytes(raw).as_str().len(), 22);
        }
    }

    #[test]
    fn components_are_masked() {
        let id = EzId::<DashedEzId>::from_components(7, u64::MAX, u32::MAX);
        assert_eq!(id.timestamp(), 7);
        assert_eq!(id.generator_id(), (1 << 40) - 1);
        assert_eq!(id.sequence(), (1 << 24) - 1);
    }

    #[test]
    fn parse_rejections() {
        type Id = EzId<DashedEzId>;
        assert!(matches!(
            Id::parse(""),
            Err(ParseError::InvalidLength {
                expected: 22,
                actual: 0,
            })
        ));
        assert!(matches!(
            Id::parse("070AB-47XF6Q8NH0-YPA4"),
            Err(ParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            Id::parse("070AB-47XF6Q8NH0-YPA4U"),
            Err(ParseError::InvalidCharacter {
                character: 'U',
                index: 21,
            })
        ));
        assert!(matches!(
            Id::parse("070ab-47xf6q8nh0-ypa40"),
            Err(ParseError::InvalidCharacter { character: 'a', index: 3 })
        ));
    }

    #[test]
    fn reformat_keeps_raw_bytes() {
        let id: EzId = EzId::from_components(1, 2, 3);
        let plain: EzId<PlainEzId> = id.reformat();
        assert_eq!(plain.to_bytes(), id.to_bytes());
        assert_eq!(plain.as_str(), id.as_str().replace('-', ""));
    }
}
