use core::{cmp::Ordering, fmt, hash, marker::PhantomData, str::FromStr};

use super::layout::{pack_compact, unpack_compact};
use crate::{BitWidth, DashedCompact, EzIdType, FormatConfig, IdFormat, IdText, ParseError};

/// A 64-bit snowflake id together with its formatted text.
///
/// The text is rendered once at construction; [`CompactEzId::as_str`] and
/// [`Display`](fmt::Display) only borrow it. Ordering, equality and hashing
/// follow the text, so two ids compare the way their strings do.
///
/// Chronological order is the order of [`CompactEzId::to_u64`], which is what
/// a single [`SnowflakeGenerator`](crate::SnowflakeGenerator) guarantees to
/// increase.
///
/// ```
/// use ezid::CompactEzId;
///
/// let id: CompactEzId = CompactEzId::from_i64(i64::MAX);
/// assert_eq!(id.as_str(), "ZZZ-ZZZZZZZ-ZQY");
/// assert_eq!("ZZZ-ZZZZZZZ-ZQY".parse::<CompactEzId>().unwrap(), id);
/// assert_eq!(CompactEzId::<ezid::DashedCompact>::default().as_str(), "000-0000000-000");
/// ```
pub struct CompactEzId<F: IdFormat = DashedCompact> {
    raw: u64,
    text: IdText,
    _format: PhantomData<fn() -> F>,
}

impl<F: IdFormat> CompactEzId<F> {
    const CONFIG: FormatConfig = {
        assert!(
            matches!(F::CONFIG.width(), BitWidth::Bits64),
            "CompactEzId requires a 64-bit format"
        );
        F::CONFIG
    };

    /// Wraps a raw 64-bit value.
    #[must_use]
    pub fn from_u64(raw: u64) -> Self {
        Self {
            raw,
            text: Self::CONFIG.format_u64_unchecked(raw),
            _format: PhantomData,
        }
    }

    /// Wraps a raw value stored as a signed integer.
    #[must_use]
    pub fn from_i64(raw: i64) -> Self {
        Self::from_u64(raw as u64)
    }

    /// Packs components; each one is masked to its field width.
    #[must_use]
    pub fn from_components(timestamp: u64, generator_id: u64, sequence: u64) -> Self {
        Self::from_u64(pack_compact(timestamp, generator_id, sequence))
    }

    /// The sentinel id: raw value `0`, text `000-0000000-000` by default.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_u64(0)
    }

    /// Parses formatted text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidLength`] or
    /// [`ParseError::InvalidCharacter`]; see
    /// [`FormatConfig::strip`](crate::FormatConfig::strip).
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Self::CONFIG.parse_u64_unchecked(s).map(Self::from_u64)
    }

    /// Parses formatted text, returning `None` on failure.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    #[must_use]
    pub const fn to_u64(&self) -> u64 {
        self.raw
    }

    #[must_use]
    pub const fn to_i64(&self) -> i64 {
        self.raw as i64
    }

    /// Milliseconds since the generator's epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        unpack_compact(self.raw).0
    }

    #[must_use]
    pub const fn generator_id(&self) -> u64 {
        unpack_compact(self.raw).1
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        unpack_compact(self.raw).2
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

    /// Re-renders the same raw value in another 64-bit format.
    #[must_use]
    pub fn reformat<G: IdFormat>(&self) -> CompactEzId<G> {
        CompactEzId::from_u64(self.raw)
    }
}

impl<F: IdFormat> EzIdType for CompactEzId<F> {
    const WIDTH: BitWidth = BitWidth::Bits64;

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

impl<F: IdFormat> Clone for CompactEzId<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: IdFormat> Copy for CompactEzId<F> {}

impl<F: IdFormat> Default for CompactEzId<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: IdFormat> PartialEq for CompactEzId<F> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl<F: IdFormat> Eq for CompactEzId<F> {}

impl<F: IdFormat> PartialOrd for CompactEzId<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: IdFormat> Ord for CompactEzId<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl<F: IdFormat> hash::Hash for CompactEzId<F> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl<F: IdFormat> fmt::Display for CompactEzId<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<F: IdFormat> fmt::Debug for CompactEzId<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactEzId")
            .field("text", &self.as_str())
            .field("timestamp", &self.timestamp())
            .field("generator_id", &self.generator_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl<F: IdFormat> FromStr for CompactEzId<F> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<F: IdFormat> TryFrom<&str> for CompactEzId<F> {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl<F: IdFormat> AsRef<str> for CompactEzId<F> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<F: IdFormat> From<u64> for CompactEzId<F> {
    fn from(raw: u64) -> Self {
        Self::from_u64(raw)
    }
}

impl<F: IdFormat> From<CompactEzId<F>> for u64 {
    fn from(id: CompactEzId<F>) -> Self {
        id.to_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlainCompact, UnderscoreCompact};
    use std::collections::HashSet;

    #[test]
    fn boundary_literals() {
        let cases = [
            (0_i64, "000-0000000-000"),
            (i64::MAX, "ZZZ-ZZZZZZZ-ZQY"),
            (i64::MIN, "000-0000000-080"),
        ];
        for (raw, text) in cases {
            let id = CompactEzId::<DashedCompact>::from_i64(raw);
            assert_eq!(id.as_str(), text);
            assert_eq!(id.to_string(), text);
            assert_eq!(CompactEzId::<DashedCompact>::parse(text).unwrap().to_i64(), raw);
        }
    }

    #[test]
    fn every_value_has_the_configured_length() {
        for raw in [0, 1, 4095, 1 << 22, u64::MAX >> 1, u64::MAX] {
            assert_eq!(CompactEzId::<DashedCompact>::from_u64(raw).as_str().len(), 15);
            assert_eq!(CompactEzId::<PlainCompact>::from_u64(raw).as_str().len(), 13);
        }
    }

    #[test]
    fn components_round_trip() {
        let id = CompactEzId::<DashedCompact>::from_components(123_456_789, 513, 4000);
        assert_eq!(id.timestamp(), 123_456_789);
        assert_eq!(id.generator_id(), 513);
        assert_eq!(id.sequence(), 4000);

        let parsed: CompactEzId = id.as_str().parse().unwrap();
        assert_eq!(parsed.to_u64(), id.to_u64());
        assert_eq!(parsed.generator_id(), 513);
    }

    #[test]
    fn parse_rejections() {
        type Id = CompactEzId<DashedCompact>;
        assert_eq!(
            Id::parse(""),
            Err(ParseError::InvalidLength {
                expected: 15,
                actual: 0,
            })
        );
        assert!(matches!(
            Id::parse("000-0000000-00"),
            Err(ParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            Id::parse("000-0000000-0000"),
            Err(ParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            Id::parse("000-0000000-00U"),
            Err(ParseError::InvalidCharacter { character: 'U', .. })
        ));
        assert!(matches!(
            Id::parse("zzz-zzzzzzz-zqy"),
            Err(ParseError::InvalidCharacter { character: 'z', .. })
        ));
    }

    #[test]
    fn try_parse_maps_failures_to_none() {
        type Id = CompactEzId<DashedCompact>;
        assert_eq!(Id::try_parse("nope"), None);
        let id = Id::try_parse("2Q6-NP1R000-000").unwrap();
        assert_eq!(id.as_str(), "2Q6-NP1R000-000");
        assert_eq!(Id::try_parse("bad").unwrap_or_default(), Id::empty());
    }

    #[test]
    fn trait_surface() {
        fn roundtrip<T: EzIdType>(text: &str) -> T {
            T::parse(text).unwrap()
        }
        let id: CompactEzId = roundtrip("ZZZ-ZZZZZZZ-ZQY");
        assert_eq!(<CompactEzId as EzIdType>::as_str(&id), "ZZZ-ZZZZZZZ-ZQY");
        assert_eq!(CompactEzId::<DashedCompact>::WIDTH, BitWidth::Bits64);
        assert!(<CompactEzId as EzIdType>::empty().is_empty());
        assert!(!id.is_empty());
        assert_eq!(CompactEzId::<DashedCompact>::try_from("000-0000000-080").unwrap().to_i64(), i64::MIN);
    }

    #[test]
    fn ordering_follows_text() {
        let mut ids: Vec<CompactEzId> = [5_u64, 1 << 40, 77, u64::MAX, 0]
            .into_iter()
            .map(CompactEzId::from_u64)
            .collect();
        ids.sort();
        let texts: Vec<&str> = ids.iter().map(CompactEzId::as_str).collect();
        let mut sorted = texts.clone();
        sorted.sort_unstable();
        assert_eq!(texts, sorted);
    }

    #[test]
    fn text_order_is_not_chronological() {
        // Little-endian wire bytes put the sequence and generator bits first.
        let earlier = CompactEzId::<DashedCompact>::from_components(100, 1, 5);
        let later = CompactEzId::<DashedCompact>::from_components(101, 1, 0);
        assert_eq!(earlier.as_str(), "0M8-0068000-000");
        assert_eq!(later.as_str(), "008-4068000-000");

        assert!(earlier.to_u64() < later.to_u64());
        assert!(earlier.timestamp() < later.timestamp());
        assert!(earlier > later);
    }

    #[test]
    fn equal_values_hash_equally() {
        let set: HashSet<CompactEzId> = [1_u64, 1, 2].into_iter().map(CompactEzId::from_u64).collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn reformat_keeps_raw_value() {
        let id: CompactEzId = CompactEzId::from_u64(0xDEAD_BEEF);
        let other: CompactEzId<UnderscoreCompact> = id.reformat();
        assert_eq!(other.to_u64(), 0xDEAD_BEEF);
        assert_eq!(other.as_str().replace('_', "-"), id.as_str());
    }
}
