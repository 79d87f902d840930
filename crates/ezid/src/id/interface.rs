use core::{fmt, hash::Hash, str::FromStr};

use crate::{BitWidth, FormatConfig, ParseError};

/// A compile-time text layout for an id type.
///
/// Implement this through [`id_format!`](crate::id_format), which validates
/// the layout while compiling. A hand-written implementation must hold a
/// [`FormatConfig`] whose width matches the id type it is used with; the id
/// types assert this when they are monomorphized.
pub trait IdFormat {
    /// The validated layout.
    const CONFIG: FormatConfig;
}

/// Capabilities shared by every identifier value type.
///
/// Generic code (serialization adapters, the CLI) works against this trait so
/// it can handle both widths and any format.
pub trait EzIdType:
    Sized + Copy + Default + Ord + Hash + fmt::Display + fmt::Debug + FromStr<Err = ParseError>
{
    /// Raw bit width.
    const WIDTH: BitWidth;

    /// Text layout used by [`EzIdType::as_str`] and [`EzIdType::parse`].
    fn config() -> FormatConfig;

    /// The formatted text.
    fn as_str(&self) -> &str;

    /// Parses formatted text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first problem found.
    fn parse(s: &str) -> Result<Self, ParseError>;

    /// Parses formatted text, returning `None` on any [`ParseError`].
    fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// The sentinel id (all raw bits zero). Equal to [`Default::default`].
    #[must_use]
    fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` for the sentinel id.
    fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// Declares a format marker type and its [`IdFormat`] implementation.
///
/// The layout is validated by the compiler: out-of-range positions or
/// positions without a separator fail the build.
///
/// ```
/// use ezid::{BitWidth, CompactEzId, Separator, id_format};
///
/// id_format! {
///     /// `XXXX_XXXX_XXXXX`
///     pub Quads = (BitWidth::Bits64, Separator::Underscore, [4, 9]);
/// }
///
/// let id = CompactEzId::<Quads>::from_u64(0);
/// assert_eq!(id.as_str(), "0000_0000_00000");
/// ```
///
/// ```compile_fail
/// use ezid::{BitWidth, Separator, id_format};
///
/// id_format! {
///     pub Broken = (BitWidth::Bits64, Separator::None, [3]);
/// }
/// ```
#[macro_export]
macro_rules! id_format {
    ($($(#[$meta:meta])* $vis:vis $name:ident = ($width:expr, $separator:expr, [$($position:expr),* $(,)?]);)+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
            $vis struct $name;

            impl $crate::IdFormat for $name {
                const CONFIG: $crate::FormatConfig =
                    match $crate::FormatConfig::new($width, $separator, &[$($position),*]) {
                        Ok(config) => config,
                        Err(_) => panic!(concat!("invalid id format `", stringify!($name), "`")),
                    };
            }

            const _: $crate::FormatConfig = <$name as $crate::IdFormat>::CONFIG;
        )+
    };
}

id_format! {
    /// `XXX-XXXXXXX-XXX`, the default 64-bit layout.
    pub DashedCompact = (BitWidth::Bits64, crate::Separator::Dash, [3, 11]);
    /// `XXXXXXXXXXXXX`
    pub PlainCompact = (BitWidth::Bits64, crate::Separator::None, []);
    /// `XXX_XXXXXXX_XXX`
    pub UnderscoreCompact = (BitWidth::Bits64, crate::Separator::Underscore, [3, 11]);
    /// `XXXXX-XXXXXXXXXX-XXXXX`, the default 96-bit layout.
    pub DashedEzId = (BitWidth::Bits96, crate::Separator::Dash, [5, 16]);
    /// `XXXXXXXXXXXXXXXXXXXX`
    pub PlainEzId = (BitWidth::Bits96, crate::Separator::None, []);
    /// `XXXXX_XXXXXXXXXX_XXXXX`
    pub UnderscoreEzId = (BitWidth::Bits96, crate::Separator::Underscore, [5, 16]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_formats() {
        assert_eq!(DashedCompact::CONFIG, FormatConfig::DEFAULT_COMPACT);
        assert_eq!(DashedEzId::CONFIG, FormatConfig::DEFAULT_EZID);
        assert_eq!(PlainCompact::CONFIG.total_len(), 13);
        assert_eq!(PlainEzId::CONFIG.total_len(), 20);
        assert_eq!(UnderscoreCompact::CONFIG.total_len(), 15);
        assert_eq!(UnderscoreEzId::CONFIG.total_len(), 22);
    }
}
