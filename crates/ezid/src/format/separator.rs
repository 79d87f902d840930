use core::{fmt, str::FromStr};

/// The cosmetic character inserted between groups of encoded symbols.
///
/// Neither candidate belongs to the Crockford alphabet, so separators can be
/// stripped unambiguously before decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Separator {
    /// No separator; the text is the bare encoding.
    None,
    /// `-`
    #[default]
    Dash,
    /// `_`
    Underscore,
}

impl Separator {
    /// The separator byte, or `None` for [`Separator::None`].
    #[must_use]
    pub const fn as_byte(self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::Dash => Some(b'-'),
            Self::Underscore => Some(b'_'),
        }
    }

    /// The separator character, or `None` for [`Separator::None`].
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self.as_byte() {
            Some(b) => Some(b as char),
            None => None,
        }
    }

    /// Lower-case name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dash => "dash",
            Self::Underscore => "underscore",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known [`Separator`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown separator {0:?} (expected none, dash or underscore)")]
pub struct UnknownSeparator(pub String);

impl FromStr for Separator {
    type Err = UnknownSeparator;

    /// Accepts the names `none`, `dash` and `underscore` (any case) as well as
    /// the literal characters `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Dash),
            "_" => Ok(Self::Underscore),
            "" => Ok(Self::None),
            _ if s.eq_ignore_ascii_case("none") => Ok(Self::None),
            _ if s.eq_ignore_ascii_case("dash") => Ok(Self::Dash),
            _ if s.eq_ignore_ascii_case("underscore") => Ok(Self::Underscore),
            _ => Err(UnknownSeparator(s.to_owned())),
        }
    }
}
