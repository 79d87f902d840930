use core::{cmp::Ordering, fmt, hash};

/// Longest formatted id: 20 symbols plus one separator per symbol.
pub(crate) const MAX_TEXT_LEN: usize = 40;

/// A fixed-capacity, stack-allocated ASCII string holding a formatted id.
///
/// Comparison, equality and hashing all go through [`IdText::as_str`], so the
/// ordering is plain ordinal string order.
#[derive(Clone, Copy)]
pub struct IdText {
    buf: [u8; MAX_TEXT_LEN],
    len: u8,
}

impl IdText {
    pub(crate) const EMPTY: Self = Self {
        buf: [0; MAX_TEXT_LEN],
        len: 0,
    };

    /// Appends an ASCII byte. Callers size their input from a validated
    /// [`FormatConfig`](crate::FormatConfig), which never exceeds the capacity.
    #[inline]
    pub(crate) fn push(&mut self, byte: u8) {
        debug_assert!(byte.is_ascii());
        self.buf[self.len as usize] = byte;
        self.len += 1;
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `push` is the only writer and every caller hands it bytes
        // from the Crockford alphabet or a separator character, all ASCII.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Returns the raw ASCII bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for IdText {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for IdText {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for IdText {}

impl PartialOrd for IdText {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IdText {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl hash::Hash for IdText {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl AsRef<str> for IdText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IdText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for IdText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl From<IdText> for String {
    fn from(text: IdText) -> Self {
        text.as_str().to_owned()
    }
}
