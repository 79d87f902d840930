use super::ParseError;

/// The Crockford base32 alphabet, in ascending symbol order.
///
/// `I`, `L`, `O` and `U` are excluded to avoid visually ambiguous output.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;
const MASK: u32 = 0x1F;

/// Number of symbols produced for a 64-bit integer.
pub const U64_ENCODED_LEN: usize = encoded_len(8);

/// Lookup table for Crockford base32 decoding.
///
/// Only the canonical upper-case symbols are mapped. Lower-case input and the
/// usual Crockford aliases (`O`, `I`, `L`) are rejected so that every accepted
/// string has exactly one spelling.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Number of symbols needed to encode `bytes` bytes.
#[must_use]
pub const fn encoded_len(bytes: usize) -> usize {
    (bytes * 8).div_ceil(BITS_PER_CHAR)
}

/// Number of whole bytes carried by `chars` symbols; trailing padding bits are
/// not counted.
#[must_use]
pub const fn decoded_len(chars: usize) -> usize {
    chars * BITS_PER_CHAR / 8
}

/// Returns `true` if `c` is one of the 32 canonical symbols.
#[must_use]
pub const fn is_symbol(c: u8) -> bool {
    LOOKUP[c as usize] != NO_VALUE
}

/// Encodes `input` into `buf`.
///
/// `buf` must be exactly [`encoded_len`]`(input.len())` bytes long. The output
/// is always ASCII.
///
/// # Panics
///
/// Panics if `buf` is shorter than required.
pub fn encode_to_buf(input: &[u8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len(), encoded_len(input.len()));

    let mut acc = 0_u32;
    let mut bits = 0;
    let mut out = 0;
    for &b in input {
        acc = (acc << 8) | u32::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            buf[out] = ALPHABET[((acc >> bits) & MASK) as usize];
            out += 1;
        }
    }
    if bits > 0 {
        // Zero-pad the final group on its low end.
        buf[out] = ALPHABET[((acc << (BITS_PER_CHAR - bits)) & MASK) as usize];
    }
}

/// Encodes a byte slice into Crockford base32.
///
/// ```
/// assert_eq!(ezid::base32::encode(&[0xFF]), "ZW");
/// assert_eq!(ezid::base32::encode(&[0; 12]).len(), 20);
/// ```
#[must_use]
pub fn encode(input: &[u8]) -> String {
    let mut buf = vec![0_u8; encoded_len(input.len())];
    encode_to_buf(input, &mut buf);
    buf.into_iter().map(char::from).collect()
}

/// Encodes a 64-bit integer into 13 Crockford base32 symbols.
///
/// The integer is written in little-endian byte order before encoding; this
/// is the wire layout of compact IDs and must not change.
///
/// ```
/// assert_eq!(ezid::base32::encode_u64(0), "0000000000000");
/// assert_eq!(ezid::base32::encode_u64(i64::MAX as u64), "ZZZZZZZZZZZQY");
/// assert_eq!(ezid::base32::encode_u64(i64::MIN as u64), "0000000000080");
/// ```
#[must_use]
pub fn encode_u64(value: u64) -> String {
    encode(&value.to_le_bytes())
}

/// Decodes Crockford base32 text into exactly `N` bytes.
///
/// # Errors
///
/// - [`ParseError::InvalidCharacter`] if any character is outside the alphabet
/// - [`ParseError::DecodedLengthMismatch`] if the text does not carry exactly
///   `N` bytes
pub fn decode_to_array<const N: usize>(encoded: &str) -> Result<[u8; N], ParseError> {
    let mut out = [0_u8; N];
    let mut written = 0;
    decode_with(encoded, |b| {
        if let Some(slot) = out.get_mut(written) {
            *slot = b;
        }
        written += 1;
    })?;
    if written != N {
        return Err(ParseError::DecodedLengthMismatch {
            expected: N,
            actual: written,
        });
    }
    Ok(out)
}

/// Decodes Crockford base32 text into bytes, discarding trailing padding bits.
///
/// # Errors
///
/// Returns [`ParseError::InvalidCharacter`] if any character is outside the
/// alphabet. Lower-case letters are rejected.
///
/// ```
/// assert_eq!(ezid::base32::decode("ZW").unwrap(), vec![0xFF]);
/// assert!(ezid::base32::decode("zw").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<u8>, ParseError> {
    let mut out = Vec::with_capacity(decoded_len(encoded.len()));
    decode_with(encoded, |b| out.push(b))?;
    Ok(out)
}

/// Decodes 13 Crockford base32 symbols into a 64-bit integer.
///
/// Inverse of [`encode_u64`].
///
/// # Errors
///
/// - [`ParseError::InvalidLength`] if the text is not 13 symbols long
/// - [`ParseError::InvalidCharacter`] if any character is outside the alphabet
pub fn decode_u64(encoded: &str) -> Result<u64, ParseError> {
    if encoded.len() != U64_ENCODED_LEN {
        return Err(ParseError::InvalidLength {
            expected: U64_ENCODED_LEN,
            actual: encoded.len(),
        });
    }
    decode_to_array::<8>(encoded).map(u64::from_le_bytes)
}

fn decode_with(encoded: &str, mut emit: impl FnMut(u8)) -> Result<(), ParseError> {
    let mut acc = 0_u32;
    let mut bits = 0;
    for (index, character) in encoded.char_indices() {
        let val = u8::try_from(character)
            .map(|b| LOOKUP[b as usize])
            .unwrap_or(NO_VALUE);
        if val == NO_VALUE {
            return Err(ParseError::InvalidCharacter { character, index });
        }
        acc = (acc << BITS_PER_CHAR) | u32::from(val);
        bits += BITS_PER_CHAR;
        if bits >= 8 {
            bits -= 8;
            emit(((acc >> bits) & 0xFF) as u8);
        }
    }
    Ok(())
}
