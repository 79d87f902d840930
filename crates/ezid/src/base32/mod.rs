//! Crockford base32 codec.
//!
//! Bits are consumed most-significant first in 5-bit groups and the last
//! partial group is padded with zero bits on its low end, so for equal-length
//! inputs the ordinal order of the encoded text matches the byte order of the
//! input.
mod crockford;
mod error;

pub use crockford::*;
pub use error::*;
