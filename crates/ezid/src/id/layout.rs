//! Raw bit layouts.
//!
//! 64-bit snowflake, most significant first:
//!
//! ```text
//!  63   62                22 21          12 11          0
//! [ 0 | timestamp (41 bits) | generator (10) | sequence (12) ]
//! ```
//!
//! 96-bit time-random, as three 4-byte fields, each little-endian:
//!
//! ```text
//! [ start: unix seconds | mid: generator >> 8 | end: generator << 24 | sequence ]
//! ```
//!
//! The 40-bit generator id straddles `mid` and the top byte of `end`.

pub const TIMESTAMP_BITS: u32 = 41;
pub const GENERATOR_ID_BITS: u32 = 10;
pub const SEQUENCE_BITS: u32 = 12;

pub const GENERATOR_ID_SHIFT: u32 = SEQUENCE_BITS;
pub const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + GENERATOR_ID_BITS;

pub const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;
pub const MAX_GENERATOR_ID: u64 = (1 << GENERATOR_ID_BITS) - 1;
pub const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

pub const EZID_GENERATOR_ID_BITS: u32 = 40;
pub const EZID_SEQUENCE_BITS: u32 = 24;
pub const MAX_EZID_GENERATOR_ID: u64 = (1 << EZID_GENERATOR_ID_BITS) - 1;
pub const MAX_EZID_SEQUENCE: u32 = (1 << EZID_SEQUENCE_BITS) - 1;

/// Packs snowflake components. Each component is masked to its field width.
#[must_use]
pub const fn pack_compact(timestamp: u64, generator_id: u64, sequence: u64) -> u64 {
    ((timestamp & MAX_TIMESTAMP) << TIMESTAMP_SHIFT)
        | ((generator_id & MAX_GENERATOR_ID) << GENERATOR_ID_SHIFT)
        | (sequence & MAX_SEQUENCE)
}

/// Splits a snowflake into `(timestamp, generator_id, sequence)`.
#[must_use]
pub const fn unpack_compact(raw: u64) -> (u64, u64, u64) {
    (
        (raw >> TIMESTAMP_SHIFT) & MAX_TIMESTAMP,
        (raw >> GENERATOR_ID_SHIFT) & MAX_GENERATOR_ID,
        raw & MAX_SEQUENCE,
    )
}

/// Packs time-random components into 12 bytes.
///
/// `generator_id` is masked to 40 bits and `sequence` to 24 bits.
#[must_use]
pub const fn pack_ezid(timestamp: u32, generator_id: u64, sequence: u32) -> [u8; 12] {
    let generator_id = generator_id & MAX_EZID_GENERATOR_ID;
    let mid = (generator_id >> 8) as u32;
    let end = ((generator_id << EZID_SEQUENCE_BITS) as u32) | (sequence & MAX_EZID_SEQUENCE);

    let start = timestamp.to_le_bytes();
    let mid = mid.to_le_bytes();
    let end = end.to_le_bytes();
    [
        start[0], start[1], start[2], start[3], mid[0], mid[1], mid[2], mid[3], end[0], end[1],
        end[2], end[3],
    ]
}

/// Splits 12 bytes into `(timestamp, generator_id, sequence)`.
#[must_use]
pub const fn unpack_ezid(raw: &[u8; 12]) -> (u32, u64, u32) {
    let start = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    let mid = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
    let end = u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]);
    (
        start,
        ((mid as u64) << 8) | (end >> EZID_SEQUENCE_BITS) as u64,
        end & MAX_EZID_SEQUENCE,
    )
}
