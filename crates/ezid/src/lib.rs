//! Compact, human-friendly unique identifiers.
//!
//! `ezid` allocates two kinds of IDs and renders them as fixed-length,
//! separator-formatted [Crockford base32](https://www.crockford.com/base32.html)
//! text:
//!
//! - [`CompactEzId`]: a 64-bit snowflake layout (41-bit millisecond timestamp,
//!   10-bit generator id, 12-bit sequence) allocated by a lock-based
//!   [`SnowflakeGenerator`]. Default text form: `2Q6-NP1R000-000`.
//! - [`EzId`]: a 96-bit layout (32-bit unix seconds, 40-bit random generator
//!   id, 24-bit sequence) allocated lock-free by a [`TimeRandomGenerator`].
//!   Default text form: `070AB-47XF6Q8NH0-YPA40`.
//!
//! Separator placement is described by a [`FormatConfig`]. Custom formats are
//! declared with [`id_format!`] and validated at compile time.
//!
//! ```
//! use ezid::{CompactEzId, CompactEzIdGenerator, EzId, TimeRandomGenerator};
//!
//! let generator = CompactEzIdGenerator::with_generator_id(7).unwrap();
//! let id: CompactEzId = generator.next_id().unwrap();
//! assert_eq!(id.as_str().len(), 15);
//! assert_eq!(id.generator_id(), 7);
//!
//! let wide: EzId = TimeRandomGenerator::global().next_id();
//! assert_eq!(wide, wide.as_str().parse::<EzId>().unwrap());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base32;
mod error;
pub mod format;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base32::{ALPHABET, ParseError};
pub use crate::error::*;
pub use crate::format::{BitWidth, FormatConfig, IdText, Separator, UnknownSeparator, UnsupportedWidth};
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
