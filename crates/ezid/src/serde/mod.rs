//! Serialization as formatted text.
//!
//! Both id types serialize to their formatted string verbatim and deserialize
//! only from a string. Empty or whitespace-only strings are rejected before
//! parsing so that a missing value never silently becomes the sentinel id.
use core::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{CompactEzId, EzId, EzIdType, IdFormat, IdText};

struct IdVisitor<T>(PhantomData<fn() -> T>);

impl<T: EzIdType> Visitor<'_> for IdVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "a {}-character {}-bit id string",
            T::config().total_len(),
            T::WIDTH
        )
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v.trim().is_empty() {
            return Err(E::custom("id string is empty"));
        }
        T::parse(v).map_err(E::custom)
    }
}

impl Serialize for IdText {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<F: IdFormat> Serialize for CompactEzId<F> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de, F: IdFormat> Deserialize<'de> for CompactEzId<F> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_str(IdVisitor(PhantomData))
    }
}

impl<F: IdFormat> Serialize for EzId<F> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de, F: IdFormat> Deserialize<'de> for EzId<F> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_str(IdVisitor(PhantomData))
    }
}
