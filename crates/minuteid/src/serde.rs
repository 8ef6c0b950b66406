//! `#[serde(with = "...")]` adapters for [`Identifier`] fields.
//!
//! [`Identifier`] implements neither `Serialize` nor `Deserialize` itself, so
//! each field picks its wire form explicitly:
//!
//! - [`as_text`]: the 8-character Crockford Base32 string
//! - [`as_integer`]: the non-negative 40-bit integer as an `i64`
//!
//! ```
//! use minuteid::Identifier;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "minuteid::serde::as_text")]
//!     id: Identifier,
//!     #[serde(with = "minuteid::serde::as_integer")]
//!     parent: Identifier,
//! }
//! ```

use crate::Identifier;
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes an [`Identifier`] as its 8-character text form.
pub mod as_text {
    use super::{Deserializer, Identifier, Serializer};

    /// Writes the canonical uppercase text form.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(id: &Identifier, s: S) -> Result<S::Ok, S::Error> {
        let buf = id.encode();
        let text = core::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        s.serialize_str(text)
    }

    /// Parses the text form, accepting any case and the `I`/`L`/`O` aliases.
    ///
    /// # Errors
    ///
    /// Fails on anything that is not a valid 8-character identifier.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Identifier, D::Error> {
        struct TextVisitor;

        impl serde::de::Visitor<'_> for TextVisitor {
            type Value = Identifier;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("an 8-character Crockford base32 string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Identifier::parse(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(TextVisitor)
    }
}

/// Serializes an [`Identifier`] as its integer form.
pub mod as_integer {
    use super::{Deserialize, Deserializer, Identifier, Serializer};

    /// Writes the packed value as an `i64`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(id: &Identifier, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(id.to_integer())
    }

    /// Reads an `i64`, rejecting negative values and values wider than 40
    /// bits.
    ///
    /// # Errors
    ///
    /// Fails if the number is out of range.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Identifier, D::Error> {
        let value = i64::deserialize(d)?;
        Identifier::from_integer(value).map_err(serde::de::Error::custom)
    }
}
