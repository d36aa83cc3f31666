//! Serde helpers for opaque identifiers.
//!
//! The API is free to emit identifiers as JSON strings or integers. The client
//! never interprets them, so both forms are normalised to `String`.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct OpaqueIdVisitor;

impl<'de> Visitor<'de> for OpaqueIdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

/// Deserializes a string-or-integer identifier into a `String`.
pub fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OpaqueIdVisitor)
}
