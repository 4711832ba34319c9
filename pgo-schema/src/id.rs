//! Serde helpers for 64-bit node and annotation ids.
//!
//! Ids are accepted as JSON numbers, decimal strings, or `0x` hex strings.
//! Renderings of the request that keep 64-bit integers as strings and
//! hand-written fixtures that use the schema's hex notation both load.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;
use std::num::ParseIntError;

/// Parses an id from a decimal or `0x`-prefixed hex string.
///
/// # Errors
/// Returns `ParseIntError` if the string is not a valid 64-bit id.
pub fn parse_id(s: &str) -> Result<u64, ParseIntError> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

/// Deserializes an id from a number or a string.
///
/// # Errors
/// Returns the deserializer's error for negative numbers or malformed strings.
pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdVisitor)
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a 64-bit id as a number or a decimal/hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative id {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        parse_id(v).map_err(|e| E::custom(format!("invalid id '{v}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize")]
        id: u64,
    }

    #[test]
    fn test_parse_id_hex_and_decimal() {
        assert_eq!(parse_id("0xbea97f1023792be0"), Ok(0xbea97f1023792be0));
        assert_eq!(parse_id("0XFF"), Ok(255));
        assert_eq!(parse_id("42"), Ok(42));
        assert!(parse_id("0xZZ").is_err());
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let h: Holder = serde_json::from_str(r#"{"id": 7}"#).expect("number id");
        assert_eq!(h.id, 7);

        let h: Holder = serde_json::from_str(r#"{"id": "0x10"}"#).expect("hex id");
        assert_eq!(h.id, 16);

        let h: Holder =
            serde_json::from_str(r#"{"id": "18446744073709551615"}"#).expect("decimal id");
        assert_eq!(h.id, u64::MAX);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"id": -1}"#);
        assert!(result.is_err());
    }
}
