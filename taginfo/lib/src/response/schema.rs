//! Value constraints checked after a payload has been parsed.
//!
//! `serde` enforces the structural part of a schema (field presence and
//! exact JSON types). The [`Validate`] trait covers the rest: ranges, minimum
//! lengths, finiteness. The deserializer helpers at the bottom implement the
//! few field-level conversions the taginfo API needs.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::SchemaViolation;
use crate::params::non_blank;

/// Constraints on a decoded value that the type system cannot express.
pub trait Validate {
    /// Checks every constraint, returning the first violation.
    ///
    /// ## Errors
    ///
    /// Returns a [`SchemaViolation`] naming the offending field.
    fn validate(&self) -> Result<(), SchemaViolation>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), SchemaViolation> {
        for (i, item) in self.iter().enumerate() {
            item.validate().map_err(|v| v.within(&format!("[{i}]")))?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for HashMap<String, T> {
    fn validate(&self) -> Result<(), SchemaViolation> {
        for (k, item) in self {
            item.validate().map_err(|v| v.within(&format!("[{k:?}]")))?;
        }
        Ok(())
    }
}

/// Requires at least one character.
pub fn non_empty(field: &str, value: &str) -> Result<(), SchemaViolation> {
    min_chars(field, value, 1)
}

/// Requires at least `min` characters.
pub fn min_chars(field: &str, value: &str, min: usize) -> Result<(), SchemaViolation> {
    if value.chars().count() < min {
        return Err(SchemaViolation::new(
            field,
            format!("must have at least {min} character(s)"),
        ));
    }
    Ok(())
}

/// Like [`non_empty`], but only when a value is present.
pub fn non_empty_opt(field: &str, value: Option<&str>) -> Result<(), SchemaViolation> {
    value.map_or(Ok(()), |v| non_empty(field, v))
}

/// Requires a finite number in `[0, 1]`.
pub fn fraction(field: &str, value: f64) -> Result<(), SchemaViolation> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(SchemaViolation::new(
            field,
            format!("{value} is not a finite fraction in [0, 1]"),
        ));
    }
    Ok(())
}

/// Requires a finite number greater than zero.
pub fn positive(field: &str, value: f64) -> Result<(), SchemaViolation> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SchemaViolation::new(
            field,
            format!("{value} is not a finite number > 0"),
        ));
    }
    Ok(())
}

/// Deserializes a boolean the API encodes as the integer `0` or `1`.
///
/// Any other value, including JSON booleans and numeric strings, is rejected.
pub fn int_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw.as_u64() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(serde::de::Error::custom(format!(
            "expected integer 0 or 1 for boolean, got {raw}"
        ))),
    }
}

/// Deserializes an ISO 8601 timestamp.
///
/// RFC 3339 timestamps keep their offset (converted to UTC); timestamps
/// without an offset are taken to be UTC already.
pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
}

/// Deserializes an optional string, treating empty-after-trim as absent.
///
/// Present values are returned trimmed.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(non_blank).map(str::to_string))
}

/// Deserializes an optional `http`/`https` URL, treating empty-after-trim as
/// absent.
pub fn optional_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = optional_text(deserializer)? else {
        return Ok(None);
    };
    let url = Url::parse(&text)
        .map_err(|e| serde::de::Error::custom(format!("invalid URL {text:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(serde::de::Error::custom(format!(
            "URL scheme must be http or https, got {text:?}"
        )));
    }
    Ok(Some(url))
}
