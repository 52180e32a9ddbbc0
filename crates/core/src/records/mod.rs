//! Document records with a validating decode step.
//!
//! The document store hands back loosely shaped JSON; every record type in
//! this module decodes from a raw `serde_json::Value` at the data-access
//! boundary instead of trusting the shape implicitly. Decoding either
//! migrates a lenient field (defaults, legacy shapes) or rejects the
//! document with a [`DecodeError`].
//!
//! Encoding is the inverse: `fields()` produces the JSON object written back
//! to the store (never including the document id - the store owns ids).

mod category;
mod image;
mod order;
mod product;
mod search_term;

pub use category::Category;
pub use image::ImageRef;
pub use order::{Order, OrderLine};
pub use product::Product;
pub use search_term::PopularSearch;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use thiserror::Error;

/// Errors produced while decoding a raw document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document body is not a JSON object.
    #[error("document is not a JSON object")]
    NotAnObject,

    /// A required field is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but cannot be interpreted.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

// =============================================================================
// Field helpers shared by the record decoders
// =============================================================================

fn object<'a>(
    doc: &'a Value,
) -> Result<&'a serde_json::Map<String, Value>, DecodeError> {
    doc.as_object().ok_or(DecodeError::NotAnObject)
}

/// Optional string field; non-string values decode as absent.
fn str_field(doc: &Value, field: &str) -> Option<String> {
    doc.get(field)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// Required, non-empty string field.
fn required_str(doc: &Value, field: &'static str) -> Result<String, DecodeError> {
    match str_field(doc, field) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(DecodeError::MissingField(field)),
    }
}

/// Decimal field accepting a JSON number or a numeric string.
///
/// Returns `Ok(None)` when absent or null; rejects any other shape.
fn decimal_field(doc: &Value, field: &'static str) -> Result<Option<Decimal>, DecodeError> {
    let Some(value) = doc.get(field) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => parse_decimal(&n.to_string())
            .map(Some)
            .ok_or_else(|| DecodeError::InvalidField {
                field,
                reason: format!("not a representable number: {n}"),
            }),
        Value::String(s) => parse_decimal(s)
            .map(Some)
            .ok_or_else(|| DecodeError::InvalidField {
                field,
                reason: format!("not a numeric string: {s:?}"),
            }),
        other => Err(DecodeError::InvalidField {
            field,
            reason: format!("expected number, got {other}"),
        }),
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    s.parse::<Decimal>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(Decimal::from_f64))
}

/// Boolean field; absent or non-boolean decodes as `None`.
fn bool_field(doc: &Value, field: &str) -> Option<bool> {
    doc.get(field).and_then(Value::as_bool)
}

/// Non-negative integer field, defaulting to 0; negative values clamp to 0.
fn count_field(doc: &Value, field: &str) -> u32 {
    doc.get(field)
        .and_then(Value::as_i64)
        .map_or(0, |n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
}

/// Signed rank field (display ordering), defaulting to 0.
fn rank_field(doc: &Value, field: &str) -> i64 {
    doc.get(field).and_then(Value::as_i64).unwrap_or(0)
}

/// Timestamp field stored as an RFC 3339 string.
///
/// Missing or unparseable timestamps decode to `None`; the filter pipeline
/// treats `None` as epoch 0 so such documents sort last under "newest".
fn timestamp_field(doc: &Value, field: &str) -> Option<DateTime<Utc>> {
    doc.get(field)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// String-array field; non-string elements are dropped.
fn string_array(doc: &Value, field: &str) -> Vec<String> {
    doc.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Encode a Decimal as a JSON number (whole rupees stay integers).
fn decimal_to_value(d: Decimal) -> Value {
    use rust_decimal::prelude::ToPrimitive;

    let n = d.normalize();
    if n.scale() == 0 {
        n.to_i64()
            .map_or_else(|| Value::String(n.to_string()), Value::from)
    } else {
        n.to_f64()
            .map_or_else(|| Value::String(n.to_string()), Value::from)
    }
}
