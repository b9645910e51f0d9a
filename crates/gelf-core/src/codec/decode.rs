//! Wire JSON -> Message.

use serde_json::{Map, Number, Value};

use crate::error::{GelfError, Result};
use crate::message::Message;

use super::{DecodeOptions, UnknownFields};

/// Decode with the default options (unknown fields are rejected).
pub fn decode(data: &[u8]) -> Result<Message> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode a wire object into a `Message`.
///
/// Underscore-prefixed keys are stored in `extra` untouched. Fixed keys are
/// type-checked; the first mismatch aborts the whole decode.
pub fn decode_with(data: &[u8], opts: &DecodeOptions) -> Result<Message> {
    let fields: Map<String, Value> =
        serde_json::from_slice(data).map_err(GelfError::MalformedJson)?;

    let mut m = Message::default();
    for (key, value) in fields {
        if key.starts_with('_') {
            m.extra.insert(key, value);
            continue;
        }

        match key.as_str() {
            "version" => m.version = string_field("version", value)?,
            "host" => m.host = string_field("host", value)?,
            "short_message" => m.short = string_field("short_message", value)?,
            "full_message" => m.full = string_field("full_message", value)?,
            "facility" => m.facility = string_field("facility", value)?,
            "timestamp" => m.time_unix = timestamp_field(&value)?,
            "level" => m.level = level_field(&value)?,
            other => match opts.unknown_fields {
                UnknownFields::Reject => return Err(GelfError::UnknownField(other.to_string())),
                UnknownFields::Ignore => {
                    tracing::trace!(field = other, "unknown gelf field dropped");
                }
            },
        }
    }
    Ok(m)
}

fn string_field(field: &'static str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(GelfError::InvalidField {
            field,
            expected: "string",
            actual: json_kind(&other),
        }),
    }
}

/// Integers are taken as-is; fractional seconds are truncated.
fn timestamp_field(value: &Value) -> Result<i64> {
    let n = number_field("timestamp", value)?;
    if let Some(v) = n.as_i64() {
        return Ok(v);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        _ => Err(GelfError::InvalidField {
            field: "timestamp",
            expected: "number in i64 range",
            actual: "number out of range",
        }),
    }
}

fn level_field(value: &Value) -> Result<i32> {
    let n = number_field("level", value)?;
    // saturating cast
    Ok(n.as_f64().map(|f| f as i32).unwrap_or_default())
}

fn number_field<'v>(field: &'static str, value: &'v Value) -> Result<&'v Number> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(GelfError::InvalidField {
            field,
            expected: "number",
            actual: json_kind(other),
        }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
