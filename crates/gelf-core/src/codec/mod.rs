//! GELF wire codec (JSON).
//!
//! The wire form is a single flat object: the fixed GELF keys followed by
//! every additional field as a sibling. Encoding goes through an ordered
//! serde map serializer so extension entries land in the same object as the
//! fixed keys; decoding parses a JSON value tree and converts each fixed key
//! with an explicit type check.
//!
//! Neither direction logs failures; errors are returned to the caller.

mod decode;
mod encode;

use serde::Deserialize;

pub use decode::{decode, decode_with};
pub use encode::{encode, encode_to_vec};

/// Wire names of the fixed GELF fields, in encoding order.
pub const FIXED_FIELDS: [&str; 7] = [
    "version",
    "host",
    "short_message",
    "full_message",
    "timestamp",
    "level",
    "facility",
];

/// Treatment of non-underscore keys that are not GELF fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Fail the decode with `GelfError::UnknownField`.
    #[default]
    Reject,
    /// Drop the key and keep decoding.
    Ignore,
}

/// Decoder knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeOptions {
    #[serde(default)]
    pub unknown_fields: UnknownFields,
}
