//! Message -> wire JSON.

use std::collections::BTreeMap;

use bytes::{BufMut, BytesMut};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::value::RawValue;

use crate::error::{GelfError, Result};
use crate::message::{Message, GELF_VERSION};

use super::FIXED_FIELDS;

/// Append the wire form of `msg` to `buf` and return the buffer contents.
///
/// Existing bytes in `buf` are kept. Collisions and a malformed `raw_extra`
/// are detected before anything is written; if the serializer itself fails,
/// the bytes written so far stay in `buf` and the caller should truncate it.
pub fn encode<'a>(msg: &Message, buf: &'a mut BytesMut) -> Result<&'a [u8]> {
    let raw = raw_entries(msg)?;
    check_collisions(msg, &raw)?;

    let start = buf.len();
    let wire = WireMessage { msg, raw: &raw };
    serde_json::to_writer((&mut *buf).writer(), &wire).map_err(GelfError::Serialization)?;

    tracing::trace!(
        bytes = buf.len() - start,
        extra = msg.extra.len(),
        raw_extra = raw.len(),
        "gelf message encoded"
    );
    Ok(&buf[..])
}

/// Encode into a fresh buffer.
pub fn encode_to_vec(msg: &Message) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(256);
    encode(msg, &mut buf)?;
    Ok(buf.to_vec())
}

/// Entries of the raw blob, values kept as their original bytes.
fn raw_entries(msg: &Message) -> Result<BTreeMap<String, &RawValue>> {
    match msg.raw_extra.as_deref() {
        None => Ok(BTreeMap::new()),
        Some(raw) => serde_json::from_str(raw.get())
            .map_err(|e| GelfError::InvalidRawExtra(e.to_string())),
    }
}

fn check_collisions(msg: &Message, raw: &BTreeMap<String, &RawValue>) -> Result<()> {
    for key in msg.extra.keys() {
        if FIXED_FIELDS.contains(&key.as_str()) {
            return Err(GelfError::DuplicateField(key.clone()));
        }
    }
    for key in raw.keys() {
        if FIXED_FIELDS.contains(&key.as_str()) || msg.extra.contains_key(key) {
            return Err(GelfError::DuplicateField(key.clone()));
        }
    }
    Ok(())
}

struct WireMessage<'a> {
    msg: &'a Message,
    raw: &'a BTreeMap<String, &'a RawValue>,
}

impl Serialize for WireMessage<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let m = self.msg;
        let mut map = serializer.serialize_map(None)?;

        let version = if m.version.is_empty() {
            GELF_VERSION
        } else {
            m.version.as_str()
        };
        map.serialize_entry("version", version)?;
        if !m.host.is_empty() {
            map.serialize_entry("host", &m.host)?;
        }
        map.serialize_entry("short_message", &m.short)?;
        if !m.full.is_empty() {
            map.serialize_entry("full_message", &m.full)?;
        }
        map.serialize_entry("timestamp", &m.time_unix)?;
        if m.level != 0 {
            map.serialize_entry("level", &m.level)?;
        }
        if !m.facility.is_empty() {
            map.serialize_entry("facility", &m.facility)?;
        }

        for (k, v) in &m.extra {
            map.serialize_entry(k, v)?;
        }
        for (k, v) in self.raw {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
