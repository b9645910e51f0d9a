//! GELF message model.
//!
//! A `Message` holds the fixed GELF fields plus two extension channels:
//! `extra` for typed values and `raw_extra` for an already-serialized JSON
//! object. Both are flattened next to the fixed fields by the codec.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::error::{GelfError, Result};

/// Protocol version stamped on constructed messages.
pub const GELF_VERSION: &str = "1.1";

/// Syslog severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Level {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Informational = 6,
    Debug = 7,
}

impl Level {
    /// Lowercase syslog name.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Emergency => "emergency",
            Level::Alert => "alert",
            Level::Critical => "critical",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Notice => "notice",
            Level::Informational => "informational",
            Level::Debug => "debug",
        }
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level as i32
    }
}

impl TryFrom<i32> for Level {
    type Error = i32;

    fn try_from(v: i32) -> std::result::Result<Self, i32> {
        Ok(match v {
            0 => Level::Emergency,
            1 => Level::Alert,
            2 => Level::Critical,
            3 => Level::Error,
            4 => Level::Warning,
            5 => Level::Notice,
            6 => Level::Informational,
            7 => Level::Debug,
            other => return Err(other),
        })
    }
}

/// A GELF record.
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// Protocol version. Encoded as `GELF_VERSION` when empty.
    pub version: String,
    /// Originating host; omitted on the wire when empty.
    pub host: String,
    /// Single-line summary (`short_message`).
    pub short: String,
    /// Complete body (`full_message`); omitted when empty.
    pub full: String,
    /// Seconds since the Unix epoch (`timestamp`).
    pub time_unix: i64,
    /// Syslog severity; zero is treated as unset and omitted.
    pub level: i32,
    /// Subsystem tag; omitted when empty.
    pub facility: String,
    /// Additional fields. Keys are expected to start with `_`.
    pub extra: Map<String, Value>,
    /// Additional fields supplied as a pre-encoded JSON object.
    pub raw_extra: Option<Box<RawValue>>,
}

impl Message {
    /// Minimal message stamped with the current time.
    pub fn new(short: impl Into<String>) -> Self {
        Self {
            version: GELF_VERSION.to_string(),
            short: short.into(),
            time_unix: unix_now(),
            ..Self::default()
        }
    }

    /// Build a message from raw log output, tagging it with its source
    /// location as `_file` / `_line`.
    pub fn from_raw(raw: &[u8], host: &str, facility: &str, file: &str, line: u32) -> Self {
        let text = String::from_utf8_lossy(raw);
        let (short, full) = split_short_full(text.trim());

        let mut extra = Map::new();
        extra.insert("_file".to_string(), Value::from(file));
        extra.insert("_line".to_string(), Value::from(line));

        Self {
            version: GELF_VERSION.to_string(),
            host: host.to_string(),
            short,
            full,
            time_unix: unix_now(),
            level: Level::Informational.into(),
            facility: facility.to_string(),
            extra,
            raw_extra: None,
        }
    }

    /// Build a message from a structured-logging front end.
    ///
    /// `version`, `host` and `facility` are left empty; the encoder stamps
    /// `GELF_VERSION` on the wire.
    pub fn from_string(message: &str, level: impl Into<i32>, extra: Map<String, Value>) -> Self {
        let (short, full) = split_short_full(message.trim());
        Self {
            short,
            full,
            time_unix: unix_now(),
            level: level.into(),
            extra,
            ..Self::default()
        }
    }

    /// Serialize `value` and store it as an additional field.
    pub fn insert_extra<T>(&mut self, key: impl Into<String>, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let v = serde_json::to_value(value).map_err(GelfError::Serialization)?;
        self.extra.insert(key.into(), v);
        Ok(())
    }

    /// Validate and store a pre-encoded JSON object of additional fields.
    pub fn set_raw_extra(&mut self, json: &str) -> Result<()> {
        if !json.trim_start().starts_with('{') {
            return Err(GelfError::InvalidRawExtra("expected '{'".into()));
        }
        let raw = RawValue::from_string(json.to_string())
            .map_err(|e| GelfError::InvalidRawExtra(e.to_string()))?;
        self.raw_extra = Some(raw);
        Ok(())
    }

    /// Typed view of `level`, if it is a valid syslog severity.
    pub fn severity(&self) -> Option<Level> {
        Level::try_from(self.level).ok()
    }
}

/// First line becomes the summary when a line break follows at least one
/// character; the whole text is then kept as the body.
fn split_short_full(text: &str) -> (String, String) {
    match text.find('\n') {
        Some(i) if i > 0 => (text[..i].to_string(), text.to_string()),
        _ => (text.to_string(), String::new()),
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
