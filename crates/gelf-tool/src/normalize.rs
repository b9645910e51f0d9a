//! Record normalizer.
//!
//! Each input line is one GELF JSON record. A record is decoded with the
//! configured options, missing `host`/`facility` are filled from the config
//! defaults, and the result is re-encoded in canonical key order. Bad records
//! are skipped and counted; only I/O failures stop the stream.

use std::collections::BTreeMap;

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use gelf_core::{decode_with, encode, DecodeOptions, Message};

use crate::config::{NormalizeSection, ToolConfig};
use crate::error::{Result, ToolError};

/// Counters reported once the input is exhausted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub processed: u64,
    pub skipped: u64,
    /// Skip count per error code.
    pub skipped_by_code: BTreeMap<&'static str, u64>,
}

impl Summary {
    fn record_skip(&mut self, code: &'static str) {
        self.skipped += 1;
        *self.skipped_by_code.entry(code).or_insert(0) += 1;
    }
}

pub struct Normalizer {
    decode: DecodeOptions,
    defaults: NormalizeSection,
}

impl Normalizer {
    pub fn new(cfg: ToolConfig) -> Self {
        Self {
            decode: cfg.decode,
            defaults: cfg.normalize,
        }
    }

    /// Normalize one record and append it, newline-terminated, to `buf`.
    ///
    /// On error `buf` is left as it was.
    pub fn normalize_record(&self, record: &[u8], buf: &mut BytesMut) -> Result<()> {
        if record.len() > self.defaults.max_record_bytes {
            return Err(ToolError::RecordTooLarge {
                size: record.len(),
                limit: self.defaults.max_record_bytes,
            });
        }

        let mut msg = decode_with(record, &self.decode)?;
        self.apply_defaults(&mut msg);

        let start = buf.len();
        if let Err(e) = encode(&msg, buf) {
            buf.truncate(start);
            return Err(e.into());
        }
        buf.put_u8(b'\n');
        Ok(())
    }

    fn apply_defaults(&self, msg: &mut Message) {
        if msg.host.is_empty() {
            if let Some(host) = &self.defaults.default_host {
                msg.host.clone_from(host);
            }
        }
        if msg.facility.is_empty() {
            if let Some(facility) = &self.defaults.default_facility {
                msg.facility.clone_from(facility);
            }
        }
    }

    /// Drive the normalizer over a whole stream.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<Summary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let limit = self.defaults.max_record_bytes;
        let mut line = Vec::with_capacity(1024);
        let mut out = BytesMut::with_capacity(4096);
        let mut summary = Summary::default();
        let mut line_no: u64 = 0;

        while let Some(size) = read_line_bounded(&mut reader, &mut line, limit).await? {
            line_no += 1;

            let result = if size > limit {
                Err(ToolError::RecordTooLarge { size, limit })
            } else {
                let record = line.trim_ascii();
                if record.is_empty() {
                    continue;
                }
                out.clear();
                self.normalize_record(record, &mut out)
            };

            match result {
                Ok(()) => {
                    writer.write_all(&out).await?;
                    summary.processed += 1;
                }
                Err(e) => {
                    let code = e.code();
                    warn!(line = line_no, code, error = %e, "record skipped");
                    summary.record_skip(code);
                }
            }
        }

        writer.flush().await?;
        debug!(lines = line_no, "input exhausted");
        Ok(summary)
    }
}

/// Read one line into `line` (without its `\n`), storing at most `limit`
/// bytes. Returns the full line length, which exceeds `limit` when the rest
/// of the line was discarded, or `None` at end of input.
async fn read_line_bounded<R>(
    reader: &mut R,
    line: &mut Vec<u8>,
    limit: usize,
) -> std::io::Result<Option<usize>>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();
    let mut size = 0usize;
    let mut read_any = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }
        read_any = true;

        let (content, used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(i) => (&available[..i], i + 1, true),
            None => (available, available.len(), false),
        };
        size = size.saturating_add(content.len());
        if size <= limit {
            line.extend_from_slice(content);
        } else if !line.is_empty() {
            line.clear();
        }
        reader.consume(used);

        if done {
            break;
        }
    }

    Ok(read_any.then_some(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(host: Option<&str>) -> Normalizer {
        let mut cfg = ToolConfig::default();
        cfg.normalize.default_host = host.map(str::to_string);
        Normalizer::new(cfg)
    }

    #[test]
    fn fills_missing_host() {
        let n = normalizer(Some("edge-1"));
        let mut buf = BytesMut::new();
        n.normalize_record(br#"{"short_message":"x","timestamp":5}"#, &mut buf)
            .unwrap();
        assert_eq!(
            &buf[..],
            b"{\"version\":\"1.1\",\"host\":\"edge-1\",\"short_message\":\"x\",\"timestamp\":5}\n"
        );
    }

    #[test]
    fn keeps_existing_host() {
        let n = normalizer(Some("edge-1"));
        let mut buf = BytesMut::new();
        n.normalize_record(br#"{"host":"db-2","short_message":"x","timestamp":5}"#, &mut buf)
            .unwrap();
        assert!(buf.starts_with(b"{\"version\":\"1.1\",\"host\":\"db-2\""));
    }

    #[test]
    fn failure_leaves_buffer_untouched() {
        let n = normalizer(None);
        let mut buf = BytesMut::from(&b"kept\n"[..]);
        let err = n.normalize_record(br#"{"nope":1}"#, &mut buf).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_FIELD");
        assert_eq!(&buf[..], b"kept\n");
    }

    #[test]
    fn oversized_record_is_rejected() {
        let n = normalizer(None);
        let big = vec![b' '; n.defaults.max_record_bytes + 1];
        let err = n.normalize_record(&big, &mut BytesMut::new()).unwrap_err();
        assert_eq!(err.code(), "RECORD_TOO_LARGE");
    }

    #[tokio::test]
    async fn oversized_line_is_not_buffered() {
        let limit = 1024;
        let mut input = vec![b'x'; 4 * 1024 * 1024];
        input.extend_from_slice(b"\n{\"short_message\":\"after\",\"timestamp\":1}\n");

        let mut reader = tokio::io::BufReader::with_capacity(512, &input[..]);
        let mut line = Vec::new();

        let size = read_line_bounded(&mut reader, &mut line, limit).await.unwrap();
        assert_eq!(size, Some(4 * 1024 * 1024));
        assert!(line.is_empty());
        assert!(line.capacity() <= 4 * limit, "capacity {}", line.capacity());

        let size = read_line_bounded(&mut reader, &mut line, limit).await.unwrap();
        assert_eq!(size, Some(line.len()));
        assert!(line.starts_with(b"{\"short_message\":\"after\""));

        assert_eq!(read_line_bounded(&mut reader, &mut line, limit).await.unwrap(), None);
    }

    #[tokio::test]
    async fn oversized_line_is_skipped_by_run() {
        let mut cfg = ToolConfig::default();
        cfg.normalize.max_record_bytes = 1024;
        let n = Normalizer::new(cfg);

        let mut input = vec![b'{'; 4 * 1024 * 1024];
        input.extend_from_slice(b"\n{\"short_message\":\"after\",\"timestamp\":1}");

        let mut out = Vec::new();
        let summary = n.run(&input[..], &mut out).await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.skipped_by_code.get("RECORD_TOO_LARGE"), Some(&1));
        assert!(out.starts_with(b"{\"version\":\"1.1\",\"short_message\":\"after\""));
    }
}
