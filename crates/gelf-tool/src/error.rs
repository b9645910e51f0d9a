use gelf_core::GelfError;
use thiserror::Error;

/// Errors raised by the normalizer and its config loader.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Config file is unreadable, malformed, or out of bounds
    #[error("invalid config: {0}")]
    Config(String),

    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),

    /// A single input record exceeds `normalize.max_record_bytes`
    #[error("record too large: {size} bytes exceeds limit of {limit}")]
    RecordTooLarge { size: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Gelf(#[from] GelfError),
}

impl ToolError {
    /// Stable code used in logs and skip summaries.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::Config(_) => "CONFIG",
            ToolError::UnsupportedVersion(_) => "UNSUPPORTED_VERSION",
            ToolError::RecordTooLarge { .. } => "RECORD_TOO_LARGE",
            ToolError::Io(_) => "IO",
            ToolError::Gelf(e) => e.kind().as_str(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
