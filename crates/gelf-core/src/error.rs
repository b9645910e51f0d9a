//! Error type shared by the message model and the codec.

use thiserror::Error;

/// Stable error codes, suitable for counters and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The structural encoder could not represent a value.
    Serialization,
    /// An extension key collides with a fixed field or another extension.
    DuplicateField,
    /// The raw extension blob is not a JSON object.
    InvalidRawExtra,
    /// Input is not a JSON object.
    MalformedJson,
    /// A fixed field carries a value of the wrong JSON type.
    InvalidField,
    /// A non-underscore key that is not a GELF field.
    UnknownField,
}

impl ErrorKind {
    /// String representation used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Serialization => "SERIALIZATION",
            ErrorKind::DuplicateField => "DUPLICATE_FIELD",
            ErrorKind::InvalidRawExtra => "INVALID_RAW_EXTRA",
            ErrorKind::MalformedJson => "MALFORMED_JSON",
            ErrorKind::InvalidField => "INVALID_FIELD",
            ErrorKind::UnknownField => "UNKNOWN_FIELD",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GelfError>;

/// Unified error type for encode and decode.
#[derive(Debug, Error)]
pub enum GelfError {
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("duplicate field: {0}")]
    DuplicateField(String),
    #[error("raw extra must be a JSON object: {0}")]
    InvalidRawExtra(String),
    #[error("malformed json: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl GelfError {
    /// Map the error to its stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GelfError::Serialization(_) => ErrorKind::Serialization,
            GelfError::DuplicateField(_) => ErrorKind::DuplicateField,
            GelfError::InvalidRawExtra(_) => ErrorKind::InvalidRawExtra,
            GelfError::MalformedJson(_) => ErrorKind::MalformedJson,
            GelfError::InvalidField { .. } => ErrorKind::InvalidField,
            GelfError::UnknownField(_) => ErrorKind::UnknownField,
        }
    }
}
