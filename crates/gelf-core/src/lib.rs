//! GELF core: the message model and its wire codec.
//!
//! This crate defines the GELF record and the JSON encoding shared by
//! producers, the normalizer tool, and test tooling. It carries no transport
//! or runtime dependencies; sending, compressing, and chunking the encoded
//! bytes is the caller's business.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GelfError`/`Result` so a malformed
//! record never takes the host process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod codec;
pub mod error;
pub mod message;

/// Shared result type.
pub use error::{ErrorKind, GelfError, Result};

pub use codec::{decode, decode_with, encode, encode_to_vec, DecodeOptions, UnknownFields};
pub use message::{Level, Message, GELF_VERSION};
