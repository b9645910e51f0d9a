//! Top-level facade crate for the GELF codec.
//!
//! Re-exports the message model/codec and the normalizer library so users can
//! depend on a single crate.

pub mod core {
    pub use gelf_core::*;
}

pub mod tool {
    pub use gelf_tool::*;
}
