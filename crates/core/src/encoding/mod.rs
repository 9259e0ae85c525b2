//! Encoding modes for BPE tokenization.
//!
//! Only byte-level encoding is provided: text is treated as UTF-8 bytes, so
//! the 256 byte symbols cover every input.

pub mod byte_level;

pub use byte_level::ByteLevelEncoder;
