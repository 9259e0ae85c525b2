//! Serialization and deserialization for BPE models.
//!
//! This module provides functionality for saving and loading trained tokenizers
//! as a full `tokenizer.json` or as a bare `merges.txt` table.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, SerializedTokenizer, FORMAT_VERSION};
pub use load::{LoadedTokenizer, TokenizerLoader};
pub use save::TokenizerSaver;
