//! bytemerge-tokenizer - High-level tokenizer API
//!
//! This crate provides a user-friendly interface for byte-level BPE
//! tokenization, integrating all components (vocabulary, merge rules,
//! pre-tokenization, special tokens) into a single API.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration and training
//! - GPT-2 and GPT-4 style pre-tokenization, or none at all
//! - Special tokens with reserved IDs outside the trained range
//! - Saving and loading as `tokenizer.json` or a bare `merges.txt`
//!
//! # Example
//!
//! ```rust
//! use bytemerge_tokenizer::Tokenizer;
//!
//! let tokenizer = Tokenizer::builder()
//!     .vocab_size(260)
//!     .special_token("<|endoftext|>", 100_000)
//!     .train("hello hello hello world world")?;
//!
//! let ids = tokenizer.encode("hello world<|endoftext|>", true)?;
//! assert_eq!(ids.last(), Some(&100_000));
//!
//! let text = tokenizer.decode(&ids, true)?;
//! assert_eq!(text, "hello world<|endoftext|>");
//! # Ok::<(), bytemerge_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytemerge_core::{BpeModel, MergeRule, MergeRules, Result, SpecialTokens, TokenizerError};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO/Serialization
pub mod io;
pub use io::{ModelFormat, TokenizerLoader, TokenizerSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{
    Segment, SpecialSplitter, SplitPattern, Splitter, GPT2_SPLIT_PATTERN, GPT4_SPLIT_PATTERN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
