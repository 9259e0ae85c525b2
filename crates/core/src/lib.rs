//! Bytemerge-core - Core BPE algorithm implementation
//!
//! This crate provides the fundamental data structures and algorithms for
//! byte-pair encoding (BPE), independent of pretokenization and training.
//!
//! # Features
//!
//! - Pair counting and non-overlapping pair replacement
//! - Append-only merge rules with rank lookups
//! - Flat symbol -> bytes vocabulary (no recursive resolution at decode time)
//! - Special-token table with reserved IDs
//! - Byte-level encoder/decoder with lossy UTF-8 reconstruction
//!
//! # Example
//!
//! ```rust
//! use bytemerge_core::{BpeModel, ByteLevelEncoder};
//!
//! let mut model = BpeModel::byte_level();
//! let aa = model.push_merge((b'a' as u32, b'a' as u32))?;
//!
//! let encoder = ByteLevelEncoder::new(model);
//! let ids = encoder.encode_chunk(b"aab");
//! assert_eq!(ids, vec![aa, b'b' as u32]);
//! assert_eq!(encoder.decode(&ids, None)?, "aab");
//! # Ok::<(), bytemerge_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use self::core::{
    count_pairs, merge_pair, BpeModel, MergeCandidate, MergeMap, MergeRule, MergeRules, Pair,
    PairCounts, PairStats, ScanPos, SpecialTokens, Vocabulary, BYTE_VOCAB_SIZE,
};

// Encoding modes
pub mod encoding;
pub use encoding::ByteLevelEncoder;
