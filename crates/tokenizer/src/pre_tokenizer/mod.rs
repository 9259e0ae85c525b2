//! Pre-tokenization pipeline.
//!
//! This module provides pre-tokenization operations that are applied
//! before BPE encoding: special-token extraction, then chunk splitting.

pub mod special;
pub mod split;

pub use special::{Segment, SpecialSplitter};
pub use split::{SplitPattern, Splitter, GPT2_SPLIT_PATTERN, GPT4_SPLIT_PATTERN};
