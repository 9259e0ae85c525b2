//! Core BPE algorithm implementation.
//!
//! This module contains the fundamental data structures and algorithms
//! for byte-pair encoding, independent of how text is pretokenized.

pub mod merges;
pub mod model;
pub mod pairs;
pub mod priority;
pub mod vocab;

pub use merges::{MergeMap, MergeRule, MergeRules, Pair};
pub use model::BpeModel;
pub use pairs::{count_pairs, merge_pair, PairCounts, PairStats, ScanPos};
pub use priority::MergeCandidate;
pub use vocab::{SpecialTokens, Vocabulary, BYTE_VOCAB_SIZE};
