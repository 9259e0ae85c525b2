//! Format definitions for tokenizer serialization.
//!
//! This module defines the data structures used for saving/loading
//! tokenizers.

use crate::pre_tokenizer::SplitPattern;
use bytemerge_core::MergeRule;
use serde::{Deserialize, Serialize};

/// Current version of the `tokenizer.json` layout.
pub const FORMAT_VERSION: u32 = 1;

/// File name of the full JSON format.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// File name of the plain merge table.
pub const MERGES_FILE: &str = "merges.txt";

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// `tokenizer.json`: merges, split pattern and special tokens
    Json,
    /// `merges.txt`: one `left right` pair per line, in mint order
    MergesText,
}

impl ModelFormat {
    /// The file this format is stored in, relative to the model directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ModelFormat::Json => TOKENIZER_FILE,
            ModelFormat::MergesText => MERGES_FILE,
        }
    }
}

/// Merge rule for serialization, stored as `[left, right, id]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedMerge(pub u32, pub u32, pub u32);

impl From<MergeRule> for SerializedMerge {
    fn from(rule: MergeRule) -> Self {
        Self(rule.pair.0, rule.pair.1, rule.new_id)
    }
}

impl From<SerializedMerge> for MergeRule {
    fn from(merge: SerializedMerge) -> Self {
        MergeRule::new((merge.0, merge.1), merge.2)
    }
}

/// A special token in serialized format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedSpecialToken {
    pub literal: String,
    pub id: u32,
}

/// Complete tokenizer serialization format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedTokenizer {
    /// Format version
    pub version: u32,
    /// Pre-tokenization pattern
    pub split_pattern: SplitPattern,
    /// Merge rules, in mint order
    pub merges: Vec<SerializedMerge>,
    /// Special tokens, by ascending ID
    #[serde(default)]
    pub special_tokens: Vec<SerializedSpecialToken>,
}
