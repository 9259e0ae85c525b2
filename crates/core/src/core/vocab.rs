//! Vocabulary storage and lookup.
//!
//! This module provides the symbol -> byte string table built up during
//! training, and the table of special tokens that bypass BPE entirely.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Number of primitive single-byte symbols.
pub const BYTE_VOCAB_SIZE: usize = 256;

/// Symbol ID -> byte string.
///
/// Every entry is stored flat: a merged symbol's bytes are concatenated once
/// when the merge is defined, so lookups never recurse into the parents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Indexed by symbol ID
    tokens: Vec<Box<[u8]>>,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Create a vocabulary holding only the 256 byte symbols.
    pub fn byte_level() -> Self {
        let mut vocab = Self::new();
        vocab.initialize();
        vocab
    }

    /// Reset the vocabulary to the 256 single-byte symbols.
    pub fn initialize(&mut self) {
        self.tokens.clear();
        self.tokens.reserve(BYTE_VOCAB_SIZE);
        for byte in 0..=u8::MAX {
            self.tokens.push(Box::new([byte]));
        }
    }

    /// Define merged symbol `id` as the concatenation of `left` and `right`.
    ///
    /// `id` must be the next unassigned ID. Fails with `UnknownSymbol` if
    /// either operand is undefined.
    pub fn define_merge(&mut self, id: u32, left: u32, right: u32) -> Result<()> {
        if id as usize != self.tokens.len() {
            return Err(TokenizerError::InvalidMerge(format!(
                "symbol {} defined out of order (expected {})",
                id,
                self.tokens.len()
            )));
        }

        let left = self.bytes_of(left)?;
        let right = self.bytes_of(right)?;
        let mut bytes = Vec::with_capacity(left.len() + right.len());
        bytes.extend_from_slice(left);
        bytes.extend_from_slice(right);

        self.tokens.push(bytes.into_boxed_slice());
        Ok(())
    }

    /// Get the byte string for a symbol.
    #[inline]
    pub fn bytes_of(&self, id: u32) -> Result<&[u8]> {
        self.get(id).ok_or(TokenizerError::UnknownSymbol(id))
    }

    /// Get the byte string for a symbol, if defined.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&[u8]> {
        self.tokens.get(id as usize).map(|bytes| &bytes[..])
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Bidirectional table of special tokens.
///
/// Special tokens are literal strings with reserved IDs outside the trained
/// range. Training never produces them.
#[derive(Debug, Clone, Default)]
pub struct SpecialTokens {
    /// Literal -> ID
    by_literal: AHashMap<CompactString, u32>,
    /// ID -> literal
    by_id: AHashMap<u32, CompactString>,
}

impl SpecialTokens {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(literal, id)` pairs.
    pub fn from_pairs<S: AsRef<str>>(pairs: impl IntoIterator<Item = (S, u32)>) -> Result<Self> {
        let mut special = Self::new();
        for (literal, id) in pairs {
            special.insert(literal.as_ref(), id)?;
        }
        Ok(special)
    }

    /// Register a special token.
    ///
    /// Literals must be non-empty, and neither the literal nor the ID may
    /// already be registered.
    pub fn insert(&mut self, literal: &str, id: u32) -> Result<()> {
        if literal.is_empty() {
            return Err(TokenizerError::InvalidConfig(
                "special token literal must not be empty".to_string(),
            ));
        }
        if self.by_literal.contains_key(literal) {
            return Err(TokenizerError::InvalidConfig(format!(
                "special token {:?} registered twice",
                literal
            )));
        }
        if let Some(existing) = self.by_id.get(&id) {
            return Err(TokenizerError::InvalidConfig(format!(
                "special token id {} already used by {:?}",
                id, existing
            )));
        }

        let literal = CompactString::new(literal);
        self.by_id.insert(id, literal.clone());
        self.by_literal.insert(literal, id);
        Ok(())
    }

    /// Check that no special ID falls inside `0..trained_size`.
    pub fn validate(&self, trained_size: usize) -> Result<()> {
        let mut colliding: Vec<u32> = self
            .by_id
            .keys()
            .copied()
            .filter(|&id| (id as usize) < trained_size)
            .collect();
        colliding.sort_unstable();

        match colliding.first() {
            None => Ok(()),
            Some(&id) => Err(TokenizerError::InvalidConfig(format!(
                "special token {:?} uses id {} inside the trained range 0..{}",
                self.by_id[&id], id, trained_size
            ))),
        }
    }

    /// Get the reserved ID of a literal.
    #[inline]
    pub fn get_id(&self, literal: &str) -> Option<u32> {
        self.by_literal.get(literal).copied()
    }

    /// Get the literal registered for an ID.
    #[inline]
    pub fn get_literal(&self, id: u32) -> Option<&str> {
        self.by_id.get(&id).map(|s| s.as_str())
    }

    /// Iterate over `(literal, id)` in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .by_id
            .iter()
            .map(|(&id, literal)| (literal.as_str(), id))
            .collect();
        entries.sort_unstable_by_key(|&(_, id)| id);
        entries.into_iter()
    }

    /// Number of registered special tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if no special tokens are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
