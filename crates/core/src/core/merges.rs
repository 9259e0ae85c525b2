//! Merge rule management for BPE.
//!
//! This module provides data structures for storing and accessing BPE merge rules.
//! Merge rules are stored using symbol IDs rather than byte strings for fast comparison.
//! A rule's rank is its mint order: the first learned rule has rank 0 and
//! defines symbol 256.

use crate::core::vocab::BYTE_VOCAB_SIZE;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// A pair of adjacent symbol IDs that can be merged.
pub type Pair = (u32, u32);

/// Merge rule mapping: pair -> (rank, new_symbol_id).
///
/// The rank indicates the priority of this merge rule (lower rank = higher priority).
pub type MergeMap = AHashMap<Pair, (u32, u32)>;

/// A single learned merge: `pair.0` followed by `pair.1` collapses into `new_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRule {
    /// The adjacent pair being collapsed
    pub pair: Pair,
    /// The symbol minted for this pair
    pub new_id: u32,
}

impl MergeRule {
    /// Create a new merge rule.
    pub fn new(pair: Pair, new_id: u32) -> Self {
        Self { pair, new_id }
    }
}

/// Ordered collection of BPE merge rules with O(1) pair lookup.
///
/// Rules are append-only. Rule `i` always defines symbol `256 + i`.
#[derive(Debug, Clone, Default)]
pub struct MergeRules {
    /// Rules in mint order
    ordered: Vec<MergeRule>,
    /// Pair -> (rank, new_id)
    merges: MergeMap,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbol ID the next rule will mint.
    #[inline]
    pub fn next_id(&self) -> u32 {
        (BYTE_VOCAB_SIZE + self.ordered.len()) as u32
    }

    /// Append a merge rule for `pair`, minting the next symbol ID.
    ///
    /// Fails with `InvalidMerge` if the pair already has a rule.
    pub fn add_merge(&mut self, pair: Pair) -> Result<MergeRule> {
        let rule = MergeRule::new(pair, self.next_id());
        self.push(rule)?;
        Ok(rule)
    }

    /// Check that `rule` continues the mint order and defines a new pair.
    pub fn check(&self, rule: &MergeRule) -> Result<()> {
        if rule.new_id != self.next_id() {
            return Err(TokenizerError::InvalidMerge(format!(
                "rule {:?} -> {} is out of order (expected id {})",
                rule.pair,
                rule.new_id,
                self.next_id()
            )));
        }
        if self.merges.contains_key(&rule.pair) {
            return Err(TokenizerError::InvalidMerge(format!(
                "pair {:?} is already defined",
                rule.pair
            )));
        }
        Ok(())
    }

    /// Append an existing rule, checking that it continues the mint order.
    pub fn push(&mut self, rule: MergeRule) -> Result<()> {
        self.check(&rule)?;

        let rank = self.ordered.len() as u32;
        self.merges.insert(rule.pair, (rank, rule.new_id));
        self.ordered.push(rule);
        Ok(())
    }

    /// Get the merge rule for a pair.
    ///
    /// Returns Some((rank, new_id)) if this pair should be merged,
    /// None otherwise.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<(u32, u32)> {
        self.merges.get(&pair).copied()
    }

    /// Rules in mint order.
    #[inline]
    pub fn rules(&self) -> &[MergeRule] {
        &self.ordered
    }

    /// Iterate over the rules in mint order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeRule> {
        self.ordered.iter()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Rebuild merge rules from rules listed in mint order.
    pub fn from_rules(rules: impl IntoIterator<Item = MergeRule>) -> Result<Self> {
        let mut merges = Self::new();
        for rule in rules {
            merges.push(rule)?;
        }
        Ok(merges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merge() {
        let mut rules = MergeRules::new();
        let first = rules.add_merge((97, 97)).unwrap();
        let second = rules.add_merge((256, 98)).unwrap();

        assert_eq!(first.new_id, 256);
        assert_eq!(second.new_id, 257);
        assert_eq!(rules.get((97, 97)), Some((0, 256)));
        assert_eq!(rules.get((256, 98)), Some((1, 257)));
        assert_eq!(rules.get((98, 99)), None);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let mut rules = MergeRules::new();
        rules.add_merge((1, 2)).unwrap();

        let err = rules.add_merge((1, 2)).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_out_of_order_rule_rejected() {
        let mut rules = MergeRules::new();
        let err = rules.push(MergeRule::new((1, 2), 300)).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_from_rules_keeps_order() {
        let rules = MergeRules::from_rules(vec![
            MergeRule::new((0, 1), 256),
            MergeRule::new((256, 2), 257),
        ])
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[1], MergeRule::new((256, 2), 257));
        assert_eq!(rules.next_id(), 258);
    }
}
