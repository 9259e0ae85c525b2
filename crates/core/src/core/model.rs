//! The trained BPE model: merge rules plus the vocabulary they define.

use crate::core::merges::{MergeRule, MergeRules, Pair};
use crate::core::vocab::{Vocabulary, BYTE_VOCAB_SIZE};
use crate::error::Result;

/// Merge rules and vocabulary, kept in lockstep.
///
/// `vocab.len() == 256 + merges.len()` holds for every value of this type.
/// A model is grown only by [`BpeModel::push_merge`] and is read-only once
/// training hands it over.
#[derive(Debug, Clone)]
pub struct BpeModel {
    vocab: Vocabulary,
    merges: MergeRules,
}

impl BpeModel {
    /// A model with the 256 byte symbols and no merges.
    pub fn byte_level() -> Self {
        Self {
            vocab: Vocabulary::byte_level(),
            merges: MergeRules::new(),
        }
    }

    /// Mint the next symbol for `pair` and define its bytes.
    ///
    /// Returns the new symbol ID.
    pub fn push_merge(&mut self, pair: Pair) -> Result<u32> {
        let rule = MergeRule::new(pair, self.merges.next_id());
        self.push_rule(rule)?;
        Ok(rule.new_id)
    }

    fn push_rule(&mut self, rule: MergeRule) -> Result<()> {
        // Neither table is touched unless both accept the rule.
        self.merges.check(&rule)?;
        self.vocab.define_merge(rule.new_id, rule.pair.0, rule.pair.1)?;
        self.merges.push(rule)
    }

    /// Rebuild a model by replaying rules listed in mint order.
    pub fn from_rules(rules: impl IntoIterator<Item = MergeRule>) -> Result<Self> {
        let mut model = Self::byte_level();
        for rule in rules {
            model.push_rule(rule)?;
        }
        Ok(model)
    }

    /// Rebuild a model from pairs listed in mint order; IDs are implied.
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Result<Self> {
        let mut model = Self::byte_level();
        for pair in pairs {
            model.push_merge(pair)?;
        }
        Ok(model)
    }

    /// The vocabulary.
    #[inline]
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The merge rules.
    #[inline]
    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Total number of symbols: 256 bytes plus one per merge.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Number of learned merges.
    #[inline]
    pub fn num_merges(&self) -> usize {
        self.vocab.len() - BYTE_VOCAB_SIZE
    }
}

impl Default for BpeModel {
    fn default() -> Self {
        Self::byte_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenizerError;

    #[test]
    fn test_push_merge_keeps_tables_in_step() {
        let mut model = BpeModel::byte_level();
        let aa = model.push_merge((97, 97)).unwrap();
        let aab = model.push_merge((aa, 98)).unwrap();

        assert_eq!((aa, aab), (256, 257));
        assert_eq!(model.vocab_size(), 258);
        assert_eq!(model.num_merges(), 2);
        assert_eq!(model.merges().len(), 2);
        assert_eq!(model.vocab().bytes_of(aab).unwrap(), b"aab");
    }

    #[test]
    fn test_duplicate_pair_leaves_model_untouched() {
        let mut model = BpeModel::byte_level();
        model.push_merge((97, 97)).unwrap();

        let err = model.push_merge((97, 97)).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
        assert_eq!(model.vocab_size(), 257);
        assert_eq!(model.merges().len(), 1);
    }

    #[test]
    fn test_unknown_operand() {
        let mut model = BpeModel::byte_level();
        let err = model.push_merge((97, 400)).unwrap_err();
        assert!(matches!(err, TokenizerError::UnknownSymbol(400)));
        assert_eq!(model.vocab_size(), 256);
    }

    #[test]
    fn test_from_rules_replays() {
        let model = BpeModel::from_rules(vec![
            MergeRule::new((104, 105), 256),
            MergeRule::new((256, 33), 257),
        ])
        .unwrap();

        assert_eq!(model.vocab().bytes_of(257).unwrap(), b"hi!");
        assert_eq!(model.merges().get((256, 33)), Some((1, 257)));
    }

    #[test]
    fn test_from_rules_rejects_gaps() {
        let err = BpeModel::from_rules(vec![MergeRule::new((1, 2), 257)]).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
    }
}
