//! BPE trainer implementation.
//!
//! This module implements the core BPE training algorithm: count every
//! adjacent pair in the corpus, mint a symbol for the most frequent one,
//! rewrite the corpus with it, and repeat until the target vocabulary size.

use super::counter::PairCounter;
use bytemerge_core::{BpeModel, Result, TokenizerError, BYTE_VOCAB_SIZE};
use log::{debug, info};

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Target vocabulary size, byte symbols included
    pub vocab_size: usize,
    /// Whether to use parallel processing
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 512,
            parallel: true,
        }
    }
}

impl TrainingConfig {
    /// Check that the target vocabulary leaves room for at least one merge.
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size <= BYTE_VOCAB_SIZE {
            return Err(TokenizerError::InvalidConfig(format!(
                "vocab_size must be greater than {} (got {})",
                BYTE_VOCAB_SIZE, self.vocab_size
            )));
        }
        if self.vocab_size > u32::MAX as usize {
            return Err(TokenizerError::InvalidConfig(format!(
                "vocab_size {} does not fit in a u32 symbol id",
                self.vocab_size
            )));
        }
        Ok(())
    }

    /// Number of merges needed to reach the target size.
    pub fn num_merges(&self) -> usize {
        self.vocab_size.saturating_sub(BYTE_VOCAB_SIZE)
    }
}

/// BPE trainer.
///
/// Trains a BPE model from byte sequences by iteratively merging the most
/// frequent adjacent pair. Ties between equally frequent pairs go to the pair
/// that occurs first in corpus order.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer with default configuration.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on one unbroken byte sequence.
    pub fn train_bytes(&self, data: &[u8]) -> Result<BpeModel> {
        self.train_chunks(std::iter::once(data))
    }

    /// Train on pretokenized chunks; no merge crosses a chunk boundary.
    pub fn train_chunks<I, C>(&self, chunks: I) -> Result<BpeModel>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let mut counter = PairCounter::new();
        for chunk in chunks {
            counter.add_chunk(chunk.as_ref());
        }
        self.train_counter(counter)
    }

    /// Train on a prepared corpus arena.
    ///
    /// # Returns
    /// The trained model, with exactly `vocab_size` symbols. Fails with
    /// `InsufficientData` (and no partial model) if the corpus runs out of
    /// pairs first.
    pub fn train_counter(&self, mut counter: PairCounter) -> Result<BpeModel> {
        self.config.validate()?;

        let num_merges = self.config.num_merges();
        let parallel = self.config.parallel;
        info!(
            "Starting BPE training: {} merges over {} sequences ({} symbols)",
            num_merges,
            counter.len(),
            counter.total_symbols()
        );

        let mut model = BpeModel::byte_level();
        let mut last_log_percent = 0;

        for learned in 0..num_merges {
            let counts = counter.count_pairs(parallel);
            let Some(best) = counts.most_frequent() else {
                return Err(TokenizerError::InsufficientData {
                    learned,
                    requested: num_merges,
                });
            };

            let new_id = model.push_merge(best.pair)?;
            counter.merge_pair_in_sequences(best.pair, new_id, parallel);
            debug!("{:?} -> {} (count {})", best.pair, new_id, best.count);

            let percent = (learned + 1) * 100 / num_merges;
            if percent > last_log_percent {
                info!(
                    "Progress: {}% ({}/{} merges)",
                    percent,
                    learned + 1,
                    num_merges
                );
                last_log_percent = percent;
            }
        }

        info!(
            "Finished training: {} merges, {} symbols left in corpus",
            model.num_merges(),
            counter.total_symbols()
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemerge_core::MergeRule;

    const A: u32 = b'a' as u32;
    const B: u32 = b'b' as u32;

    fn rules(model: &BpeModel) -> Vec<MergeRule> {
        model.merges().rules().to_vec()
    }

    #[test]
    fn test_reference_corpus() {
        let trainer = BpeTrainer::with_vocab_size(258);
        let model = trainer.train_bytes(b"aaabdaaabac").unwrap();

        // (a,a) occurs 4 times. Afterwards (256,a) and (a,b) tie at 2 and
        // (256,a) occurs first.
        assert_eq!(
            rules(&model),
            vec![MergeRule::new((A, A), 256), MergeRule::new((256, A), 257)]
        );
        assert_eq!(model.vocab().bytes_of(257).unwrap(), b"aaa");
    }

    #[test]
    fn test_vocab_size_is_exact() {
        let trainer = BpeTrainer::with_vocab_size(300);
        let text = (0..400)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let model = trainer.train_bytes(text.as_bytes()).unwrap();

        assert_eq!(model.vocab_size(), 300);
        assert_eq!(model.merges().len(), 44);
    }

    #[test]
    fn test_invalid_vocab_size() {
        for vocab_size in [0, 100, 256] {
            let trainer = BpeTrainer::with_vocab_size(vocab_size);
            let err = trainer.train_bytes(b"hello").unwrap_err();
            assert!(matches!(err, TokenizerError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_insufficient_data() {
        let trainer = BpeTrainer::with_vocab_size(258);
        let err = trainer.train_bytes(b"ab").unwrap_err();

        assert!(matches!(
            err,
            TokenizerError::InsufficientData {
                learned: 1,
                requested: 2
            }
        ));
    }

    #[test]
    fn test_empty_corpus() {
        let trainer = BpeTrainer::with_vocab_size(257);
        let err = trainer.train_chunks(Vec::<&[u8]>::new()).unwrap_err();
        assert!(matches!(
            err,
            TokenizerError::InsufficientData { learned: 0, .. }
        ));
    }

    #[test]
    fn test_chunks_block_cross_boundary_pairs() {
        // "o" + " " straddles every chunk boundary but never lies inside one.
        let trainer = BpeTrainer::with_vocab_size(257);
        let model = trainer
            .train_chunks(["go", " to", "go", " to", "go", " to"])
            .unwrap();

        let (left, right) = model.merges().rules()[0].pair;
        assert_ne!((left, right), (b'o' as u32, b' ' as u32));
        assert_eq!((left, right), (b'g' as u32, b'o' as u32));
    }

    #[test]
    fn test_deterministic() {
        let text = "low lower lowest newer newest wider ".repeat(10);
        let first = BpeTrainer::with_vocab_size(265)
            .train_bytes(text.as_bytes())
            .unwrap();
        let second = BpeTrainer::with_vocab_size(265)
            .train_bytes(text.as_bytes())
            .unwrap();

        assert_eq!(rules(&first), rules(&second));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let chunks: Vec<String> = "one two three two one three three two one four"
            .split(' ')
            .map(|w| format!(" {}", w))
            .collect();

        let sequential = BpeTrainer::new(TrainingConfig {
            vocab_size: 262,
            parallel: false,
        })
        .train_chunks(&chunks)
        .unwrap();
        let parallel = BpeTrainer::new(TrainingConfig {
            vocab_size: 262,
            parallel: true,
        })
        .train_chunks(&chunks)
        .unwrap();

        assert_eq!(rules(&sequential), rules(&parallel));
    }

    #[test]
    fn test_merges_reference_earlier_symbols_only() {
        let text = "abababab cdcdcd abcd ".repeat(5);
        let model = BpeTrainer::with_vocab_size(262)
            .train_bytes(text.as_bytes())
            .unwrap();

        for rule in model.merges().iter() {
            assert!(rule.pair.0 < rule.new_id);
            assert!(rule.pair.1 < rule.new_id);
        }
        assert_eq!(model.merges().rules()[0].pair, (A, B));
    }
}
