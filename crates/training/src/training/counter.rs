//! Pair counting for BPE training.
//!
//! This module holds the training corpus as an arena of independent symbol
//! sequences (one per pretokenized chunk) and counts pair frequencies across
//! it, with support for parallel processing.

use bytemerge_core::{merge_pair, Pair, PairCounts};
use rayon::prelude::*;

/// Corpus arena and pair counter for BPE training.
///
/// Pairs are only ever counted and merged within a sequence, never across
/// sequence boundaries.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    /// Sequence index -> current symbols
    sequences: Vec<Vec<u32>>,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter over existing symbol sequences.
    pub fn from_sequences(sequences: Vec<Vec<u32>>) -> Self {
        Self { sequences }
    }

    /// Add a chunk of raw bytes as a new sequence.
    pub fn add_chunk(&mut self, chunk: &[u8]) {
        self.sequences.push(chunk.iter().map(|&b| u32::from(b)).collect());
    }

    /// Count all pairs in parallel.
    ///
    /// Each worker counts a share of the sequences; partial tables are then
    /// combined. The result is identical to [`Self::count_pairs_sequential`].
    pub fn count_pairs_parallel(&self) -> PairCounts {
        self.sequences
            .par_iter()
            .enumerate()
            .fold(PairCounts::new, |mut counts, (index, sequence)| {
                counts.add_sequence(index, sequence);
                counts
            })
            .reduce(PairCounts::new, PairCounts::merge)
    }

    /// Count all pairs sequentially.
    pub fn count_pairs_sequential(&self) -> PairCounts {
        let mut counts = PairCounts::new();

        for (index, sequence) in self.sequences.iter().enumerate() {
            counts.add_sequence(index, sequence);
        }

        counts
    }

    /// Count all pairs, in parallel or not.
    pub fn count_pairs(&self, parallel: bool) -> PairCounts {
        if parallel {
            self.count_pairs_parallel()
        } else {
            self.count_pairs_sequential()
        }
    }

    /// Merge a pair in every sequence.
    ///
    /// Returns the number of replacements made.
    pub fn merge_pair_in_sequences(&mut self, pair: Pair, new_id: u32, parallel: bool) -> usize {
        let merge = |sequence: &mut Vec<u32>| {
            if sequence.len() < 2 {
                return 0;
            }
            let before = sequence.len();
            *sequence = merge_pair(sequence, pair, new_id);
            before - sequence.len()
        };

        if parallel {
            self.sequences.par_iter_mut().map(merge).sum()
        } else {
            self.sequences.iter_mut().map(merge).sum()
        }
    }

    /// Get a reference to the sequences.
    pub fn sequences(&self) -> &[Vec<u32>] {
        &self.sequences
    }

    /// Get the number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Check if the corpus has no sequences.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Get the total number of symbols across all sequences.
    pub fn total_symbols(&self) -> usize {
        self.sequences.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u32 = b'a' as u32;
    const B: u32 = b'b' as u32;
    const C: u32 = b'c' as u32;
    const D: u32 = b'd' as u32;

    fn counter(chunks: &[&str]) -> PairCounter {
        let mut counter = PairCounter::new();
        for chunk in chunks {
            counter.add_chunk(chunk.as_bytes());
        }
        counter
    }

    #[test]
    fn test_add_chunk() {
        let counter = counter(&["abc", "d"]);

        assert_eq!(counter.len(), 2);
        assert_eq!(counter.sequences()[0].as_slice(), &[A, B, C]);
        assert_eq!(counter.total_symbols(), 4);
    }

    #[test]
    fn test_count_pairs_sequential() {
        let counter = counter(&["ab", "bc"]);

        let pairs = counter.count_pairs_sequential();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.count((A, B)), 1);
        assert_eq!(pairs.count((B, C)), 1);
    }

    #[test]
    fn test_pairs_do_not_cross_sequences() {
        let counter = counter(&["ab", "ab"]);

        let pairs = counter.count_pairs_sequential();
        assert_eq!(pairs.count((A, B)), 2);
        assert_eq!(pairs.count((B, A)), 0);
    }

    #[test]
    fn test_count_pairs_parallel() {
        let counter = counter(&["abc", "bcd", "cde"]);

        let pairs = counter.count_pairs_parallel();
        // Should have pairs: (a,b), (b,c), (b,c), (c,d), (c,d), (d,e)
        assert_eq!(pairs.count((A, B)), 1);
        assert_eq!(pairs.count((B, C)), 2);
        assert_eq!(pairs.count((C, D)), 2);
        assert_eq!(pairs.count((D, b'e' as u32)), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let chunks: Vec<String> = (0..200).map(|i| format!("chunk {} of text", i % 17)).collect();
        let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let counter = counter(&refs);

        let sequential = counter.count_pairs_sequential();
        let parallel = counter.count_pairs_parallel();

        assert_eq!(sequential.len(), parallel.len());
        for (pair, stats) in sequential.iter() {
            assert_eq!(parallel.stats(pair), Some(stats));
        }
        assert_eq!(sequential.most_frequent(), parallel.most_frequent());
    }

    #[test]
    fn test_merge_pair_in_sequences() {
        let mut counter = counter(&["abab", "cab", "a"]);

        let replaced = counter.merge_pair_in_sequences((A, B), 256, false);
        assert_eq!(replaced, 3);
        assert_eq!(counter.sequences()[0].as_slice(), &[256, 256]);
        assert_eq!(counter.sequences()[1].as_slice(), &[C, 256]);
        assert_eq!(counter.sequences()[2].as_slice(), &[A]);
    }
}
