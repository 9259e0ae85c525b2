//! Adjacent-pair counting and pair replacement.
//!
//! These are the two primitives every BPE pass is built from: counting how
//! often each adjacent pair occurs, and collapsing one pair into a new symbol.

use crate::core::merges::Pair;
use crate::core::priority::MergeCandidate;
use ahash::AHashMap;

/// Position in a corpus scan: (sequence index, offset within the sequence).
pub type ScanPos = (usize, usize);

/// Occurrence statistics for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairStats {
    /// Number of occurrences
    pub count: u64,
    /// Earliest occurrence seen
    pub first_seen: ScanPos,
}

impl PairStats {
    #[inline]
    fn absorb(&mut self, other: PairStats) {
        self.count += other.count;
        self.first_seen = self.first_seen.min(other.first_seen);
    }
}

/// Pair -> occurrence statistics, aggregated over any number of sequences.
///
/// Aggregation is a sum of counts and a minimum of first positions, so
/// partial counts may be combined in any order.
#[derive(Debug, Clone, Default)]
pub struct PairCounts {
    counts: AHashMap<Pair, PairStats>,
}

impl PairCounts {
    /// Create an empty count table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the adjacent pairs of one sequence.
    ///
    /// `seq_index` positions the sequence in the corpus scan order. A
    /// sequence of length `n` contributes `n - 1` observations.
    pub fn add_sequence(&mut self, seq_index: usize, symbols: &[u32]) {
        for (offset, window) in symbols.windows(2).enumerate() {
            let pair = (window[0], window[1]);
            let pos = (seq_index, offset);
            self.counts
                .entry(pair)
                .and_modify(|stats| {
                    stats.count += 1;
                    stats.first_seen = stats.first_seen.min(pos);
                })
                .or_insert(PairStats {
                    count: 1,
                    first_seen: pos,
                });
        }
    }

    /// Combine two partial count tables.
    pub fn merge(mut self, other: PairCounts) -> PairCounts {
        let (mut acc, other) = if self.counts.len() >= other.counts.len() {
            (std::mem::take(&mut self.counts), other.counts)
        } else {
            (other.counts, std::mem::take(&mut self.counts))
        };

        for (pair, stats) in other {
            acc.entry(pair)
                .and_modify(|existing| existing.absorb(stats))
                .or_insert(stats);
        }

        PairCounts { counts: acc }
    }

    /// Get the count of a pair (0 if never seen).
    #[inline]
    pub fn count(&self, pair: Pair) -> u64 {
        self.counts.get(&pair).map_or(0, |stats| stats.count)
    }

    /// Get the full statistics of a pair.
    #[inline]
    pub fn stats(&self, pair: Pair) -> Option<PairStats> {
        self.counts.get(&pair).copied()
    }

    /// The pair to merge next: highest count, earliest first occurrence on ties.
    pub fn most_frequent(&self) -> Option<MergeCandidate> {
        self.counts
            .iter()
            .map(|(&pair, stats)| MergeCandidate::new(pair, stats.count, stats.first_seen))
            .max()
    }

    /// Number of distinct pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no pair was observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(pair, stats)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, PairStats)> + '_ {
        self.counts.iter().map(|(&pair, &stats)| (pair, stats))
    }
}

/// Count adjacent pairs in a single sequence.
pub fn count_pairs(symbols: &[u32]) -> PairCounts {
    let mut counts = PairCounts::new();
    counts.add_sequence(0, symbols);
    counts
}

/// Replace every non-overlapping occurrence of `pair` with `new_id`.
///
/// Scans left to right; a match consumes both symbols, so `a a a` merged on
/// `(a, a)` becomes `[new, a]`.
pub fn merge_pair(symbols: &[u32], pair: Pair, new_id: u32) -> Vec<u32> {
    let (a, b) = pair;
    let n = symbols.len();
    let mut out = Vec::with_capacity(n);

    let mut i = 0;
    while i < n {
        if i + 1 < n && symbols[i] == a && symbols[i + 1] == b {
            out.push(new_id);
            i += 2;
        } else {
            out.push(symbols[i]);
            i += 1;
        }
    }

    out
}
