//! Merge candidate ordering.
//!
//! Training picks the candidate with the highest count. Ties go to the pair
//! whose first occurrence comes earliest in corpus scan order, so the result
//! never depends on hash iteration order.

use crate::core::merges::Pair;
use crate::core::pairs::ScanPos;
use std::cmp::Ordering;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbol IDs to merge
    pub pair: Pair,
    /// The frequency/count of this pair
    pub count: u64,
    /// Where the pair first occurs in the corpus
    pub first_seen: ScanPos,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64, first_seen: ScanPos) -> Self {
        Self {
            pair,
            count,
            first_seen,
        }
    }
}

// Higher count wins, then earlier first occurrence.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.first_seen.cmp(&self.first_seen))
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_count_wins() {
        let a = MergeCandidate::new((0, 1), 10, (0, 5));
        let b = MergeCandidate::new((1, 2), 20, (3, 0));
        assert!(b > a);
        assert_eq!([a, b].into_iter().max(), Some(b));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let late = MergeCandidate::new((97, 98), 2, (0, 1));
        let early = MergeCandidate::new((256, 97), 2, (0, 0));
        assert!(early > late);

        let across_sequences = MergeCandidate::new((5, 5), 2, (1, 0));
        assert!(late > across_sequences);
    }
}
