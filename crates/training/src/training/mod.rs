//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the training algorithm and the corpus arena it
//! operates on.

pub mod counter;
pub mod trainer;

pub use counter::PairCounter;
pub use trainer::{BpeTrainer, TrainingConfig};
