//! Bytemerge-training - BPE training infrastructure
//!
//! This crate learns an ordered list of BPE merge rules from a corpus that
//! has already been split into byte chunks.
//!
//! # Features
//!
//! - Pair frequency counting with parallel aggregation support
//! - Deterministic merge selection (first-seen pair wins ties)
//! - Exact target vocabulary size, or an `InsufficientData` error
//!
//! # Example
//!
//! ```rust
//! use bytemerge_training::BpeTrainer;
//!
//! let trainer = BpeTrainer::with_vocab_size(258);
//! let model = trainer.train_bytes(b"aaabdaaabac")?;
//! assert_eq!(model.vocab_size(), 258);
//! # Ok::<(), bytemerge_training::TokenizerError>(())
//! ```

pub use bytemerge_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{BpeTrainer, PairCounter, TrainingConfig};
