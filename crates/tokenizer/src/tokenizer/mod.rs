//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties a trained
//! model to its pre-tokenization pipeline and special-token table.

use crate::io::{ModelFormat, TokenizerLoader, TokenizerSaver};
use crate::pre_tokenizer::{Segment, SpecialSplitter, SplitPattern, Splitter};
use bytemerge_core::{BpeModel, ByteLevelEncoder, MergeRules, Result, SpecialTokens};
use bytemerge_training::{BpeTrainer, TrainingConfig};
use log::info;
use rayon::prelude::*;
use std::path::Path;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Target vocabulary size, byte symbols included
    pub vocab_size: usize,
    /// Pre-tokenization pattern
    pub split_pattern: SplitPattern,
    /// Special token literals and their reserved IDs
    pub special_tokens: Vec<(String, u32)>,
    /// Use rayon for training and batch encoding
    pub parallel: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_size: 512,
            split_pattern: SplitPattern::default(),
            special_tokens: Vec::new(),
            parallel: true,
        }
    }
}

impl TokenizerConfig {
    /// The trainer settings this configuration implies.
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            vocab_size: self.vocab_size,
            parallel: self.parallel,
        }
    }

    fn special_table(&self) -> Result<SpecialTokens> {
        SpecialTokens::from_pairs(
            self.special_tokens
                .iter()
                .map(|(literal, id)| (literal.as_str(), *id)),
        )
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set the pre-tokenization pattern.
    pub fn split_pattern(mut self, pattern: SplitPattern) -> Self {
        self.config.split_pattern = pattern;
        self
    }

    /// Reserve `id` for the literal `literal`.
    pub fn special_token(mut self, literal: impl Into<String>, id: u32) -> Self {
        self.config.special_tokens.push((literal.into(), id));
        self
    }

    /// Reserve several special tokens at once.
    pub fn special_tokens<S: Into<String>>(
        mut self,
        tokens: impl IntoIterator<Item = (S, u32)>,
    ) -> Self {
        self.config
            .special_tokens
            .extend(tokens.into_iter().map(|(literal, id)| (literal.into(), id)));
        self
    }

    /// Enable or disable parallel processing.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Get the configuration built so far.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Build an untrained tokenizer: 256 byte symbols, no merges.
    pub fn build(self) -> Result<Tokenizer> {
        self.from_model(BpeModel::byte_level())
    }

    /// Build a tokenizer around an existing model.
    pub fn from_model(self, model: BpeModel) -> Result<Tokenizer> {
        Tokenizer::assemble(model, self.config)
    }

    /// Build a tokenizer from a `merges.txt` table in `path`.
    pub fn from_merges_txt(self, path: &Path) -> Result<Tokenizer> {
        let model = TokenizerLoader::load_merges_txt(path)?;
        self.from_model(model)
    }

    /// Train a tokenizer on `text`.
    ///
    /// Special-token literals are cut out of the corpus and the remaining
    /// text is split into chunks before training, so no learned merge spans
    /// a chunk boundary or a special token.
    pub fn train(self, text: &str) -> Result<Tokenizer> {
        let config = self.config;
        let training_config = config.training_config();
        training_config.validate()?;

        // Fail before training if a reserved id would collide.
        let special = config.special_table()?;
        special.validate(config.vocab_size)?;

        let splitter = Splitter::new(config.split_pattern.clone())?;
        let special_splitter = SpecialSplitter::new(&special)?;

        let mut chunks = Vec::new();
        for segment in special_splitter.strip(text) {
            chunks.extend(splitter.split(segment)?);
        }
        info!(
            "Pre-tokenized {} bytes into {} chunks with pattern {}",
            text.len(),
            chunks.len(),
            splitter.pattern()
        );

        let model = BpeTrainer::new(training_config).train_chunks(chunks)?;
        Tokenizer::assemble(model, config)
    }
}

/// Main tokenizer struct.
///
/// Holds a read-only trained model; encoding and decoding never modify it,
/// so a `Tokenizer` can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Byte-level encoder over the shared model
    encoder: ByteLevelEncoder,
    /// Chunk splitter
    splitter: Splitter,
    /// Special-token splitter, owning the special table
    special_splitter: SpecialSplitter,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    fn assemble(model: BpeModel, mut config: TokenizerConfig) -> Result<Self> {
        let special = config.special_table()?;
        special.validate(model.vocab_size())?;

        let splitter = Splitter::new(config.split_pattern.clone())?;
        let special_splitter = SpecialSplitter::new(&special)?;
        config.vocab_size = model.vocab_size();

        Ok(Self {
            encoder: ByteLevelEncoder::new(model),
            splitter,
            special_splitter,
            config,
        })
    }

    /// Encode text to token IDs.
    ///
    /// # Arguments
    /// * `text` - The text to encode
    /// * `allow_special` - Map special-token literals to their reserved IDs.
    ///   When false they are encoded like any other text.
    pub fn encode(&self, text: &str, allow_special: bool) -> Result<Vec<u32>> {
        let mut ids = Vec::with_capacity(text.len() / 2);

        if !allow_special {
            self.encode_into(text, &mut ids)?;
            return Ok(ids);
        }

        for segment in self.special_splitter.split(text) {
            match segment {
                Segment::Special(id) => ids.push(id),
                Segment::Text(part) => self.encode_into(part, &mut ids)?,
            }
        }

        Ok(ids)
    }

    /// Encode text with special tokens treated as ordinary text.
    pub fn encode_ordinary(&self, text: &str) -> Result<Vec<u32>> {
        self.encode(text, false)
    }

    fn encode_into(&self, text: &str, ids: &mut Vec<u32>) -> Result<()> {
        for chunk in self.splitter.split(text)? {
            ids.extend(self.encoder.encode_chunk(chunk.as_bytes()));
        }
        Ok(())
    }

    /// Encode a batch of texts, in parallel when enabled.
    ///
    /// Results are in input order.
    pub fn encode_batch<S>(&self, texts: &[S], allow_special: bool) -> Result<Vec<Vec<u32>>>
    where
        S: AsRef<str> + Sync,
    {
        if self.config.parallel {
            texts
                .par_iter()
                .map(|text| self.encode(text.as_ref(), allow_special))
                .collect()
        } else {
            texts
                .iter()
                .map(|text| self.encode(text.as_ref(), allow_special))
                .collect()
        }
    }

    /// Decode token IDs back to text.
    ///
    /// Fails with `UnknownSymbol` on an ID the model never defined. Byte
    /// sequences that are not valid UTF-8 become U+FFFD.
    ///
    /// # Arguments
    /// * `ids` - The token IDs to decode
    /// * `allow_special` - Decode reserved IDs to their literals
    pub fn decode(&self, ids: &[u32], allow_special: bool) -> Result<String> {
        self.encoder.decode(ids, self.special_table(allow_special))
    }

    /// Decode token IDs to raw bytes.
    pub fn decode_bytes(&self, ids: &[u32], allow_special: bool) -> Result<Vec<u8>> {
        self.encoder.decode_bytes(ids, self.special_table(allow_special))
    }

    fn special_table(&self, allow_special: bool) -> Option<&SpecialTokens> {
        allow_special.then(|| self.special_splitter.tokens())
    }

    /// The bytes a single ID stands for.
    pub fn token_bytes(&self, id: u32) -> Result<&[u8]> {
        match self.special_tokens().get_literal(id) {
            Some(literal) => Ok(literal.as_bytes()),
            None => self.model().vocab().bytes_of(id),
        }
    }

    /// Get the vocabulary size (trained symbols, special tokens excluded).
    pub fn vocab_size(&self) -> usize {
        self.model().vocab_size()
    }

    /// Get the merge rules in mint order.
    pub fn merges(&self) -> &MergeRules {
        self.model().merges()
    }

    /// Get the trained model.
    pub fn model(&self) -> &BpeModel {
        self.encoder.model()
    }

    /// Get the special token table.
    pub fn special_tokens(&self) -> &SpecialTokens {
        self.special_splitter.tokens()
    }

    /// Get the pre-tokenization pattern.
    pub fn split_pattern(&self) -> &SplitPattern {
        self.splitter.pattern()
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Save the tokenizer to a directory as `tokenizer.json`.
    ///
    /// # Arguments
    /// * `path` - Directory path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        self.save_as(path, ModelFormat::Json)
    }

    /// Save only the merge table, as `merges.txt`.
    pub fn save_merges_txt(&self, path: &Path) -> Result<()> {
        self.save_as(path, ModelFormat::MergesText)
    }

    /// Save the tokenizer to a directory in the given format.
    pub fn save_as(&self, path: &Path, format: ModelFormat) -> Result<()> {
        let saver = TokenizerSaver::new(self.model(), self.special_tokens(), self.split_pattern());
        match format {
            ModelFormat::Json => saver.save(path),
            ModelFormat::MergesText => saver.save_merges_txt(path),
        }
    }

    /// Load a tokenizer from a directory containing `tokenizer.json`.
    ///
    /// # Arguments
    /// * `path` - Directory path to load from
    pub fn load(path: &Path) -> Result<Self> {
        let loaded = TokenizerLoader::load(path)?;

        let config = TokenizerConfig {
            vocab_size: loaded.model.vocab_size(),
            split_pattern: loaded.split_pattern,
            special_tokens: loaded
                .special_tokens
                .iter()
                .map(|(literal, id)| (literal.to_string(), id))
                .collect(),
            ..Default::default()
        };

        Self::assemble(loaded.model, config)
    }

    /// Load a tokenizer from a `merges.txt` table with default settings.
    pub fn load_merges_txt(path: &Path) -> Result<Self> {
        TokenizerBuilder::new().from_merges_txt(path)
    }
}
