//! Save functionality for trained tokenizers.
//!
//! This module provides methods for saving trained tokenizers to disk
//! in the formats described by [`ModelFormat`](super::ModelFormat).

use super::format::{
    SerializedMerge, SerializedSpecialToken, SerializedTokenizer, FORMAT_VERSION, MERGES_FILE,
    TOKENIZER_FILE,
};
use crate::pre_tokenizer::SplitPattern;
use bytemerge_core::{BpeModel, Result, SpecialTokens, TokenizerError};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Tokenizer saver - handles saving trained models.
pub struct TokenizerSaver<'a> {
    /// Trained model reference
    model: &'a BpeModel,
    /// Special token table reference
    special_tokens: &'a SpecialTokens,
    /// Pre-tokenization pattern
    split_pattern: &'a SplitPattern,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(
        model: &'a BpeModel,
        special_tokens: &'a SpecialTokens,
        split_pattern: &'a SplitPattern,
    ) -> Self {
        Self {
            model,
            special_tokens,
            split_pattern,
        }
    }

    /// Save the tokenizer to a directory in JSON format.
    ///
    /// This saves a single `tokenizer.json` file containing all model data.
    ///
    /// # Arguments
    /// * `path` - Directory path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| TokenizerError::io(path, e))?;

        let file_path = path.join(TOKENIZER_FILE);
        let file = File::create(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())
            .map_err(|e| TokenizerError::Save(format!("Failed to serialize tokenizer: {}", e)))?;
        writer.flush().map_err(|e| TokenizerError::io(&file_path, e))?;

        info!(
            "Saved {} merges to {}",
            self.model.num_merges(),
            file_path.display()
        );
        Ok(())
    }

    /// Save the bare merge table as `merges.txt`.
    ///
    /// One `left right` pair per line in mint order; the new ID of line `n`
    /// (0-based) is `256 + n`. Special tokens and the split pattern are not
    /// part of this format.
    pub fn save_merges_txt(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| TokenizerError::io(path, e))?;

        let file_path = path.join(MERGES_FILE);
        let file = File::create(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;
        let mut writer = BufWriter::new(file);

        for rule in self.model.merges().iter() {
            writeln!(writer, "{} {}", rule.pair.0, rule.pair.1)
                .map_err(|e| TokenizerError::io(&file_path, e))?;
        }
        writer.flush().map_err(|e| TokenizerError::io(&file_path, e))?;

        info!(
            "Saved {} merges to {}",
            self.model.num_merges(),
            file_path.display()
        );
        Ok(())
    }

    /// Serialize the tokenizer to a structure.
    pub(crate) fn serialize(&self) -> SerializedTokenizer {
        let merges = self
            .model
            .merges()
            .iter()
            .copied()
            .map(SerializedMerge::from)
            .collect();

        let special_tokens = self
            .special_tokens
            .iter()
            .map(|(literal, id)| SerializedSpecialToken {
                literal: literal.to_string(),
                id,
            })
            .collect();

        SerializedTokenizer {
            version: FORMAT_VERSION,
            split_pattern: self.split_pattern.clone(),
            merges,
            special_tokens,
        }
    }
}
