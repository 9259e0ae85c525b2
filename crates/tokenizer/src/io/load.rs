//! Load functionality for trained tokenizers.
//!
//! Loading never trusts stored IDs blindly: merges are replayed through the
//! model so the vocabulary is rebuilt and every rule re-validated.

use super::format::{SerializedTokenizer, FORMAT_VERSION, MERGES_FILE, TOKENIZER_FILE};
use crate::pre_tokenizer::SplitPattern;
use bytemerge_core::{BpeModel, MergeRule, Pair, Result, SpecialTokens, TokenizerError};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Everything stored in `tokenizer.json`.
#[derive(Debug, Clone)]
pub struct LoadedTokenizer {
    pub model: BpeModel,
    pub split_pattern: SplitPattern,
    pub special_tokens: SpecialTokens,
}

/// Tokenizer loader - handles loading trained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a tokenizer from a directory in JSON format.
    ///
    /// Expects a `tokenizer.json` file in the given directory.
    ///
    /// # Arguments
    /// * `path` - Directory path to load from
    pub fn load(path: &Path) -> Result<LoadedTokenizer> {
        let file_path = path.join(TOKENIZER_FILE);
        let file = File::open(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;

        let reader = BufReader::new(file);
        let serialized: SerializedTokenizer = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("Failed to deserialize tokenizer: {}", e)))?;

        let loaded = Self::deserialize(serialized)?;
        info!(
            "Loaded {} merges from {}",
            loaded.model.num_merges(),
            file_path.display()
        );
        Ok(loaded)
    }

    /// Load a bare merge table from `merges.txt`.
    ///
    /// Blank lines are skipped; every other line must hold two symbol IDs.
    pub fn load_merges_txt(path: &Path) -> Result<BpeModel> {
        let file_path = path.join(MERGES_FILE);
        let content =
            std::fs::read_to_string(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;

        let pairs = Self::parse_merges(&content)?;
        let model = BpeModel::from_pairs(pairs)?;
        info!(
            "Loaded {} merges from {}",
            model.num_merges(),
            file_path.display()
        );
        Ok(model)
    }

    /// Parse `left right` lines into pairs.
    fn parse_merges(content: &str) -> Result<Vec<Pair>> {
        let mut pairs = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(TokenizerError::Load(format!(
                    "Invalid merge format at line {}: '{}'",
                    line_num + 1,
                    line
                )));
            }

            let parse = |part: &str| {
                part.parse::<u32>().map_err(|e| {
                    TokenizerError::Load(format!(
                        "Invalid symbol id '{}' at line {}: {}",
                        part,
                        line_num + 1,
                        e
                    ))
                })
            };
            pairs.push((parse(parts[0])?, parse(parts[1])?));
        }

        Ok(pairs)
    }

    /// Deserialize from a serialized structure.
    fn deserialize(data: SerializedTokenizer) -> Result<LoadedTokenizer> {
        if data.version != FORMAT_VERSION {
            return Err(TokenizerError::Load(format!(
                "Unsupported format version {} (expected {})",
                data.version, FORMAT_VERSION
            )));
        }

        let model = BpeModel::from_rules(data.merges.into_iter().map(MergeRule::from))?;

        let special_tokens = SpecialTokens::from_pairs(
            data.special_tokens
                .into_iter()
                .map(|token| (token.literal, token.id)),
        )?;
        special_tokens.validate(model.vocab_size())?;

        Ok(LoadedTokenizer {
            model,
            split_pattern: data.split_pattern,
            special_tokens,
        })
    }
}
