//! CLI commands for the bytemerge tokenizer.

pub mod benchmark;
pub mod decode;
pub mod encode;
pub mod train;

pub use benchmark::BenchmarkCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use train::TrainCommand;

use anyhow::{Context, Result};
use bytemerge_tokenizer::{ModelFormat, Tokenizer};
use std::path::Path;

/// Load a tokenizer directory, preferring `tokenizer.json` over `merges.txt`.
pub fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    let tokenizer = if path.join(ModelFormat::Json.file_name()).is_file() {
        Tokenizer::load(path)
    } else {
        Tokenizer::load_merges_txt(path)
    };

    tokenizer.with_context(|| format!("failed to load tokenizer from {}", path.display()))
}

/// Format token IDs as a comma-separated list.
pub fn format_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a comma-separated list of token IDs; whitespace is ignored.
pub fn parse_ids(input: &str) -> Result<Vec<u32>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid token id '{}'", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_ids("").unwrap(), Vec::<u32>::new());
        assert_eq!(parse_ids("7,\n").unwrap(), vec![7]);
        assert!(parse_ids("1,x").is_err());
        assert!(parse_ids("-1").is_err());
    }

    #[test]
    fn test_format_ids() {
        assert_eq!(format_ids(&[257, 98, 100]), "257,98,100");
        assert_eq!(format_ids(&[]), "");
        assert_eq!(parse_ids(&format_ids(&[1, 2])).unwrap(), vec![1, 2]);
    }
}
