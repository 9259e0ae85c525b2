//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training data file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the trained model
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target vocabulary size, byte symbols included
    #[arg(long, default_value_t = 512)]
    pub vocab_size: usize,

    /// Pre-tokenization pattern: gpt4, gpt2, none, or a custom regex
    #[arg(short, long, default_value = "gpt4")]
    pub pattern: SplitPattern,

    /// Reserve a special token, as LITERAL=ID (repeatable)
    #[arg(short, long = "special", value_parser = parse_special)]
    pub special: Vec<(String, u32)>,

    /// Also write the bare merge table as merges.txt
    #[arg(long)]
    pub merges_txt: bool,

    /// Train on a single thread
    #[arg(long)]
    pub no_parallel: bool,

    /// Encode and decode this text with the trained model
    #[arg(long)]
    pub sample: Option<String>,
}

use super::format_ids;
use anyhow::{Context, Result as AnyhowResult};
use bytemerge_tokenizer::{SplitPattern, Tokenizer};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Parse `LITERAL=ID`; the literal may itself contain `=`.
fn parse_special(s: &str) -> Result<(String, u32), String> {
    let (literal, id) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LITERAL=ID, got '{}'", s))?;
    if literal.is_empty() {
        return Err("special token literal must not be empty".to_string());
    }
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid special token id '{}': {}", id, e))?;
    Ok((literal.to_string(), id))
}

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    info!(
        "Training tokenizer: input={} output={} vocab_size={} pattern={} special={}",
        cmd.input.display(),
        cmd.output.display(),
        cmd.vocab_size,
        cmd.pattern,
        cmd.special.len()
    );

    // Read training data
    let start = Instant::now();
    let data = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;
    info!(
        "Read {} bytes in {:.2}s",
        data.len(),
        start.elapsed().as_secs_f64()
    );

    // Train
    let start = Instant::now();
    let tokenizer = Tokenizer::builder()
        .vocab_size(cmd.vocab_size)
        .split_pattern(cmd.pattern)
        .special_tokens(cmd.special)
        .parallel(!cmd.no_parallel)
        .train(&data)?;
    println!(
        "Trained {} merges in {:.2}s (vocab size {})",
        tokenizer.merges().len(),
        start.elapsed().as_secs_f64(),
        tokenizer.vocab_size()
    );

    // Save model
    tokenizer.save(&cmd.output)?;
    if cmd.merges_txt {
        tokenizer.save_merges_txt(&cmd.output)?;
    }
    println!("Model saved to {}", cmd.output.display());

    if let Some(sample) = cmd.sample {
        let ids = tokenizer.encode(&sample, true)?;
        let decoded = tokenizer.decode(&ids, true)?;
        println!("Sample: {:?}", sample);
        println!(
            "Encoded: {} ({} tokens, {} bytes)",
            format_ids(&ids),
            ids.len(),
            sample.len()
        );
        println!("Decoded: {:?}", decoded);
        println!("Round-trip: {}", if decoded == sample { "ok" } else { "MISMATCH" });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_special() {
        assert_eq!(
            parse_special("<|endoftext|>=100257").unwrap(),
            ("<|endoftext|>".to_string(), 100_257)
        );
        assert_eq!(parse_special("a=b=7").unwrap(), ("a=b".to_string(), 7));
        assert!(parse_special("<X>").is_err());
        assert!(parse_special("=5").is_err());
        assert!(parse_special("<X>=abc").is_err());
    }
}
