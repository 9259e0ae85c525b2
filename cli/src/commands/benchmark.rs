//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Directory holding tokenizer.json or merges.txt
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use super::load_tokenizer;
use anyhow::{ensure, Context, Result as AnyhowResult};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    ensure!(cmd.iterations > 0, "iterations must be at least 1");

    let tokenizer = load_tokenizer(&cmd.tokenizer)?;
    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let tokens = tokenizer.encode(&text, false)?.len();

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        tokenizer.encode(&text, false)?;
    }
    let encode_secs = start.elapsed().as_secs_f64();
    let avg_secs = encode_secs / cmd.iterations as f64;

    println!("Encode (single text):");
    println!("  Tokens: {}", tokens);
    println!(
        "  Compression: {:.2} bytes/token",
        text.len() as f64 / tokens.max(1) as f64
    );
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    println!("  Throughput: {:.0} tokens/s", tokens as f64 / avg_secs);
    println!();

    let lines: Vec<&str> = text.lines().collect();
    let start = Instant::now();
    for _ in 0..cmd.iterations {
        tokenizer.encode_batch(&lines, false)?;
    }
    let batch_secs = start.elapsed().as_secs_f64() / cmd.iterations as f64;

    println!("Encode batch ({} lines):", lines.len());
    println!("  Average time: {:.3}ms", batch_secs * 1000.0);
    println!(
        "  Throughput: {:.2} MB/s",
        text.len() as f64 / batch_secs / 1_000_000.0
    );

    Ok(())
}
