//! Decode command implementation.

use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Directory holding tokenizer.json or merges.txt
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Token IDs to decode (comma-separated)
    #[arg(short = 'i', long)]
    pub ids: String,

    /// Decode reserved IDs to their special-token literals
    #[arg(short, long)]
    pub special: bool,
}

use super::{load_tokenizer, parse_ids};
use anyhow::Result as AnyhowResult;
use std::path::PathBuf;

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = load_tokenizer(&cmd.tokenizer)?;

    let ids = parse_ids(&cmd.ids)?;
    let text = tokenizer.decode(&ids, cmd.special)?;

    println!("{}", text);

    Ok(())
}
