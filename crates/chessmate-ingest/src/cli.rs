use std::path::PathBuf;

use clap::Parser;

/// Imports one or more PGN files into the relational store, enqueuing an
/// embedding job for every position inserted.
#[derive(Debug, Parser)]
#[command(name = "chessmate-ingest", about = "Ingest PGN files into Chessmate.")]
pub struct Cli {
    /// PGN files to ingest.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Continue past games that fail to parse or replay instead of aborting the run.
    #[arg(long)]
    pub skip_errors: bool,
}
