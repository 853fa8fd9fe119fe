#![deny(missing_docs)]

//! # OACheck CLI
//!
//! Command Line Interface for the open/hosted API compatibility checker.
//!
//! Supported Commands:
//! - `check`: Loads two API descriptions, runs every compatibility checker,
//!   prints each diagnostic, and exits nonzero when the documents diverge.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod check;
mod error;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Open/hosted API compatibility checker")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compares two API descriptions and reports every divergence.
    Check(check::CheckArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Check(args) => check::execute(args)?,
    }

    Ok(())
}
