//! phrasetag command-line entry point

use clap::Parser;
use phrasetag_cli::commands::Commands;

/// Dictionary tagging: find corpus names inside text documents
#[derive(Debug, Parser)]
#[command(name = "phrasetag", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
