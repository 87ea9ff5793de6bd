//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use phrasetag_core::{MatchMode, OverlapPolicy};

pub mod generate_config;
pub mod tag;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tag documents with the corpus phrases they contain
    Tag(tag::TagArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a commented configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List match modes
    Modes,

    /// List overlap policies
    Policies,

    /// List corpus and output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Tag(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

impl ListCommands {
    fn render(&self) -> String {
        let mut out = String::new();
        match self {
            ListCommands::Modes => {
                out.push_str("Match modes:\n");
                for mode in MatchMode::ALL {
                    let about = match mode {
                        MatchMode::Whole => "complete phrases only",
                        MatchMode::Partial => "any suffix of a phrase",
                        MatchMode::Fragment => "any contiguous run inside a phrase",
                    };
                    out.push_str(&format!("  {:<10} {}\n", mode.name(), about));
                }
            }
            ListCommands::Policies => {
                out.push_str("Overlap policies:\n");
                for policy in OverlapPolicy::ALL {
                    let about = match policy {
                        OverlapPolicy::All => "report every candidate",
                        OverlapPolicy::NoSub => "drop candidates nested inside another",
                        _ => "",
                    };
                    out.push_str(&format!("  {:<10} {}\n", policy.name(), about));
                }
            }
            ListCommands::Formats => {
                out.push_str("Corpus formats:\n");
                out.push_str("  tsv        identifier<TAB>name per line\n");
                out.push_str("  jsonl      {\"id\": ..., \"name\": ...} per line\n");
                out.push_str("Output formats:\n");
                out.push_str("  text       path<TAB>start<TAB>end<TAB>ids[<TAB>match] per tag\n");
                out.push_str("  json       array of {source, tags_count, tags}\n");
            }
        }
        out
    }
}
