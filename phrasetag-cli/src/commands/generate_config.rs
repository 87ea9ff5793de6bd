//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Use it for tagging:");
        println!(
            "   phrasetag tag -c names.tsv -i 'docs/*.txt' --config {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Template configuration content, matching the built-in defaults
pub fn template() -> &'static str {
    r#"# phrasetag configuration
#
# Command-line flags take precedence over every value below.

[tagging]
# Which part of a corpus phrase may match:
#   WHOLE    complete phrases only
#   PARTIAL  any suffix of a phrase ("School" for "London Business School")
#   FRAGMENT any contiguous run inside a phrase
mode = "WHOLE"

# How overlapping matches are filtered:
#   ALL     report every match
#   NO_SUB  drop matches nested inside another match
overlaps = "NO_SUB"

# Include the matched text in each tag
match_text = false

[corpus]
# "auto" (by extension), "tsv" or "jsonl"
format = "auto"

# Phrases kept out of the index, compared after normalization
exclude = []

# Build the suffix index even when the mode is WHOLE
partial = false

[output]
# "text" or "json"
default_format = "text"
pretty_json = true

[performance]
# Worker threads for tagging documents (0 = all cores)
worker_threads = 0
"#
}
