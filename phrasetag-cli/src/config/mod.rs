//! Configuration module
//!
//! Settings come from an optional TOML file; command-line flags override
//! whatever the file says.

use crate::error::CliError;
use anyhow::{Context, Result};
use phrasetag_core::{MatchMode, OverlapPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Matching configuration
    #[serde(default)]
    pub tagging: TaggingConfig,

    /// Corpus configuration
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Matching-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TaggingConfig {
    /// Match mode: WHOLE, PARTIAL or FRAGMENT
    pub mode: String,

    /// Overlap policy: ALL or NO_SUB
    pub overlaps: String,

    /// Attach matched text to each tag
    pub match_text: bool,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::default().name().to_string(),
            overlaps: OverlapPolicy::default().name().to_string(),
            match_text: false,
        }
    }
}

/// Corpus-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
    /// Corpus file format: "auto", "tsv" or "jsonl"
    pub format: String,

    /// Phrases kept out of the index (compared after normalization)
    pub exclude: Vec<String>,

    /// Build the suffix trie even if the mode does not need it
    pub partial: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            exclude: Vec::new(),
            partial: false,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that string-valued settings name known values
    pub fn validate(&self) -> Result<()> {
        self.tagging.mode.parse::<MatchMode>()?;
        self.tagging.overlaps.parse::<OverlapPolicy>()?;
        match self.corpus.format.as_str() {
            "auto" | "tsv" | "jsonl" => {}
            other => {
                return Err(CliError::ConfigError(format!("unknown corpus format '{other}'")).into())
            }
        }
        match self.output.default_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(CliError::ConfigError(format!("unknown output format '{other}'")).into()),
        }
    }
}
