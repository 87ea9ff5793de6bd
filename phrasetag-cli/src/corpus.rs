//! Corpus loading for the CLI
//!
//! Two line-oriented formats are understood:
//!
//! - TSV: `identifier<TAB>name`, with `#` comments and blank lines skipped
//! - JSON lines: one `{"id": ..., "name": ...}` object per line
//!
//! Stop phrases listed in the exclusion set are dropped before the index
//! is built, compared on their normalized token sequence.

use crate::error::CliError;
use anyhow::{Context, Result};
use phrasetag_core::{CorpusEntry, Tokenizer};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// On-disk corpus format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// Tab-separated identifier and name
    Tsv,
    /// One JSON object per line
    JsonLines,
}

impl CorpusFormat {
    /// Pick a format from the file extension (TSV unless `.jsonl`/`.json`)
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jsonl") | Some("json") => CorpusFormat::JsonLines,
            _ => CorpusFormat::Tsv,
        }
    }

    /// Resolve a configured format name, `auto` meaning detection
    pub fn resolve(name: &str, path: &Path) -> Result<Self> {
        match name {
            "auto" => Ok(Self::detect(path)),
            other => other.parse(),
        }
    }
}

impl FromStr for CorpusFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(CorpusFormat::Tsv),
            "jsonl" | "json" => Ok(CorpusFormat::JsonLines),
            other => Err(CliError::ConfigError(format!("unknown corpus format '{other}'")).into()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    id: RawId,
    name: String,
}

/// Loads corpus files into normalized entries
pub struct CorpusLoader<'t> {
    tokenizer: &'t dyn Tokenizer,
    excluded: HashSet<Vec<String>>,
}

/// Entries loaded from a corpus file, with drop counts
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    /// Entries to index
    pub entries: Vec<CorpusEntry>,
    /// Entries dropped by the exclusion list
    pub excluded: usize,
}

impl<'t> CorpusLoader<'t> {
    /// Create a loader normalizing with `tokenizer`
    pub fn new(tokenizer: &'t dyn Tokenizer) -> Self {
        Self {
            tokenizer,
            excluded: HashSet::new(),
        }
    }

    /// Exclude phrases from the corpus
    pub fn with_exclusions<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let tokens = self.normalize(phrase.as_ref());
            if !tokens.is_empty() {
                self.excluded.insert(tokens);
            }
        }
        self
    }

    fn normalize(&self, phrase: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(phrase)
            .into_iter()
            .map(|token| token.text)
            .collect()
    }

    /// Read and parse a corpus file
    pub fn load(&self, path: &Path, format: CorpusFormat) -> Result<LoadedCorpus> {
        if !path.is_file() {
            return Err(CliError::CorpusNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus: {}", path.display()))?;
        self.parse(&content, format)
    }

    /// Parse corpus text
    pub fn parse(&self, content: &str, format: CorpusFormat) -> Result<LoadedCorpus> {
        let mut loaded = LoadedCorpus::default();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let (identifier, name) = match format {
                CorpusFormat::Tsv => parse_tsv_line(line, number + 1)?,
                CorpusFormat::JsonLines => parse_json_line(line, number + 1)?,
            };

            let entry = CorpusEntry::from_text(identifier, name, self.tokenizer);
            if self.excluded.contains(&entry.tokens) {
                log::debug!("Excluding corpus entry '{}'", entry.original_text);
                loaded.excluded += 1;
                continue;
            }
            loaded.entries.push(entry);
        }

        log::info!(
            "Loaded {} corpus entries ({} excluded)",
            loaded.entries.len(),
            loaded.excluded
        );
        Ok(loaded)
    }
}

fn parse_tsv_line(line: &str, number: usize) -> Result<(String, String)> {
    let (identifier, name) = line.split_once('\t').ok_or(CliError::InvalidCorpusLine {
        line: number,
        reason: "missing tab separator".to_string(),
    })?;

    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(CliError::InvalidCorpusLine {
            line: number,
            reason: "empty identifier".to_string(),
        }
        .into());
    }
    Ok((identifier.to_string(), name.trim().to_string()))
}

fn parse_json_line(line: &str, number: usize) -> Result<(String, String)> {
    let record: JsonRecord =
        serde_json::from_str(line).map_err(|e| CliError::InvalidCorpusLine {
            line: number,
            reason: e.to_string(),
        })?;
    let identifier = match record.id {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    };
    Ok((identifier, record.name))
}
