//! Tag command implementation

use crate::config::CliConfig;
use crate::corpus::{CorpusFormat, CorpusLoader};
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use phrasetag_core::{Config, MatchMode, OverlapPolicy, PhraseIndex, Tag, Tagger};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the tag command
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Corpus file of identifier/name pairs
    #[arg(short, long, value_name = "FILE")]
    pub corpus: PathBuf,

    /// Corpus file format (default: from the config file, else by extension)
    #[arg(long, value_enum)]
    pub corpus_format: Option<CorpusFormatArg>,

    /// Documents to tag, as files or glob patterns
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Which part of a phrase may match
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// How overlapping matches are filtered
    #[arg(long, value_enum)]
    pub overlaps: Option<OverlapsArg>,

    /// Phrase to keep out of the index (repeatable)
    #[arg(short = 'x', long, value_name = "PHRASE")]
    pub exclude: Vec<String>,

    /// Include the matched text in each tag
    #[arg(long)]
    pub match_text: bool,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of worker threads (default: all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated line per tag
    Text,
    /// JSON array with one record per document
    Json,
}

/// Corpus formats selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorpusFormatArg {
    /// Tab-separated identifier and name
    Tsv,
    /// JSON lines with `id` and `name`
    Jsonl,
}

/// Match modes selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Complete phrases only
    Whole,
    /// Any suffix of a phrase
    Partial,
    /// Any contiguous run inside a phrase
    Fragment,
}

/// Overlap policies selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverlapsArg {
    /// Report every candidate
    All,
    /// Drop candidates nested inside another
    NoSub,
}

impl From<CorpusFormatArg> for CorpusFormat {
    fn from(arg: CorpusFormatArg) -> Self {
        match arg {
            CorpusFormatArg::Tsv => CorpusFormat::Tsv,
            CorpusFormatArg::Jsonl => CorpusFormat::JsonLines,
        }
    }
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Whole => MatchMode::Whole,
            ModeArg::Partial => MatchMode::Partial,
            ModeArg::Fragment => MatchMode::Fragment,
        }
    }
}

impl From<OverlapsArg> for OverlapPolicy {
    fn from(arg: OverlapsArg) -> Self {
        match arg {
            OverlapsArg::All => OverlapPolicy::All,
            OverlapsArg::NoSub => OverlapPolicy::NoSub,
        }
    }
}

impl TagArgs {
    /// Execute the tag command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting tagging");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let config = self.tagging_config(&file_config)?;

        let tagger = Tagger::with_config(self.build_index(&file_config, config.mode)?, config)?;

        let files = resolve_patterns(&self.input)?;
        log::info!(
            "Tagging {} documents ({} bytes)",
            files.len(),
            FileReader::total_size(&files)?
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_documents(files.len() as u64);

        let threads = self.worker_threads(&file_config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to start worker pool")?;
        log::debug!("Using {} worker threads", threads);

        // par_iter keeps the sorted order of `files` in the collected results
        let tagged: Vec<Vec<Tag>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| -> Result<Vec<Tag>> {
                    let tags = tag_document(&tagger, path)?;
                    progress.document_completed(&path.display().to_string());
                    Ok(tags)
                })
                .collect::<Result<_>>()
        })?;
        progress.finish();

        let mut formatter = self.create_formatter(&file_config)?;
        for (path, tags) in files.iter().zip(&tagged) {
            formatter.format_document(&path.display().to_string(), tags)?;
        }
        formatter.finish()?;

        log::info!(
            "Tagged {} documents, {} tags",
            files.len(),
            tagged.iter().map(Vec::len).sum::<usize>()
        );
        Ok(())
    }

    /// Merge flags over the config file into a core configuration
    fn tagging_config(&self, file_config: &CliConfig) -> Result<Config> {
        let mut builder = Config::builder();
        builder = match self.mode {
            Some(mode) => builder.mode(mode.into()),
            None => builder.mode_name(file_config.tagging.mode.as_str()),
        };
        builder = match self.overlaps {
            Some(overlaps) => builder.overlaps(overlaps.into()),
            None => builder.overlaps_name(file_config.tagging.overlaps.as_str()),
        };
        let config = builder
            .match_text(self.match_text || file_config.tagging.match_text)
            .build()?;
        Ok(config)
    }

    fn build_index(&self, file_config: &CliConfig, mode: MatchMode) -> Result<Arc<PhraseIndex>> {
        let format = match self.corpus_format {
            Some(format) => format.into(),
            None => CorpusFormat::resolve(&file_config.corpus.format, &self.corpus)?,
        };

        let tokenizer = phrasetag_core::StandardTokenizer::new();
        let loaded = CorpusLoader::new(&tokenizer)
            .with_exclusions(file_config.corpus.exclude.iter().chain(&self.exclude))
            .load(&self.corpus, format)?;

        let partial = mode.needs_suffixes() || file_config.corpus.partial;
        let index = PhraseIndex::build(&loaded.entries, partial);
        let stats = index.stats();
        log::info!(
            "Indexed {} phrases ({} identifiers, {} nodes, partial: {})",
            stats.entries,
            stats.identifiers,
            stats.nodes,
            partial
        );
        if stats.skipped_entries > 0 {
            log::warn!(
                "Skipped {} corpus entries without tokens",
                stats.skipped_entries
            );
        }
        Ok(Arc::new(index))
    }

    fn worker_threads(&self, file_config: &CliConfig) -> usize {
        self.threads
            .filter(|&n| n > 0)
            .or(Some(file_config.performance.worker_threads).filter(|&n| n > 0))
            .unwrap_or_else(num_cpus::get)
    }

    fn output_format(&self, file_config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => <OutputFormat as ValueEnum>::from_str(&file_config.output.default_format, true)
                .map_err(|e| CliError::ConfigError(e).into()),
        }
    }

    /// Create the appropriate output formatter
    fn create_formatter(&self, file_config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        let formatter: Box<dyn OutputFormatter> = match self.output_format(file_config)? {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => {
                Box::new(JsonFormatter::new(writer, file_config.output.pretty_json))
            }
        };
        Ok(formatter)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()?;
        }

        Ok(())
    }
}

fn tag_document(tagger: &Tagger, path: &Path) -> Result<Vec<Tag>> {
    let text = FileReader::read_text(path)?;
    let output = tagger
        .tag(&text)
        .with_context(|| format!("Failed to tag document: {}", path.display()))?;
    log::debug!(
        "{}: {} tokens, {} candidates, {} tags in {:?}",
        path.display(),
        output.metadata.token_count,
        output.metadata.candidate_count,
        output.metadata.tags_count,
        output.metadata.duration
    );
    Ok(output.tags)
}
