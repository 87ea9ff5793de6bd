//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Corpus file not found or inaccessible
    CorpusNotFound(String),
    /// Corpus line that could not be parsed
    InvalidCorpusLine {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::CorpusNotFound(path) => write!(f, "Corpus not found: {path}"),
            CliError::InvalidCorpusLine { line, reason } => {
                write!(f, "Invalid corpus line {line}: {reason}")
            }
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
