//! Error types for the tagging core
//!
//! Every operation in this crate is a pure function of its inputs, so the
//! only failures are contract violations by the caller.

use crate::types::MatchMode;
use thiserror::Error;

/// Tagging errors (no I/O, no external failures)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggerError {
    /// The token stream broke the ordering/offset contract
    #[error("invalid token stream at token {index}: {reason}")]
    InvalidTokenStream {
        /// Position of the offending token in the stream
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Overlap policy name that this build does not know
    #[error("unsupported overlap policy '{0}'")]
    UnsupportedPolicy(String),

    /// Match mode name that this build does not know
    #[error("unsupported match mode '{0}'")]
    UnsupportedMode(String),

    /// The index was built without the structures this mode needs
    #[error("match mode {0} requires an index built with partial matching enabled")]
    ModeNotIndexed(MatchMode),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl TaggerError {
    pub(crate) fn invalid_stream(index: usize, reason: impl Into<String>) -> Self {
        TaggerError::InvalidTokenStream {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type for tagging operations
pub type Result<T> = std::result::Result<T, TaggerError>;
