//! Type definitions shared across the tagging pipeline
//!
//! Tokens flow in, candidate matches flow between the matcher and the
//! resolver, and tags flow out to the host.

use crate::analysis::Tokenizer;
use crate::error::TaggerError;
use crate::index::IdSetId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Tokens
// ============================================================================

/// A normalized token with its location in the original text
///
/// Offsets are UTF-8 byte offsets into the document, end exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Normalized form used for lookups
    pub text: String,
    /// Byte offset where the token starts
    pub start_offset: usize,
    /// Byte offset one past the end of the token
    pub end_offset: usize,
    /// Position of the token in the stream (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token
    pub fn new(
        text: impl Into<String>,
        start_offset: usize,
        end_offset: usize,
        position: usize,
    ) -> Self {
        Self {
            text: text.into(),
            start_offset,
            end_offset,
            position,
        }
    }
}

// ============================================================================
// Corpus
// ============================================================================

/// One named phrase of the dictionary, bound to an identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Identifier reported back to the host on a match
    pub identifier: String,
    /// Normalized token sequence of the phrase
    pub tokens: Vec<String>,
    /// Phrase as it appeared in the corpus
    pub original_text: String,
}

impl CorpusEntry {
    /// Create an entry from an already normalized token sequence
    pub fn new(
        identifier: impl Into<String>,
        tokens: Vec<String>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            tokens,
            original_text: original_text.into(),
        }
    }

    /// Create an entry by running the phrase through a tokenizer
    ///
    /// Documents must be tokenized with the same tokenizer for the
    /// normalized forms to line up.
    pub fn from_text(
        identifier: impl Into<String>,
        text: impl Into<String>,
        tokenizer: &dyn Tokenizer,
    ) -> Self {
        let text = text.into();
        let tokens = tokenizer
            .tokenize(&text)
            .into_iter()
            .map(|token| token.text)
            .collect();
        Self {
            identifier: identifier.into(),
            tokens,
            original_text: text,
        }
    }

    /// Whether the phrase has no tokens at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// ============================================================================
// Modes
// ============================================================================

/// Where a match is allowed to begin and end inside a corpus phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMode {
    /// Match complete phrases only
    #[default]
    Whole,
    /// Match any suffix of a phrase, ending on its last token
    Partial,
    /// Match any contiguous run of tokens inside a phrase
    Fragment,
}

impl MatchMode {
    /// All supported modes
    pub const ALL: [MatchMode; 3] = [MatchMode::Whole, MatchMode::Partial, MatchMode::Fragment];

    /// Canonical name of the mode
    pub fn name(&self) -> &'static str {
        match self {
            MatchMode::Whole => "WHOLE",
            MatchMode::Partial => "PARTIAL",
            MatchMode::Fragment => "FRAGMENT",
        }
    }

    /// Whether this mode walks the suffix trie
    pub fn needs_suffixes(&self) -> bool {
        !matches!(self, MatchMode::Whole)
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchMode {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WHOLE" => Ok(MatchMode::Whole),
            "PARTIAL" => Ok(MatchMode::Partial),
            "FRAGMENT" => Ok(MatchMode::Fragment),
            _ => Err(TaggerError::UnsupportedMode(s.to_string())),
        }
    }
}

// ============================================================================
// Matches
// ============================================================================

/// A span of tokens that completed a path in the phrase index
///
/// Token indices are inclusive on both ends. The identifiers live in the
/// index; `ids` is a handle to that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateMatch {
    /// Index of the first token of the match
    pub start: usize,
    /// Index of the last token of the match
    pub end: usize,
    /// Identifier set of the accepting node
    pub ids: IdSetId,
}

impl CandidateMatch {
    /// Create a candidate match
    pub fn new(start: usize, end: usize, ids: IdSetId) -> Self {
        debug_assert!(start <= end, "match must not end before it starts");
        Self { start, end, ids }
    }

    /// Number of tokens covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a match covers at least one token
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `other` lies inside this span and is not the same span
    pub fn strictly_contains(&self, other: &CandidateMatch) -> bool {
        self.start <= other.start
            && other.end <= self.end
            && (self.start, self.end) != (other.start, other.end)
    }
}

// ============================================================================
// Tags
// ============================================================================

/// A reported match, ready for the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Character offset of the first matched character
    pub start_offset: usize,
    /// Character offset one past the last matched character
    pub end_offset: usize,
    /// Byte offset of the first matched byte
    pub byte_start: usize,
    /// Byte offset one past the last matched byte
    pub byte_end: usize,
    /// Original text of the match, when requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub match_text: Option<String>,
    /// Matching identifiers in corpus insertion order
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StandardTokenizer;

    #[test]
    fn test_corpus_entry_from_text() {
        let entry = CorpusEntry::from_text("4", "City of London", &StandardTokenizer::new());
        assert_eq!(entry.tokens, vec!["city", "of", "london"]);
        assert_eq!(entry.original_text, "City of London");
        assert!(!entry.is_empty());

        let blank = CorpusEntry::from_text("5", "  --  ", &StandardTokenizer::new());
        assert!(blank.is_empty());
    }

    #[test]
    fn test_match_mode_parsing() {
        assert_eq!("whole".parse::<MatchMode>().unwrap(), MatchMode::Whole);
        assert_eq!(" PARTIAL ".parse::<MatchMode>().unwrap(), MatchMode::Partial);
        assert_eq!("Fragment".parse::<MatchMode>().unwrap(), MatchMode::Fragment);
        assert_eq!(
            "prefix".parse::<MatchMode>(),
            Err(TaggerError::UnsupportedMode("prefix".into()))
        );
        assert_eq!(MatchMode::default(), MatchMode::Whole);
    }

    #[test]
    fn test_strict_containment() {
        let ids = IdSetId::new(0);
        let outer = CandidateMatch::new(2, 4, ids);
        let inner = CandidateMatch::new(2, 2, ids);
        let twin = CandidateMatch::new(2, 4, ids);
        let overlap = CandidateMatch::new(0, 2, ids);

        assert!(outer.strictly_contains(&inner));
        assert!(!inner.strictly_contains(&outer));
        assert!(!outer.strictly_contains(&twin));
        assert!(!outer.strictly_contains(&overlap));
        assert_eq!(outer.len(), 3);
    }

    #[test]
    fn test_tag_serialization_skips_missing_text() {
        let tag = Tag {
            start_offset: 0,
            end_offset: 6,
            byte_start: 0,
            byte_end: 6,
            match_text: None,
            ids: vec!["1".to_string()],
        };
        let json = serde_json::to_string(&tag).unwrap();
        assert!(!json.contains("match_text"));
        assert!(json.contains("\"ids\":[\"1\"]"));
    }
}
