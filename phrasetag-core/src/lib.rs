//! Dictionary tagging: find every corpus phrase inside a document
//!
//! This crate locates occurrences of phrases drawn from a large dictionary
//! of named entities (each bound to one or more identifiers) and reports
//! their character offsets, the matching identifiers, and optionally the
//! matched text. Matching is exact at the token level; scan time is roughly
//! linear in document length regardless of corpus size.
//!
//! # Architecture
//!
//! - **Analysis**: a [`Tokenizer`] produces normalized tokens, validated
//!   into a [`TokenStream`]
//! - **Index**: a [`PhraseIndex`] trie over the corpus, built once and
//!   shared read-only
//! - **Matcher**: streams tokens through the index and collects candidates
//! - **Overlap resolution**: filters nested candidates per [`OverlapPolicy`]
//! - **Emission**: maps token spans to [`Tag`] records
//!
//! # Example
//!
//! ```rust
//! use phrasetag_core::{build_index, CorpusEntry, StandardTokenizer, Tagger};
//! use std::sync::Arc;
//!
//! let tokenizer = StandardTokenizer::new();
//! let corpus = vec![
//!     CorpusEntry::from_text("1", "London Business School", &tokenizer),
//!     CorpusEntry::from_text("3", "City of London", &tokenizer),
//! ];
//! let tagger = Tagger::new(Arc::new(build_index(&corpus, false)));
//!
//! let output = tagger.tag("City of London Business School").unwrap();
//! assert_eq!(output.tags.len(), 2);
//! assert_eq!(output.tags[0].ids, vec!["3"]);
//! ```

pub mod analysis;
pub mod config;
pub mod emitter;
pub mod error;
pub mod index;
pub mod matcher;
pub mod overlap;
pub mod tagger;
pub mod types;

pub use analysis::{StandardTokenizer, TokenStream, Tokenizer};
pub use config::{Config, ConfigBuilder};
pub use emitter::{emit, EmitOptions};
pub use error::{Result, TaggerError};
pub use index::{IndexStats, PhraseIndex, PhraseIndexBuilder};
pub use matcher::{scan, Matcher};
pub use overlap::{resolve, OverlapPolicy};
pub use tagger::{build_index, tag, Output, TagMetadata, Tagger};
pub use types::{CandidateMatch, CorpusEntry, MatchMode, Tag, Token};
