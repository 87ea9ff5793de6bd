//! Tagger facade: tokenize, scan, resolve, emit
//!
//! A [`Tagger`] bundles a shared index, a tokenizer and a configuration. It
//! is cheap to clone and safe to use from many threads at once: each call
//! owns its own match states and candidate buffers.

use crate::analysis::{StandardTokenizer, TokenStream, Tokenizer};
use crate::config::Config;
use crate::emitter::{emit, EmitOptions};
use crate::error::Result;
use crate::index::PhraseIndex;
use crate::matcher::Matcher;
use crate::overlap::{resolve, OverlapPolicy};
use crate::types::{CorpusEntry, MatchMode, Tag, Token};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tags found in one document, plus metadata
#[derive(Debug, Clone, Serialize)]
pub struct Output {
    /// Reported tags, ordered by end offset then start offset
    pub tags: Vec<Tag>,
    /// Processing metadata
    pub metadata: TagMetadata,
}

/// Metadata about one tagging call
#[derive(Debug, Clone, Serialize)]
pub struct TagMetadata {
    /// Number of tags reported
    pub tags_count: usize,
    /// Number of tokens scanned
    pub token_count: usize,
    /// Candidates before overlap resolution
    pub candidate_count: usize,
    /// Mode used for matching
    pub mode: MatchMode,
    /// Policy used for resolution
    pub overlaps: OverlapPolicy,
    /// Wall-clock time spent
    pub duration: Duration,
}

/// Dictionary tagger over a shared phrase index
#[derive(Clone)]
pub struct Tagger {
    index: Arc<PhraseIndex>,
    tokenizer: Arc<dyn Tokenizer>,
    config: Config,
}

impl std::fmt::Debug for Tagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tagger")
            .field("index", self.index.stats())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Tagger {
    /// Create a tagger with the default configuration
    pub fn new(index: Arc<PhraseIndex>) -> Self {
        Self {
            index,
            tokenizer: Arc::new(StandardTokenizer::new()),
            config: Config::default(),
        }
    }

    /// Create a tagger with a custom configuration
    ///
    /// Fails if the index cannot serve the configured mode.
    pub fn with_config(index: Arc<PhraseIndex>, config: Config) -> Result<Self> {
        config.validate_for(&index)?;
        Ok(Self {
            config,
            ..Self::new(index)
        })
    }

    /// Replace the tokenizer used for documents
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// The shared index
    pub fn index(&self) -> &Arc<PhraseIndex> {
        &self.index
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tag a raw document
    pub fn tag(&self, text: &str) -> Result<Output> {
        let tokens = self.tokenizer.tokenize(text);
        self.tag_tokens(text, tokens)
    }

    /// Tag a document whose tokens were produced by an external analyzer
    pub fn tag_tokens(&self, text: &str, tokens: Vec<Token>) -> Result<Output> {
        let start = Instant::now();
        let stream = TokenStream::new(text, tokens)?;

        let mut matcher = Matcher::new(&self.index, self.config.mode)?;
        let candidates = matcher.scan(&stream);
        let candidate_count = candidates.len();

        let resolved = resolve(candidates, self.config.overlaps);
        let tags = emit(
            &resolved,
            &stream,
            &self.index,
            EmitOptions {
                include_match_text: self.config.match_text,
            },
        );

        let metadata = TagMetadata {
            tags_count: tags.len(),
            token_count: stream.len(),
            candidate_count,
            mode: self.config.mode,
            overlaps: self.config.overlaps,
            duration: start.elapsed(),
        };

        tracing::debug!(
            tokens = metadata.token_count,
            candidates = metadata.candidate_count,
            tags = metadata.tags_count,
            "document tagged"
        );

        Ok(Output { tags, metadata })
    }

    /// Tag many documents concurrently against the shared index
    ///
    /// Results come back in input order.
    #[cfg(feature = "parallel")]
    pub fn tag_batch<S>(&self, texts: &[S]) -> Vec<Result<Output>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        texts.par_iter().map(|text| self.tag(text.as_ref())).collect()
    }
}

/// Build a phrase index from corpus entries
///
/// Filtering (stop phrases and the like) is up to the caller and must
/// happen before this call.
pub fn build_index<'a, I>(entries: I, partial_mode: bool) -> PhraseIndex
where
    I: IntoIterator<Item = &'a CorpusEntry>,
{
    PhraseIndex::build(entries, partial_mode)
}

/// Tag a raw document with the standard tokenizer
pub fn tag(
    text: &str,
    index: &PhraseIndex,
    mode: MatchMode,
    overlaps: OverlapPolicy,
    include_match_text: bool,
) -> Result<Vec<Tag>> {
    let tokens = StandardTokenizer::new().tokenize(text);
    let stream = TokenStream::new(text, tokens)?;
    let candidates = Matcher::new(index, mode)?.scan(&stream);
    let resolved = resolve(candidates, overlaps);
    Ok(emit(
        &resolved,
        &stream,
        index,
        EmitOptions { include_match_text },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaggerError;

    fn index(partial: bool) -> Arc<PhraseIndex> {
        let tokenizer = StandardTokenizer::new();
        let entries: Vec<CorpusEntry> = [("0", "London"), ("1", "London Business School")]
            .into_iter()
            .map(|(id, name)| CorpusEntry::from_text(id, name, &tokenizer))
            .collect();
        Arc::new(build_index(&entries, partial))
    }

    #[test]
    fn test_tagger_defaults_to_whole_no_sub() {
        let tagger = Tagger::new(index(false));
        let output = tagger.tag("the London Business School").unwrap();

        assert_eq!(output.tags.len(), 1);
        assert_eq!(output.tags[0].ids, vec!["1"]);
        assert_eq!(output.metadata.tags_count, 1);
        assert_eq!(output.metadata.token_count, 4);
        assert_eq!(output.metadata.candidate_count, 2);
    }

    #[test]
    fn test_with_config_rejects_unindexed_mode() {
        let config = Config::builder().mode(MatchMode::Partial).build().unwrap();
        let err = Tagger::with_config(index(false), config).unwrap_err();
        assert_eq!(err, TaggerError::ModeNotIndexed(MatchMode::Partial));
    }

    #[test]
    fn test_tag_tokens_validates_stream() {
        let tagger = Tagger::new(index(false));
        let tokens = vec![
            Token::new("london", 0, 6, 0),
            Token::new("business", 3, 11, 1),
        ];
        let err = tagger.tag_tokens("London Business", tokens).unwrap_err();
        assert!(matches!(err, TaggerError::InvalidTokenStream { index: 1, .. }));
    }

    #[test]
    fn test_tag_tokens_with_external_normalization() {
        let tagger = Tagger::new(index(false));
        // Analyzer that maps "LDN" to "london"
        let tokens = vec![Token::new("london", 0, 3, 0)];
        let output = tagger.tag_tokens("LDN", tokens).unwrap();
        assert_eq!(output.tags.len(), 1);
        assert_eq!(output.tags[0].end_offset, 3);
    }

    #[test]
    fn test_free_tag_function() {
        let index = index(true);
        let tags = tag("school", &index, MatchMode::Partial, OverlapPolicy::NoSub, true).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].match_text.as_deref(), Some("school"));

        let tags = tag("school", &index, MatchMode::Whole, OverlapPolicy::NoSub, true).unwrap();
        assert!(tags.is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_tag_batch_keeps_input_order() {
        let tagger = Tagger::new(index(false));
        let docs = vec!["London", "nothing here", "London Business School"];
        let results = tagger.tag_batch(&docs);

        assert_eq!(results.len(), 3);
        let counts: Vec<usize> = results
            .into_iter()
            .map(|r| r.unwrap().metadata.tags_count)
            .collect();
        assert_eq!(counts, vec![1, 0, 1]);
    }

    #[test]
    fn test_tagger_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tagger>();
    }
}
