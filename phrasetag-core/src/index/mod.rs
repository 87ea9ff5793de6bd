//! Phrase index: a token-level trie over the corpus
//!
//! Nodes live in a contiguous arena and are addressed by [`NodeId`].
//! Transitions are kept in one hash table keyed by `(node, term)`, where a
//! term is an interned normalized token. Two roots share the arena:
//!
//! - the whole-phrase root, reachable only through full phrases
//! - the suffix root (built on request), where every suffix of every phrase
//!   has its own path
//!
//! Each node may carry two identifier sets: the *terminal* set (phrases or
//! suffixes that end here) and, on the suffix trie, the *fragment* set
//! (every phrase whose suffix path passes through the node).
//!
//! The index is immutable once built and is shared read-only by any number
//! of concurrent scans.

mod builder;

pub use builder::PhraseIndexBuilder;

use crate::error::{Result, TaggerError};
use crate::types::{CorpusEntry, MatchMode};
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Handle to a node of the index arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Interned normalized token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

/// Handle to an identifier set stored in the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdSetId(u32);

/// Ordinal of an identifier, assigned in first-seen order at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentifierOrd(u32);

/// Identifier ordinals, sorted ascending and unique
pub type IdSet = SmallVec<[IdentifierOrd; 2]>;

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl IdSetId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl IdentifierOrd {
    /// Position of the identifier in corpus insertion order
    pub fn ordinal(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    terminal: Option<IdSetId>,
    fragment: Option<IdSetId>,
}

/// Size figures collected while building
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Corpus entries inserted
    pub entries: usize,
    /// Entries skipped because they had no tokens
    pub skipped_entries: usize,
    /// Distinct identifiers
    pub identifiers: usize,
    /// Distinct normalized tokens
    pub terms: usize,
    /// Arena size, roots included
    pub nodes: usize,
    /// Nodes carrying a terminal identifier set
    pub terminal_nodes: usize,
    /// Longest phrase in tokens
    pub max_phrase_len: usize,
}

/// Read-only phrase index
#[derive(Debug, Clone)]
pub struct PhraseIndex {
    terms: FxHashMap<String, TermId>,
    edges: FxHashMap<(NodeId, TermId), NodeId>,
    nodes: Vec<Node>,
    id_sets: Vec<IdSet>,
    identifiers: Vec<String>,
    whole_root: NodeId,
    suffix_root: Option<NodeId>,
    stats: IndexStats,
}

impl PhraseIndex {
    /// Build an index from a corpus
    ///
    /// With `partial_mode` the suffix trie is built as well, enabling the
    /// partial and fragment match modes. An empty corpus yields an index
    /// that matches nothing.
    pub fn build<'a, I>(corpus: I, partial_mode: bool) -> Self
    where
        I: IntoIterator<Item = &'a CorpusEntry>,
    {
        let mut builder = PhraseIndexBuilder::new(partial_mode);
        for entry in corpus {
            builder.add(entry);
        }
        builder.build()
    }

    /// Start building an index incrementally
    pub fn builder(partial_mode: bool) -> PhraseIndexBuilder {
        PhraseIndexBuilder::new(partial_mode)
    }

    /// Whether the suffix trie was built
    pub fn partial_mode(&self) -> bool {
        self.suffix_root.is_some()
    }

    /// Whether scans in `mode` are possible on this index
    pub fn supports(&self, mode: MatchMode) -> bool {
        !mode.needs_suffixes() || self.partial_mode()
    }

    /// Root node to start matches from in `mode`
    pub fn root(&self, mode: MatchMode) -> Result<NodeId> {
        if mode.needs_suffixes() {
            self.suffix_root.ok_or(TaggerError::ModeNotIndexed(mode))
        } else {
            Ok(self.whole_root)
        }
    }

    /// Look up the interned form of a normalized token
    pub fn term_id(&self, token: &str) -> Option<TermId> {
        self.terms.get(token).copied()
    }

    /// Follow `token` from `node`, if any phrase continues that way
    pub fn step(&self, node: NodeId, token: &str) -> Option<NodeId> {
        self.term_id(token)
            .and_then(|term| self.step_term(node, term))
    }

    /// Follow an interned token from `node`
    pub fn step_term(&self, node: NodeId, term: TermId) -> Option<NodeId> {
        self.edges.get(&(node, term)).copied()
    }

    /// Identifier set of the phrases (or suffixes) ending at `node`
    pub fn is_terminal(&self, node: NodeId) -> Option<IdSetId> {
        self.nodes[node.index()].terminal
    }

    /// Identifier set that makes `node` an accepting position in `mode`
    pub fn accepting(&self, node: NodeId, mode: MatchMode) -> Option<IdSetId> {
        let node = &self.nodes[node.index()];
        match mode {
            MatchMode::Whole | MatchMode::Partial => node.terminal,
            MatchMode::Fragment => node.fragment,
        }
    }

    /// Identifier ordinals of a set, in insertion order
    pub fn id_set(&self, ids: IdSetId) -> &[IdentifierOrd] {
        &self.id_sets[ids.index()]
    }

    /// Identifier string for an ordinal
    pub fn identifier(&self, ord: IdentifierOrd) -> &str {
        &self.identifiers[ord.ordinal()]
    }

    /// Identifier strings of a set, in insertion order
    pub fn identifiers(&self, ids: IdSetId) -> impl Iterator<Item = &str> + '_ {
        self.id_set(ids).iter().map(|&ord| self.identifier(ord))
    }

    /// Build statistics
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Whether no phrase was inserted
    pub fn is_empty(&self) -> bool {
        self.stats.entries == 0
    }
}
