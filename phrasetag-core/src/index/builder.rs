//! Incremental construction of a [`PhraseIndex`]

use super::{IdSet, IdSetId, IdentifierOrd, IndexStats, Node, NodeId, PhraseIndex, TermId};
use crate::types::CorpusEntry;
use rustc_hash::FxHashMap;

/// Which identifier set of a node an insertion writes to
#[derive(Debug, Clone, Copy)]
enum Slot {
    Terminal,
    Fragment,
}

/// Builder that inserts corpus entries one at a time
///
/// Insertions that reach the same node union their identifier sets.
#[derive(Debug)]
pub struct PhraseIndexBuilder {
    index: PhraseIndex,
    identifier_ords: FxHashMap<String, IdentifierOrd>,
}

impl PhraseIndexBuilder {
    /// Create a builder; `partial_mode` adds the suffix trie
    pub fn new(partial_mode: bool) -> Self {
        let mut nodes = vec![Node::default()];
        let suffix_root = if partial_mode {
            nodes.push(Node::default());
            Some(NodeId(1))
        } else {
            None
        };

        Self {
            index: PhraseIndex {
                terms: FxHashMap::default(),
                edges: FxHashMap::default(),
                nodes,
                id_sets: Vec::new(),
                identifiers: Vec::new(),
                whole_root: NodeId(0),
                suffix_root,
                stats: IndexStats::default(),
            },
            identifier_ords: FxHashMap::default(),
        }
    }

    /// Insert one corpus entry
    ///
    /// Entries without tokens (e.g. a name made only of punctuation) can
    /// never match and are skipped.
    pub fn add(&mut self, entry: &CorpusEntry) -> &mut Self {
        if entry.is_empty() {
            tracing::trace!(identifier = %entry.identifier, "skipping corpus entry without tokens");
            self.index.stats.skipped_entries += 1;
            return self;
        }

        let ord = self.intern_identifier(&entry.identifier);
        let terms: Vec<TermId> = entry.tokens.iter().map(|t| self.intern_term(t)).collect();

        let whole_root = self.index.whole_root;
        self.insert_path(whole_root, &terms, ord, false);

        if let Some(suffix_root) = self.index.suffix_root {
            for start in 0..terms.len() {
                self.insert_path(suffix_root, &terms[start..], ord, true);
            }
        }

        let stats = &mut self.index.stats;
        stats.entries += 1;
        stats.max_phrase_len = stats.max_phrase_len.max(terms.len());
        self
    }

    /// Insert every entry of an iterator
    pub fn extend<'a, I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a CorpusEntry>,
    {
        for entry in entries {
            self.add(entry);
        }
        self
    }

    /// Freeze the index
    pub fn build(self) -> PhraseIndex {
        let mut index = self.index;
        index.stats.identifiers = index.identifiers.len();
        index.stats.terms = index.terms.len();
        index.stats.nodes = index.nodes.len();
        index.stats.terminal_nodes = index.nodes.iter().filter(|n| n.terminal.is_some()).count();

        index.terms.shrink_to_fit();
        index.edges.shrink_to_fit();
        index.nodes.shrink_to_fit();

        tracing::debug!(
            entries = index.stats.entries,
            skipped = index.stats.skipped_entries,
            identifiers = index.stats.identifiers,
            terms = index.stats.terms,
            nodes = index.stats.nodes,
            partial = index.partial_mode(),
            "phrase index built"
        );

        index
    }

    fn insert_path(&mut self, root: NodeId, terms: &[TermId], ord: IdentifierOrd, fragments: bool) {
        let mut node = root;
        for &term in terms {
            node = self.child_or_insert(node, term);
            if fragments {
                self.add_identifier(node, Slot::Fragment, ord);
            }
        }
        self.add_identifier(node, Slot::Terminal, ord);
    }

    fn child_or_insert(&mut self, parent: NodeId, term: TermId) -> NodeId {
        let nodes = &mut self.index.nodes;
        *self.index.edges.entry((parent, term)).or_insert_with(|| {
            nodes.push(Node::default());
            NodeId((nodes.len() - 1) as u32)
        })
    }

    fn add_identifier(&mut self, node: NodeId, slot: Slot, ord: IdentifierOrd) {
        let node = &mut self.index.nodes[node.index()];
        let handle = match slot {
            Slot::Terminal => &mut node.terminal,
            Slot::Fragment => &mut node.fragment,
        };
        let id_sets = &mut self.index.id_sets;
        let set_id = *handle.get_or_insert_with(|| {
            id_sets.push(IdSet::new());
            IdSetId((id_sets.len() - 1) as u32)
        });

        let set = &mut id_sets[set_id.index()];
        if let Err(pos) = set.binary_search(&ord) {
            set.insert(pos, ord);
        }
    }

    fn intern_identifier(&mut self, identifier: &str) -> IdentifierOrd {
        if let Some(&ord) = self.identifier_ords.get(identifier) {
            return ord;
        }
        let ord = IdentifierOrd(self.index.identifiers.len() as u32);
        self.index.identifiers.push(identifier.to_string());
        self.identifier_ords.insert(identifier.to_string(), ord);
        ord
    }

    fn intern_term(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.index.terms.get(term) {
            return id;
        }
        let id = TermId(self.index.terms.len() as u32);
        self.index.terms.insert(term.to_string(), id);
        id
    }
}
