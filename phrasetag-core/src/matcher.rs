//! Streaming matcher
//!
//! Tokens are pushed through the phrase index one at a time. Every token
//! position may open a new in-progress match; every live match either
//! advances along the index or dies. Whenever a live match stands on an
//! accepting node a candidate is emitted, and the match stays alive since
//! a longer phrase may still complete from the same start.
//!
//! Candidates come out ordered by end token, then start token: at step `i`
//! the live states are visited in creation order (ascending start), and the
//! state opened at `i` is visited last.

use crate::analysis::TokenStream;
use crate::error::Result;
use crate::index::{NodeId, PhraseIndex};
use crate::types::{CandidateMatch, MatchMode};

/// An in-progress match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    /// Token index where the match began
    pub start: usize,
    /// Node reached so far
    pub node: NodeId,
}

/// Scans token streams against a shared index
///
/// The matcher borrows the index and owns nothing but its working set, so
/// any number of matchers can scan concurrently against one index.
#[derive(Debug)]
pub struct Matcher<'i> {
    index: &'i PhraseIndex,
    mode: MatchMode,
    root: NodeId,
    states: Vec<MatchState>,
}

impl<'i> Matcher<'i> {
    /// Create a matcher for `mode`
    ///
    /// Fails if the index was not built for this mode.
    pub fn new(index: &'i PhraseIndex, mode: MatchMode) -> Result<Self> {
        let root = index.root(mode)?;
        Ok(Self {
            index,
            mode,
            root,
            states: Vec::new(),
        })
    }

    /// The mode this matcher scans in
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Scan a validated token stream and return every candidate match
    pub fn scan(&mut self, stream: &TokenStream<'_>) -> Vec<CandidateMatch> {
        let mut candidates = Vec::new();
        self.states.clear();

        for (position, token) in stream.tokens().iter().enumerate() {
            self.advance(position, &token.text, &mut candidates);
        }

        // Anything still live ends unterminated
        self.states.clear();

        tracing::trace!(
            tokens = stream.len(),
            candidates = candidates.len(),
            mode = %self.mode,
            "scan complete"
        );
        candidates
    }

    /// Push one token through the working set
    fn advance(&mut self, position: usize, token: &str, candidates: &mut Vec<CandidateMatch>) {
        let index = self.index;
        let mode = self.mode;

        let Some(term) = index.term_id(token) else {
            // Unknown token: nothing continues and nothing starts here
            self.states.clear();
            return;
        };

        self.states.retain_mut(|state| match index.step_term(state.node, term) {
            Some(next) => {
                state.node = next;
                if let Some(ids) = index.accepting(next, mode) {
                    candidates.push(CandidateMatch::new(state.start, position, ids));
                }
                true
            }
            None => false,
        });

        if let Some(node) = index.step_term(self.root, term) {
            if let Some(ids) = index.accepting(node, mode) {
                candidates.push(CandidateMatch::new(position, position, ids));
            }
            self.states.push(MatchState {
                start: position,
                node,
            });
        }
    }

    /// Number of live states
    pub fn live_states(&self) -> usize {
        self.states.len()
    }
}

/// Scan a token stream in one call
pub fn scan(
    stream: &TokenStream<'_>,
    index: &PhraseIndex,
    mode: MatchMode,
) -> Result<Vec<CandidateMatch>> {
    Ok(Matcher::new(index, mode)?.scan(stream))
}
