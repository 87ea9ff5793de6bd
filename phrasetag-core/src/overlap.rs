//! Overlap resolution
//!
//! Filters the candidate set of one document down to the tags that get
//! reported. Resolution only ever removes candidates; it never creates or
//! reshapes spans, and the survivors keep their input order.

use crate::error::TaggerError;
use crate::types::CandidateMatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule for choosing among overlapping or nested candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum OverlapPolicy {
    /// Keep every candidate, nested ones included
    All,
    /// Drop candidates strictly contained in another candidate's span
    #[default]
    NoSub,
}

impl OverlapPolicy {
    /// All supported policies
    pub const ALL: [OverlapPolicy; 2] = [OverlapPolicy::All, OverlapPolicy::NoSub];

    /// Canonical name of the policy
    pub fn name(&self) -> &'static str {
        match self {
            OverlapPolicy::All => "ALL",
            OverlapPolicy::NoSub => "NO_SUB",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverlapPolicy {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ALL" => Ok(OverlapPolicy::All),
            "NO_SUB" => Ok(OverlapPolicy::NoSub),
            _ => Err(TaggerError::UnsupportedPolicy(s.to_string())),
        }
    }
}

/// Apply `policy` to the candidates of one document
pub fn resolve(candidates: Vec<CandidateMatch>, policy: OverlapPolicy) -> Vec<CandidateMatch> {
    match policy {
        OverlapPolicy::All => candidates,
        OverlapPolicy::NoSub => remove_sub_spans(candidates),
    }
}

/// Keep only candidates whose span is maximal
///
/// Sweep in (start ascending, end descending) order while tracking the
/// furthest end reached by a kept span and the earliest start among kept
/// spans reaching it. Every earlier span in the sweep starts at or before
/// the current one, so the current span is nested iff it ends before that
/// furthest end, or ends exactly there while a kept span started earlier.
/// Identical spans are never nested in each other and survive together.
fn remove_sub_spans(candidates: Vec<CandidateMatch>) -> Vec<CandidateMatch> {
    if candidates.len() < 2 {
        return candidates;
    }

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&candidates[a], &candidates[b]);
        a.start.cmp(&b.start).then(b.end.cmp(&a.end))
    });

    let mut keep = vec![false; candidates.len()];
    let mut cover: Option<(usize, usize)> = None; // (start, end) of the dominating kept span

    for &i in &order {
        let candidate = &candidates[i];
        let nested = match cover {
            Some((start, end)) => {
                candidate.end < end || (candidate.end == end && start < candidate.start)
            }
            None => false,
        };

        if nested {
            tracing::trace!(
                start = candidate.start,
                end = candidate.end,
                "dropping sub-span"
            );
            continue;
        }

        keep[i] = true;
        match cover {
            Some((_, end)) if candidate.end <= end => {}
            _ => cover = Some((candidate.start, candidate.end)),
        }
    }

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, kept)| kept.then_some(candidate))
        .collect()
}
