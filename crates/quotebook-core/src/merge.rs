//! Merge engine
//!
//! Combines the local collection with an incoming one by appending every
//! incoming quote whose identity is not already present. Local quotes are
//! never removed or reordered, and conflicting categories for the same text
//! are not reconciled: append-only, first identity wins.

use std::collections::HashSet;

use crate::models::Quote;

/// Result of merging an incoming collection into a local one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The merged collection (local order, then new quotes in incoming order)
    pub merged: Vec<Quote>,
    /// Number of incoming quotes appended
    pub added: usize,
}

impl MergeOutcome {
    /// Whether the merge appended anything
    pub fn changed(&self) -> bool {
        self.added > 0
    }
}

/// Merge `incoming` into `local`
///
/// Merging the same incoming collection twice is a no-op the second time.
pub fn merge(mut local: Vec<Quote>, incoming: impl IntoIterator<Item = Quote>) -> MergeOutcome {
    let added = merge_into(&mut local, incoming);
    MergeOutcome {
        merged: local,
        added,
    }
}

/// In-place variant of [`merge`], returning the number of quotes appended
pub fn merge_into(local: &mut Vec<Quote>, incoming: impl IntoIterator<Item = Quote>) -> usize {
    let mut seen: HashSet<_> = local.iter().map(Quote::key).collect();
    let before = local.len();

    for quote in incoming {
        if seen.insert(quote.key()) {
            local.push(quote);
        }
    }

    local.len() - before
}
