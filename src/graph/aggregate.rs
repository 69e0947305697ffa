//! Co-occurrence edge aggregation.
//!
//! Converts the indexed interaction table into a weighted undirected edge
//! list: every pair of distinct books reviewed by the same user contributes
//! 1 to that pair's edge weight. Aggregation runs over an explicit keyed
//! accumulation map, so the parallel path can merge per-thread maps by key
//! and reproduce the sequential output exactly.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::graph::edges::{Edge, EdgeList};
use crate::types::Interaction;

/// Builds the book co-occurrence graph from indexed interactions.
///
/// A user with k distinct books contributes C(k,2) pairs, so
/// `max_books_per_user` caps the combinatorial blow-up from pathological
/// super-users; users above the cap contribute nothing at all.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceAggregator {
    max_books_per_user: Option<usize>,
}

impl CooccurrenceAggregator {
    /// Aggregator with no per-user cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip users with more than `cap` distinct books.
    pub fn with_max_books_per_user(mut self, cap: usize) -> Self {
        self.max_books_per_user = Some(cap);
        self
    }

    /// Group interactions into one sorted, deduplicated book set per user.
    ///
    /// Users that cannot form a pair (fewer than 2 distinct books) or that
    /// exceed the configured cap are dropped here.
    fn user_book_sets(&self, interactions: &[Interaction]) -> Vec<Vec<u32>> {
        let mut by_user: FxHashMap<u32, Vec<u32>> = FxHashMap::default();
        for it in interactions {
            by_user.entry(it.user).or_default().push(it.book);
        }

        let mut sets = Vec::with_capacity(by_user.len());
        for (_, mut books) in by_user {
            books.sort_unstable();
            books.dedup();
            if books.len() < 2 {
                continue;
            }
            if let Some(cap) = self.max_books_per_user {
                if books.len() > cap {
                    continue;
                }
            }
            sets.push(books);
        }
        sets
    }

    /// Aggregate co-occurrence edges sequentially.
    ///
    /// Returns an empty list when no user has 2 or more distinct books;
    /// that is a valid outcome, not an error.
    pub fn aggregate(&self, interactions: &[Interaction]) -> EdgeList {
        let sets = self.user_book_sets(interactions);

        let mut counter: FxHashMap<(u32, u32), u64> = FxHashMap::default();
        for books in &sets {
            count_pairs(books, &mut counter);
        }

        into_edge_list(counter)
    }

    /// Aggregate co-occurrence edges with a rayon map-reduce.
    ///
    /// Per-user pair sets are folded into thread-local maps and merged by
    /// key. Weight addition is commutative and associative, so the output
    /// is identical to [`CooccurrenceAggregator::aggregate`] regardless of
    /// partitioning.
    pub fn aggregate_par(&self, interactions: &[Interaction]) -> EdgeList {
        let sets = self.user_book_sets(interactions);

        let counter = sets
            .par_iter()
            .fold(FxHashMap::default, |mut local: FxHashMap<(u32, u32), u64>, books| {
                count_pairs(books, &mut local);
                local
            })
            .reduce(FxHashMap::default, |mut a, b| {
                for (pair, w) in b {
                    *a.entry(pair).or_insert(0) += w;
                }
                a
            });

        into_edge_list(counter)
    }
}

/// Increment the counter for every unordered pair in a sorted book set.
fn count_pairs(books: &[u32], counter: &mut FxHashMap<(u32, u32), u64>) {
    // books is sorted ascending, so (books[i], books[j]) is already the
    // canonical (low, high) key.
    for i in 0..books.len() {
        for j in (i + 1)..books.len() {
            *counter.entry((books[i], books[j])).or_insert(0) += 1;
        }
    }
}

fn into_edge_list(counter: FxHashMap<(u32, u32), u64>) -> EdgeList {
    let edges = counter
        .into_iter()
        .map(|((src, dst), weight)| Edge { src, dst, weight })
        .collect();
    EdgeList::from_edges(edges)
}
