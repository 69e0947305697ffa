//! Descriptive statistics and graph diagnostics.
//!
//! Everything here is reporting-only: summaries of the interaction table,
//! of the aggregated edge weights, and per-node degree/strength figures,
//! plus invariant checks over a built edge list. Nothing in this module
//! feeds back into graph construction or ranking.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::graph::EdgeList;
use crate::types::Interaction;

/// Five-number-ish summary of a count distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountSummary {
    pub min: usize,
    pub median: f64,
    pub mean: f64,
    pub max: usize,
}

impl CountSummary {
    fn from_counts(mut counts: Vec<usize>) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }
        counts.sort_unstable();
        let n = counts.len();
        let median = if n % 2 == 1 {
            counts[n / 2] as f64
        } else {
            (counts[n / 2 - 1] + counts[n / 2]) as f64 / 2.0
        };
        let mean = counts.iter().sum::<usize>() as f64 / n as f64;
        Some(Self {
            min: counts[0],
            median,
            mean,
            max: counts[n - 1],
        })
    }
}

/// Summary of the interaction table: who reviews how much.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionStats {
    pub distinct_users: usize,
    pub distinct_books: usize,
    pub reviews_per_user: Option<CountSummary>,
    pub reviews_per_book: Option<CountSummary>,
    /// Users with at least two reviews (the ones that can form a pair).
    pub active_users: usize,
    /// Books with at least two reviews.
    pub active_books: usize,
}

/// Compute [`InteractionStats`] over the indexed table.
pub fn describe_interactions(interactions: &[Interaction]) -> InteractionStats {
    let mut per_user: FxHashMap<u32, usize> = FxHashMap::default();
    let mut per_book: FxHashMap<u32, usize> = FxHashMap::default();
    for it in interactions {
        *per_user.entry(it.user).or_insert(0) += 1;
        *per_book.entry(it.book).or_insert(0) += 1;
    }

    let active_users = per_user.values().filter(|&&c| c >= 2).count();
    let active_books = per_book.values().filter(|&&c| c >= 2).count();

    InteractionStats {
        distinct_users: per_user.len(),
        distinct_books: per_book.len(),
        reviews_per_user: CountSummary::from_counts(per_user.into_values().collect()),
        reviews_per_book: CountSummary::from_counts(per_book.into_values().collect()),
        active_users,
        active_books,
    }
}

/// Share of edges at and above a weight threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightBucket {
    pub threshold: u64,
    pub count_eq: usize,
    pub count_ge: usize,
}

/// Edge-weight distribution summary.
#[derive(Debug, Clone, Serialize)]
pub struct WeightSummary {
    pub num_edges: usize,
    pub buckets: Vec<WeightBucket>,
    /// (quantile, weight) pairs at q in {0.50, 0.75, 0.90, 0.95, 0.99}.
    pub quantiles: Vec<(f64, f64)>,
}

const WEIGHT_THRESHOLDS: [u64; 5] = [1, 2, 3, 5, 10];
const WEIGHT_QUANTILES: [f64; 5] = [0.50, 0.75, 0.90, 0.95, 0.99];

/// Summarize the weight distribution of an edge list.
pub fn summarize_weights(edges: &EdgeList) -> WeightSummary {
    let mut weights: Vec<u64> = edges.iter().map(|e| e.weight).collect();
    weights.sort_unstable();
    let n = weights.len();

    let buckets = WEIGHT_THRESHOLDS
        .iter()
        .map(|&thr| WeightBucket {
            threshold: thr,
            count_eq: weights.iter().filter(|&&w| w == thr).count(),
            count_ge: n - weights.partition_point(|&w| w < thr),
        })
        .collect();

    let quantiles = WEIGHT_QUANTILES
        .iter()
        .filter_map(|&q| {
            if n == 0 {
                return None;
            }
            let pos = ((n - 1) as f64 * q).round() as usize;
            Some((q, weights[pos] as f64))
        })
        .collect();

    WeightSummary {
        num_edges: n,
        buckets,
        quantiles,
    }
}

/// Per-node degree and strength figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeStat {
    pub node: u32,
    /// Number of incident edges.
    pub degree: usize,
    /// Sum of incident edge weights.
    pub strength: u64,
    /// strength / degree.
    pub avg_weight: f64,
}

/// Compute degree, strength, and average incident weight per node.
///
/// Only nodes that appear in at least one edge are listed; output is
/// sorted by node index.
pub fn node_stats(edges: &EdgeList) -> Vec<NodeStat> {
    let mut degree: FxHashMap<u32, usize> = FxHashMap::default();
    let mut strength: FxHashMap<u32, u64> = FxHashMap::default();
    for e in edges.iter() {
        for node in [e.src, e.dst] {
            *degree.entry(node).or_insert(0) += 1;
            *strength.entry(node).or_insert(0) += e.weight;
        }
    }

    let mut stats: Vec<NodeStat> = degree
        .into_iter()
        .map(|(node, deg)| {
            let s = strength[&node];
            NodeStat {
                node,
                degree: deg,
                strength: s,
                avg_weight: s as f64 / deg as f64,
            }
        })
        .collect();
    stats.sort_unstable_by_key(|s| s.node);
    stats
}

/// Nodes with degree >= `min_degree`, ranked by average incident weight.
pub fn top_by_avg_weight(stats: &[NodeStat], min_degree: usize, k: usize) -> Vec<NodeStat> {
    let mut eligible: Vec<NodeStat> = stats
        .iter()
        .filter(|s| s.degree >= min_degree)
        .copied()
        .collect();
    eligible.sort_by(|a, b| b.avg_weight.total_cmp(&a.avg_weight));
    eligible.truncate(k);
    eligible
}

/// Check structural invariants of an aggregated edge list: canonical
/// orientation, no duplicate pairs, and weights >= 1.
pub fn verify_edges(edges: &EdgeList) -> bool {
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    for e in edges.iter() {
        if e.src >= e.dst || e.weight < 1 || !seen.insert((e.src, e.dst)) {
            return false;
        }
    }
    true
}

/// Check that every pair from one user's distinct book set is present in
/// the edge list.
pub fn user_pairs_present(user_books: &[u32], edges: &EdgeList) -> bool {
    let mut books = user_books.to_vec();
    books.sort_unstable();
    books.dedup();

    let pairs: FxHashSet<(u32, u32)> = edges.iter().map(|e| (e.src, e.dst)).collect();
    for i in 0..books.len() {
        for j in (i + 1)..books.len() {
            if !pairs.contains(&(books[i], books[j])) {
                return false;
            }
        }
    }
    true
}
