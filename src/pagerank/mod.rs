//! PageRank over the book co-occurrence graph.
//!
//! One engine ([`PowerIteration`]) covers the weighted, unweighted, and
//! custom-teleport cases; there is no separate unpersonalized variant.

pub mod power;
pub mod teleport;

pub use power::PowerIteration;
pub use teleport::{popularity_teleport, uniform_teleport};

/// Result of a PageRank computation.
///
/// The convergence outcome is explicit: hitting the iteration cap is a
/// quality signal, not an error, so `converged == false` still carries a
/// valid (normalized) score vector.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Score per node, indexed by book index; sums to 1.
    pub scores: Vec<f64>,
    /// Number of iterations actually performed.
    pub iterations: usize,
    /// L1 distance between the last two iterates.
    pub delta: f64,
    /// Whether `delta` dropped below the tolerance before the cap.
    pub converged: bool,
}

impl PageRankResult {
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Top `n` books by score, descending.
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }

    /// Score for one book, or 0.0 when the index is out of range.
    pub fn score(&self, book: u32) -> f64 {
        self.scores.get(book as usize).copied().unwrap_or(0.0)
    }
}
