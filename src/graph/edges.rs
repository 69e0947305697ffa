//! Weighted undirected edge list and the minimum-weight filter.
//!
//! Edges are stored canonically with `src < dst` so each unordered pair
//! appears at most once, and the list is kept sorted by (src, dst) so
//! repeated runs on the same input produce byte-identical output.

use serde::{Deserialize, Serialize};

/// One undirected co-occurrence edge.
///
/// Invariants: `src < dst` and `weight >= 1`. The weight is the number of
/// users whose book sets produced this pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub src: u32,
    pub dst: u32,
    pub weight: u64,
}

impl Edge {
    /// Build an edge in canonical orientation from an unordered pair.
    pub fn canonical(a: u32, b: u32, weight: u64) -> Self {
        if a < b {
            Self { src: a, dst: b, weight }
        } else {
            Self { src: b, dst: a, weight }
        }
    }
}

/// A deduplicated, canonically ordered collection of [`Edge`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    /// Wrap a vector of edges, sorting into canonical (src, dst) order.
    ///
    /// The caller is responsible for having deduplicated pairs; the
    /// aggregator upholds this by construction.
    pub fn from_edges(mut edges: Vec<Edge>) -> Self {
        edges.sort_unstable_by_key(|e| (e.src, e.dst));
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Total co-occurrence weight across all edges.
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Retain only edges with `weight >= threshold`.
    ///
    /// Threshold 1 is a no-op since every materialized edge already has
    /// weight >= 1. The input is left untouched; relative order of the
    /// survivors is preserved.
    pub fn filter_min_weight(&self, threshold: u64) -> EdgeList {
        if threshold <= 1 {
            return self.clone();
        }
        EdgeList {
            edges: self
                .edges
                .iter()
                .filter(|e| e.weight >= threshold)
                .copied()
                .collect(),
        }
    }

    /// Expand the undirected list into both directed arcs per edge.
    ///
    /// The PageRank engine models an undirected graph only through this
    /// expansion; it is the caller's job, done here once.
    pub fn to_directed(&self) -> DirectedEdges {
        let m = self.edges.len();
        let mut src = Vec::with_capacity(2 * m);
        let mut dst = Vec::with_capacity(2 * m);
        let mut weight = Vec::with_capacity(2 * m);
        for e in &self.edges {
            src.push(e.src);
            dst.push(e.dst);
            weight.push(e.weight as f64);
        }
        for e in &self.edges {
            src.push(e.dst);
            dst.push(e.src);
            weight.push(e.weight as f64);
        }
        DirectedEdges { src, dst, weight }
    }

    /// Largest node index referenced by any edge, if the list is non-empty.
    pub fn max_node(&self) -> Option<u32> {
        // src < dst, so dst alone bounds the index space.
        self.edges.iter().map(|e| e.dst).max()
    }
}

impl IntoIterator for EdgeList {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

/// Directed edge arrays ready for the PageRank engine.
///
/// `src`, `dst`, and `weight` are parallel arrays of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectedEdges {
    pub src: Vec<u32>,
    pub dst: Vec<u32>,
    pub weight: Vec<f64>,
}

impl DirectedEdges {
    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }
}
