//! Co-occurrence graph construction and representation.
//!
//! This module turns the indexed interaction table into a weighted
//! undirected edge list and prepares it for ranking.

pub mod aggregate;
pub mod edges;

pub use aggregate::CooccurrenceAggregator;
pub use edges::{DirectedEdges, Edge, EdgeList};
