//! Crate error taxonomy.
//!
//! All fatal conditions are detected synchronously at call entry, before any
//! iteration state is mutated, so a caller never observes a partially
//! computed rank vector alongside an error. Non-convergence within the
//! iteration cap is deliberately NOT represented here; it is reported
//! through [`crate::pagerank::PageRankResult::converged`].

use thiserror::Error;

/// Errors surfaced by the graph and ranking core.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// `src` and `dst` edge arrays differ in length.
    #[error("src and dst must have the same length ({src} != {dst})")]
    EdgeArrayMismatch { src: usize, dst: usize },

    /// The optional weight array does not match the edge count.
    #[error("weights length {weights} does not match edge count {edges}")]
    WeightArrayMismatch { weights: usize, edges: usize },

    /// An edge endpoint refers to a node outside `[0, num_nodes)`.
    #[error("node index {index} out of range for {num_nodes} nodes")]
    NodeOutOfRange { index: u32, num_nodes: usize },

    /// A custom teleport vector has the wrong length.
    #[error("teleport vector length {len} does not match node count {num_nodes}")]
    TeleportLengthMismatch { len: usize, num_nodes: usize },

    /// A custom teleport vector sums to zero or less and cannot be
    /// normalized into a distribution.
    #[error("teleport vector must have a strictly positive sum")]
    DegenerateTeleport,

    /// An identifier had no dense index in the mapping table.
    #[error("identifier {id:?} has no dense index")]
    UnmappedId { id: String },

    /// Failure at the CSV persistence boundary.
    #[error("csv error: {0}")]
    Csv(String),

    /// Failure at the file I/O boundary.
    #[error("io error: {0}")]
    Io(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
