//! # shelfrank
//!
//! Co-occurrence graph construction and PageRank over book review data.
//!
//! `shelfrank` turns a table of user-book interactions into a weighted,
//! deduplicated co-occurrence graph (two books are connected when the same
//! user reviewed both, edge weight = number of such users) and ranks the
//! books with a damped power-iteration PageRank that supports edge weights
//! and custom teleport distributions.
//!
//! ## Quick start
//!
//! ```
//! use shelfrank::graph::CooccurrenceAggregator;
//! use shelfrank::pagerank::PowerIteration;
//! use shelfrank::types::Interaction;
//!
//! let interactions: Vec<Interaction> = vec![
//!     (0, 0).into(), (0, 1).into(),
//!     (1, 0).into(), (1, 1).into(),
//!     (2, 1).into(), (2, 2).into(),
//! ];
//!
//! let edges = CooccurrenceAggregator::new().aggregate(&interactions);
//! let result = PowerIteration::new()
//!     .run_edges(3, &edges.to_directed())
//!     .unwrap();
//!
//! assert!(result.converged);
//! assert!((result.scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! Or run the whole thing as a configured pipeline:
//!
//! ```
//! use shelfrank::pipeline::{NoopObserver, Pipeline, RunSpec, ValidationEngine};
//!
//! let spec = RunSpec::default();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! assert!(report.is_valid());
//!
//! let interactions = vec![(0, 0).into(), (0, 1).into(), (1, 0).into(), (1, 1).into()];
//! let out = Pipeline::from_spec(&spec)
//!     .run(&interactions, 2, &mut NoopObserver)
//!     .unwrap();
//! assert_eq!(out.ranks.scores.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: edge aggregation, weight filtering, directed expansion
//! - [`pagerank`]: power-iteration engine and teleport distributions
//! - [`mapping`]: string id to dense index mapping
//! - [`dataset`]: core-subset filtering, subsampling, user limits
//! - [`stats`]: degree/weight summaries and graph integrity checks
//! - [`io`]: CSV persistence for edge lists and rank vectors
//! - [`pipeline`]: declarative run specs, validation, staged execution

pub mod dataset;
pub mod error;
pub mod graph;
pub mod io;
pub mod mapping;
pub mod pagerank;
pub mod pipeline;
pub mod stats;
pub mod types;

pub use error::{Error, Result};
pub use graph::{CooccurrenceAggregator, DirectedEdges, Edge, EdgeList};
pub use mapping::IdMap;
pub use pagerank::{PageRankResult, PowerIteration};
pub use pipeline::{Pipeline, RunSpec};
pub use types::{Interaction, Rating};
