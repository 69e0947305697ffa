//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`Pipeline::run`] executes the graph-and-rank stages in order
//! (aggregate, filter, expand, teleport, rank), threading artifacts
//! between stages and notifying a [`PipelineObserver`] at each boundary.
//! The runner deliberately trusts the engine's own zero-edge handling
//! instead of special-casing empty graphs itself.

use crate::error::Result;
use crate::graph::{CooccurrenceAggregator, EdgeList};
use crate::pagerank::{popularity_teleport, PageRankResult, PowerIteration};
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_AGGREGATE, STAGE_EXPAND,
    STAGE_FILTER, STAGE_RANK, STAGE_TELEPORT,
};
use crate::pipeline::spec::{RunSpec, TeleportMode};
use crate::types::Interaction;

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Interaction count above which aggregation switches to the parallel path.
const PAR_AGGREGATE_THRESHOLD: usize = 4096;

/// Everything a run produces: the filtered edge list and the rank output.
#[derive(Debug, Clone)]
pub struct RankedGraph {
    pub num_nodes: usize,
    /// Aggregated edges after minimum-weight filtering.
    pub edges: EdgeList,
    pub ranks: PageRankResult,
}

/// A configured graph-and-rank pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    aggregator: CooccurrenceAggregator,
    min_weight: u64,
    teleport: TeleportMode,
    ranker: PowerIteration,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Pipeline with default settings: no user cap, no weight filter,
    /// uniform teleport, damping 0.85 / tolerance 1e-6 / 100 iterations.
    pub fn new() -> Self {
        Self {
            aggregator: CooccurrenceAggregator::new(),
            min_weight: 1,
            teleport: TeleportMode::Uniform,
            ranker: PowerIteration::new(),
        }
    }

    /// Configure a pipeline from a (validated) [`RunSpec`].
    ///
    /// Runtime limits in the spec are guards for the surrounding data
    /// loading, not for this runner; see [`crate::dataset::limit_users`].
    pub fn from_spec(spec: &RunSpec) -> Self {
        let mut aggregator = CooccurrenceAggregator::new();
        if let Some(cap) = spec.graph.max_books_per_user {
            aggregator = aggregator.with_max_books_per_user(cap);
        }
        Self {
            aggregator,
            min_weight: spec.graph.min_weight,
            teleport: spec.rank.teleport,
            ranker: PowerIteration::new()
                .with_damping(spec.rank.damping)
                .with_tolerance(spec.rank.tolerance)
                .with_max_iterations(spec.rank.max_iterations),
        }
    }

    pub fn with_aggregator(mut self, aggregator: CooccurrenceAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_min_weight(mut self, min_weight: u64) -> Self {
        self.min_weight = min_weight;
        self
    }

    pub fn with_teleport_mode(mut self, teleport: TeleportMode) -> Self {
        self.teleport = teleport;
        self
    }

    pub fn with_ranker(mut self, ranker: PowerIteration) -> Self {
        self.ranker = ranker;
        self
    }

    /// Execute the pipeline over an indexed interaction table.
    ///
    /// `num_nodes` is the number of books in the mapping; books that end up
    /// with no edges still receive (uniform or teleport) rank mass.
    pub fn run(
        &self,
        interactions: &[Interaction],
        num_nodes: usize,
        observer: &mut impl PipelineObserver,
    ) -> Result<RankedGraph> {
        // Stage 1: aggregate co-occurrence edges.
        trace_stage!(STAGE_AGGREGATE);
        observer.on_stage_start(STAGE_AGGREGATE);
        let clock = StageClock::start();
        let aggregated = if interactions.len() >= PAR_AGGREGATE_THRESHOLD {
            self.aggregator.aggregate_par(interactions)
        } else {
            self.aggregator.aggregate(interactions)
        };
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(num_nodes)
            .edges(aggregated.len())
            .build();
        observer.on_stage_end(STAGE_AGGREGATE, &report);

        // Stage 2: minimum-weight filter.
        trace_stage!(STAGE_FILTER);
        observer.on_stage_start(STAGE_FILTER);
        let clock = StageClock::start();
        let edges = aggregated.filter_min_weight(self.min_weight);
        let report = StageReportBuilder::new(clock.elapsed())
            .edges(edges.len())
            .build();
        observer.on_stage_end(STAGE_FILTER, &report);
        observer.on_edges(&edges);

        // Stage 3: expand to directed arcs.
        trace_stage!(STAGE_EXPAND);
        observer.on_stage_start(STAGE_EXPAND);
        let clock = StageClock::start();
        let directed = edges.to_directed();
        let report = StageReportBuilder::new(clock.elapsed())
            .edges(directed.len())
            .build();
        observer.on_stage_end(STAGE_EXPAND, &report);

        // Stage 4: build the teleport vector.
        trace_stage!(STAGE_TELEPORT);
        observer.on_stage_start(STAGE_TELEPORT);
        let clock = StageClock::start();
        let teleport = match self.teleport {
            TeleportMode::Uniform => None,
            TeleportMode::Popularity => Some(popularity_teleport(interactions, num_nodes)),
        };
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_TELEPORT, &report);

        // Stage 5: rank.
        trace_stage!(STAGE_RANK);
        observer.on_stage_start(STAGE_RANK);
        let clock = StageClock::start();
        let mut ranker = self.ranker.clone();
        if let Some(t) = teleport {
            ranker = ranker.with_teleport(t);
        }
        let ranks = ranker.run_edges(num_nodes, &directed)?;
        let report = StageReportBuilder::new(clock.elapsed())
            .iterations(ranks.iterations)
            .converged(ranks.converged)
            .residual(ranks.delta)
            .build();
        observer.on_stage_end(STAGE_RANK, &report);
        observer.on_rank(&ranks);

        Ok(RankedGraph {
            num_nodes,
            edges,
            ranks,
        })
    }
}
