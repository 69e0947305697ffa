//! Weighted PageRank via power iteration.
//!
//! The engine consumes a node count and directed edge arrays (the caller
//! expands the undirected edge list into both arcs first, see
//! [`crate::graph::EdgeList::to_directed`]), with optional per-edge weights
//! and an optional teleport distribution. Dangling-node mass is
//! redistributed uniformly each iteration so the rank vector stays a
//! probability distribution throughout, not just at the end.

use crate::error::{Error, Result};
use crate::graph::DirectedEdges;
use crate::pagerank::PageRankResult;

/// Power-iteration PageRank engine.
///
/// Per-iteration update:
///
/// ```text
/// rank[v] = teleport_base[v]
///         + damping * dangling_mass / n
///         + damping * Σ_{u→v} rank_old[u] * w(u,v) / out_measure[u]
/// ```
///
/// where `out_measure[u]` is the summed outgoing weight of u (plain
/// out-degree when weights are absent) and `teleport_base` is the damped
/// complement of either the uniform or the supplied teleport distribution.
#[derive(Debug, Clone)]
pub struct PowerIteration {
    /// Probability of following an edge rather than teleporting.
    pub damping: f64,
    /// Iteration cap; exhausting it is reported, not an error.
    pub max_iterations: usize,
    /// Absolute L1 convergence threshold.
    pub tolerance: f64,
    /// Optional non-uniform restart distribution, normalized internally.
    teleport: Option<Vec<f64>>,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
            teleport: None,
        }
    }
}

impl PowerIteration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Supply a custom teleport vector.
    ///
    /// Must have one entry per node and a strictly positive sum; it is
    /// renormalized to a distribution before use.
    pub fn with_teleport(mut self, teleport: Vec<f64>) -> Self {
        self.teleport = Some(teleport);
        self
    }

    /// Run the engine on pre-expanded directed edge arrays.
    ///
    /// All validation happens before the first iteration; on error no rank
    /// state has been computed. A graph with zero edges short-circuits to
    /// the uniform distribution.
    pub fn run(
        &self,
        num_nodes: usize,
        src: &[u32],
        dst: &[u32],
        weights: Option<&[f64]>,
    ) -> Result<PageRankResult> {
        if src.len() != dst.len() {
            return Err(Error::EdgeArrayMismatch {
                src: src.len(),
                dst: dst.len(),
            });
        }
        if let Some(w) = weights {
            if w.len() != src.len() {
                return Err(Error::WeightArrayMismatch {
                    weights: w.len(),
                    edges: src.len(),
                });
            }
        }
        for &ix in src.iter().chain(dst.iter()) {
            if ix as usize >= num_nodes {
                return Err(Error::NodeOutOfRange {
                    index: ix,
                    num_nodes,
                });
            }
        }
        let teleport = self.normalized_teleport(num_nodes)?;

        // No edges: nothing to iterate over, uniform is the only defensible
        // answer regardless of num_nodes.
        if src.is_empty() {
            let scores = if num_nodes == 0 {
                Vec::new()
            } else {
                vec![1.0 / num_nodes as f64; num_nodes]
            };
            return Ok(PageRankResult::new(scores, 0, 0.0, true));
        }

        let n = num_nodes as f64;

        // out_measure[u]: summed outgoing weight, or out-degree when unweighted.
        let mut out_measure = vec![0.0f64; num_nodes];
        match weights {
            Some(w) => {
                for (&u, &wt) in src.iter().zip(w.iter()) {
                    out_measure[u as usize] += wt;
                }
            }
            None => {
                for &u in src {
                    out_measure[u as usize] += 1.0;
                }
            }
        }
        let dangling: Vec<usize> = (0..num_nodes).filter(|&u| out_measure[u] == 0.0).collect();

        let teleport_base: Vec<f64> = match &teleport {
            Some(t) => t.iter().map(|&p| (1.0 - self.damping) * p).collect(),
            None => vec![(1.0 - self.damping) / n; num_nodes],
        };

        let mut ranks = vec![1.0 / n; num_nodes];
        let mut new_ranks = vec![0.0f64; num_nodes];
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta >= self.tolerance {
            iterations += 1;

            // Dangling mass is redistributed uniformly over all nodes; this
            // keeps Σ rank == 1 at every iteration.
            let dangling_mass: f64 = dangling.iter().map(|&u| ranks[u]).sum();
            let dangling_contrib = self.damping * dangling_mass / n;

            for v in 0..num_nodes {
                new_ranks[v] = teleport_base[v] + dangling_contrib;
            }

            // Scatter-reduce over edges: each arc u→v carries
            // rank_old[u] * w / out_measure[u].
            match weights {
                Some(w) => {
                    for i in 0..src.len() {
                        let u = src[i] as usize;
                        if out_measure[u] > 0.0 {
                            new_ranks[dst[i] as usize] +=
                                self.damping * ranks[u] * w[i] / out_measure[u];
                        }
                    }
                }
                None => {
                    for i in 0..src.len() {
                        let u = src[i] as usize;
                        if out_measure[u] > 0.0 {
                            new_ranks[dst[i] as usize] += self.damping * ranks[u] / out_measure[u];
                        }
                    }
                }
            }

            // Renormalize to correct floating-point drift before measuring
            // the step, matching the convergence criterion on the vector
            // that is actually returned.
            let sum: f64 = new_ranks.iter().sum();
            if sum > 0.0 {
                for r in &mut new_ranks {
                    *r /= sum;
                }
            }

            delta = ranks
                .iter()
                .zip(new_ranks.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut ranks, &mut new_ranks);
        }

        Ok(PageRankResult::new(
            ranks,
            iterations,
            delta,
            delta < self.tolerance,
        ))
    }

    /// Run on a [`DirectedEdges`] bundle, always using its weights.
    pub fn run_edges(&self, num_nodes: usize, edges: &DirectedEdges) -> Result<PageRankResult> {
        self.run(num_nodes, &edges.src, &edges.dst, Some(&edges.weight))
    }

    fn normalized_teleport(&self, num_nodes: usize) -> Result<Option<Vec<f64>>> {
        let Some(t) = &self.teleport else {
            return Ok(None);
        };
        if t.len() != num_nodes {
            return Err(Error::TeleportLengthMismatch {
                len: t.len(),
                num_nodes,
            });
        }
        let sum: f64 = t.iter().sum();
        if !(sum > 0.0) {
            return Err(Error::DegenerateTeleport);
        }
        Ok(Some(t.iter().map(|&p| p / sum).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeList};

    fn ring(n: u32) -> (Vec<u32>, Vec<u32>) {
        let src: Vec<u32> = (0..n).collect();
        let dst: Vec<u32> = (0..n).map(|i| (i + 1) % n).collect();
        (src, dst)
    }

    fn assert_sums_to_one(scores: &[f64]) {
        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum={sum}");
    }

    #[test]
    fn test_zero_edges_returns_uniform() {
        let result = PowerIteration::new().run(4, &[], &[], None).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        for &s in &result.scores {
            assert_eq!(s, 0.25);
        }
    }

    #[test]
    fn test_zero_nodes_zero_edges() {
        let result = PowerIteration::new().run(0, &[], &[], None).unwrap();
        assert!(result.scores.is_empty());
        assert!(result.converged);
    }

    #[test]
    fn test_cycle_converges_to_uniform() {
        let (src, dst) = ring(4);
        let result = PowerIteration::new()
            .with_tolerance(1e-12)
            .with_max_iterations(10_000)
            .run(4, &src, &dst, None)
            .unwrap();

        assert!(result.converged);
        for &s in &result.scores {
            assert!((s - 0.25).abs() < 1e-10, "score={s}");
        }
        assert_sums_to_one(&result.scores);
    }

    #[test]
    fn test_dangling_node_mass_conserved() {
        // Node 0 receives from 1 and 2 but has no outgoing edges.
        let src = vec![1, 2];
        let dst = vec![0, 0];
        let result = PowerIteration::new().run(3, &src, &dst, None).unwrap();

        assert_sums_to_one(&result.scores);
        // The sink still feeds the others through redistribution.
        assert!(result.scores[1] > 0.0);
        assert!(result.scores[2] > 0.0);
        assert!(result.scores[0] > result.scores[1]);
    }

    #[test]
    fn test_sum_to_one_holds_every_iteration() {
        // Cap at one iteration repeatedly; each prefix must already be
        // normalized, which exercises conservation across iterations.
        let src = vec![1, 2, 0];
        let dst = vec![0, 0, 1];
        for cap in 1..6 {
            let result = PowerIteration::new()
                .with_max_iterations(cap)
                .with_tolerance(0.0)
                .run(3, &src, &dst, None)
                .unwrap();
            assert_eq!(result.iterations, cap);
            assert!(!result.converged);
            assert_sums_to_one(&result.scores);
        }
    }

    #[test]
    fn test_unit_weights_equal_unweighted() {
        let src = vec![0, 1, 1, 2, 3, 0];
        let dst = vec![1, 2, 3, 0, 0, 2];
        let ones = vec![1.0; src.len()];

        let pr = PowerIteration::new();
        let weighted = pr.run(4, &src, &dst, Some(&ones)).unwrap();
        let unweighted = pr.run(4, &src, &dst, None).unwrap();

        for (a, b) in weighted.scores.iter().zip(unweighted.scores.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_heavier_edge_attracts_more_rank() {
        // 0 points to 1 with weight 3 and to 2 with weight 1.
        let src = vec![0, 0, 1, 2];
        let dst = vec![1, 2, 0, 0];
        let w = vec![3.0, 1.0, 1.0, 1.0];
        let result = PowerIteration::new().run(3, &src, &dst, Some(&w)).unwrap();
        assert!(result.scores[1] > result.scores[2]);
        assert_sums_to_one(&result.scores);
    }

    #[test]
    fn test_edge_order_does_not_matter() {
        let src = vec![0, 1, 2, 2];
        let dst = vec![1, 2, 0, 1];
        let w = vec![1.0, 2.0, 1.0, 3.0];

        let pr = PowerIteration::new().with_tolerance(1e-12);
        let a = pr.run(3, &src, &dst, Some(&w)).unwrap();

        // Permute the edge arrays.
        let perm = [3usize, 0, 2, 1];
        let src_p: Vec<u32> = perm.iter().map(|&i| src[i]).collect();
        let dst_p: Vec<u32> = perm.iter().map(|&i| dst[i]).collect();
        let w_p: Vec<f64> = perm.iter().map(|&i| w[i]).collect();
        let b = pr.run(3, &src_p, &dst_p, Some(&w_p)).unwrap();

        for (x, y) in a.scores.iter().zip(b.scores.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_teleport_biases_ranking() {
        let (src, dst) = ring(4);
        let biased = PowerIteration::new()
            .with_teleport(vec![10.0, 1.0, 1.0, 1.0])
            .run(4, &src, &dst, None)
            .unwrap();
        let uniform = PowerIteration::new().run(4, &src, &dst, None).unwrap();

        assert!(biased.scores[0] > uniform.scores[0]);
        assert_sums_to_one(&biased.scores);
    }

    #[test]
    fn test_teleport_is_renormalized() {
        // Scaling the teleport vector must not change the result.
        let (src, dst) = ring(3);
        let a = PowerIteration::new()
            .with_teleport(vec![2.0, 1.0, 1.0])
            .run(3, &src, &dst, None)
            .unwrap();
        let b = PowerIteration::new()
            .with_teleport(vec![200.0, 100.0, 100.0])
            .run(3, &src, &dst, None)
            .unwrap();
        for (x, y) in a.scores.iter().zip(b.scores.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = PowerIteration::new().run(3, &[0, 1], &[1], None).unwrap_err();
        assert_eq!(err, Error::EdgeArrayMismatch { src: 2, dst: 1 });
    }

    #[test]
    fn test_weight_length_mismatch_rejected() {
        let err = PowerIteration::new()
            .run(3, &[0, 1], &[1, 2], Some(&[1.0]))
            .unwrap_err();
        assert_eq!(err, Error::WeightArrayMismatch { weights: 1, edges: 2 });
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let err = PowerIteration::new().run(2, &[0, 5], &[1, 0], None).unwrap_err();
        assert_eq!(err, Error::NodeOutOfRange { index: 5, num_nodes: 2 });
    }

    #[test]
    fn test_degenerate_teleport_rejected() {
        let err = PowerIteration::new()
            .with_teleport(vec![0.0, 0.0, 0.0])
            .run(3, &[0], &[1], None)
            .unwrap_err();
        assert_eq!(err, Error::DegenerateTeleport);
    }

    #[test]
    fn test_teleport_length_mismatch_rejected() {
        let err = PowerIteration::new()
            .with_teleport(vec![1.0, 1.0])
            .run(3, &[0], &[1], None)
            .unwrap_err();
        assert_eq!(err, Error::TeleportLengthMismatch { len: 2, num_nodes: 3 });
    }

    #[test]
    fn test_max_iterations_returns_last_iterate() {
        let (src, dst) = ring(5);
        let result = PowerIteration::new()
            .with_max_iterations(2)
            .with_tolerance(0.0)
            .run(5, &src, &dst, None)
            .unwrap();
        assert_eq!(result.iterations, 2);
        assert!(!result.converged);
        assert_sums_to_one(&result.scores);
    }

    #[test]
    fn test_run_edges_from_undirected_expansion() {
        // Triangle with equal weights ranks all books equally.
        let edges = EdgeList::from_edges(vec![
            Edge::canonical(0, 1, 2),
            Edge::canonical(1, 2, 2),
            Edge::canonical(0, 2, 2),
        ]);
        let directed = edges.to_directed();
        let result = PowerIteration::new()
            .with_tolerance(1e-12)
            .run_edges(3, &directed)
            .unwrap();
        for &s in &result.scores {
            assert!((s - 1.0 / 3.0).abs() < 1e-9);
        }
    }
}
