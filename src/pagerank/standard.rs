//! Standard PageRank algorithm
//!
//! Implements the classic PageRank with power iteration and proper
//! handling of dangling nodes.

use tracing::{debug, warn};

use super::PageRankResult;
use crate::config::TextRankConfig;
use crate::graph::csr::CsrGraph;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Stop once the L1 movement of the score vector drops to this
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TextRankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with
    /// `converged = false`. An empty graph yields empty scores; a graph with
    /// no usable edges yields uniform scores.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        // Words whose windows only produced zero-weight edges land here too
        let dangling = graph.dangling_nodes();

        let mut iterations = 0;
        let mut delta = f64::MAX;
        while iterations < self.max_iterations && delta > self.tolerance {
            iterations += 1;
            delta = self.step(graph, &dangling, &scores, &mut next);
            std::mem::swap(&mut scores, &mut next);
        }

        normalize_to_unit_sum(&mut scores);

        let converged = delta <= self.tolerance;
        if converged {
            debug!(nodes = n, iterations, delta, "pagerank converged");
        } else {
            warn!(
                nodes = n,
                iterations,
                delta,
                tolerance = self.tolerance,
                "pagerank hit iteration limit, returning best-effort scores"
            );
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }

    /// One power-iteration step from `scores` into `next`; returns the L1
    /// movement
    fn step(&self, graph: &CsrGraph, dangling: &[u32], scores: &[f64], next: &mut [f64]) -> f64 {
        let n = scores.len() as f64;

        // Restart mass plus the mass of dangling words, both spread evenly
        let dangling_mass: f64 = dangling.iter().map(|&d| scores[d as usize]).sum();
        next.fill((1.0 - self.damping) / n + self.damping * dangling_mass / n);

        for (word, &score) in scores.iter().enumerate() {
            let out_weight = graph.node_total_weight(word as u32);
            if out_weight <= 0.0 {
                continue;
            }
            let share = self.damping * score / out_weight;
            for (neighbor, weight) in graph.neighbors(word as u32) {
                next[neighbor as usize] += share * weight;
            }
        }

        scores.iter().zip(next.iter()).map(|(old, new)| (old - new).abs()).sum()
    }
}

/// Rescale so the scores sum to 1; an all-zero vector is left alone
fn normalize_to_unit_sum(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        scores.iter_mut().for_each(|s| *s /= sum);
    }
}
