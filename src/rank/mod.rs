//! Rank aggregation
//!
//! Runs PageRank over a co-occurrence graph and turns per-node scores into
//! an ordered keyword list.

use std::cmp::Ordering;

use tracing::debug;

use crate::graph::builder::CooccurrenceGraph;
use crate::graph::csr::CsrGraph;
use crate::pagerank::{PageRankResult, StandardPageRank};
use crate::types::{Keyword, KeywordResult};

/// Descending score, then ascending text
pub fn keyword_order(a: &Keyword, b: &Keyword) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.text.cmp(&b.text))
}

/// Resolves ranked nodes back to surface strings
#[derive(Debug, Clone, Default)]
pub struct RankAggregator {
    ranker: StandardPageRank,
}

impl RankAggregator {
    pub fn new(ranker: StandardPageRank) -> Self {
        Self { ranker }
    }

    /// Rank `graph` and produce ordered keywords
    pub fn rank(&self, graph: &CooccurrenceGraph) -> KeywordResult {
        if graph.is_empty() {
            return KeywordResult::empty();
        }
        let csr = CsrGraph::from_graph(graph);
        let result = self.ranker.run(&csr);
        Self::aggregate(graph, &csr, &result)
    }

    /// Pair scores with surface strings, drop unresolvable or empty labels
    /// and sort
    pub fn aggregate(graph: &CooccurrenceGraph, csr: &CsrGraph, result: &PageRankResult) -> KeywordResult {
        let mut keywords: Vec<Keyword> = result
            .scores
            .iter()
            .enumerate()
            .filter_map(|(i, &score)| {
                let surface = graph.resolve(csr.node_id(i as u32))?;
                if surface.is_empty() {
                    return None;
                }
                Some(Keyword::new(surface, score))
            })
            .collect();

        let dropped = result.scores.len() - keywords.len();
        if dropped > 0 {
            debug!(dropped, "dropped nodes without a surface form");
        }

        keywords.sort_by(keyword_order);
        KeywordResult::from_sorted(keywords, result.iterations, result.converged, result.delta)
    }
}
