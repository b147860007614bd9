//! Co-occurrence graph construction
//!
//! A window of `2r + 1` tokens slides over the filtered sequence. For every
//! full window, the centre token gets a directed edge to each token in the
//! window (itself included) whose weight is the distance of that token's
//! offset from the configured window centre. Edges accumulate across
//! windows.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::hasher::{IdentityHasher, Keyer, NodeTable};
use crate::config::{NodeKeying, TextRankConfig, WindowCenter};
use crate::nlp::stopwords::StopwordSet;
use crate::types::{NodeId, Token};

/// Below this many tokens the parallel build falls back to sequential
pub const PARALLEL_THRESHOLD: usize = 1000;

type Adjacency = FxHashMap<NodeId, FxHashMap<NodeId, f64>>;

/// Directed weighted co-occurrence graph plus its id -> surface table
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceGraph {
    /// source -> (target -> accumulated weight); every node has an entry
    adjacency: Adjacency,
    table: NodeTable,
    centers: usize,
}

impl CooccurrenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `weight` on the edge `from -> to`, creating both nodes
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.adjacency.entry(to).or_default();
        *self
            .adjacency
            .entry(from)
            .or_default()
            .entry(to)
            .or_insert(0.0) += weight;
    }

    /// Record the surface form for a node id (last write wins)
    pub fn label(&mut self, id: NodeId, surface: &str) {
        self.table.record(id, surface);
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct directed edges, self-loops included
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of window centres that contributed edges
    pub fn centers(&self) -> usize {
        self.centers
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Weight of `from -> to`, if the edge exists
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.adjacency.get(&from)?.get(&to).copied()
    }

    /// Node ids in ascending order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Outgoing edges of `node`, sorted by target id
    pub fn out_edges(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        let mut edges: Vec<_> = self
            .adjacency
            .get(&node)
            .map(|e| e.iter().map(|(&k, &w)| (k, w)).collect())
            .unwrap_or_default();
        edges.sort_unstable_by_key(|(k, _)| *k);
        edges
    }

    /// Surface form for a node id
    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        self.table.resolve(id)
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    /// Look up the id a surface string was recorded under (linear scan)
    pub fn find(&self, surface: &str) -> Option<NodeId> {
        self.nodes()
            .into_iter()
            .find(|&id| self.table.resolve(id) == Some(surface))
    }

    fn merge(&mut self, partial: Adjacency) {
        for (from, edges) in partial {
            let node = self.adjacency.entry(from).or_default();
            for (to, weight) in edges {
                *node.entry(to).or_insert(0.0) += weight;
            }
        }
    }
}

/// Sliding-window graph builder
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    window_radius: usize,
    window_center: WindowCenter,
    node_keying: NodeKeying,
    stopwords: Option<&'a StopwordSet>,
}

impl<'a> GraphBuilder<'a> {
    /// Builder with the default window centre and checksum keying
    pub fn new(window_radius: usize) -> Self {
        Self {
            window_radius,
            window_center: WindowCenter::default(),
            node_keying: NodeKeying::default(),
            stopwords: None,
        }
    }

    pub fn from_config(config: &TextRankConfig) -> Self {
        Self::new(config.window_radius)
            .with_window_center(config.window_center)
            .with_node_keying(config.node_keying)
    }

    pub fn with_window_center(mut self, window_center: WindowCenter) -> Self {
        self.window_center = window_center;
        self
    }

    pub fn with_node_keying(mut self, node_keying: NodeKeying) -> Self {
        self.node_keying = node_keying;
        self
    }

    /// Re-check tokens against a stopword set while building
    pub fn with_stopwords(mut self, stopwords: &'a StopwordSet) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    /// Weight of the edge to the token at window offset `offset`
    #[inline]
    pub fn edge_weight(&self, offset: usize) -> f64 {
        let c = self.window_center.offset(self.window_radius);
        c.abs_diff(offset) as f64
    }

    /// Range of valid window centres, empty for short input
    fn center_range(&self, len: usize) -> std::ops::Range<usize> {
        let r = self.window_radius;
        if r == 0 || r.checked_mul(2).map_or(true, |span| len <= span) {
            return 0..0;
        }
        r..len - r
    }

    /// Assign node ids and fill the label table. Stopwords get `None`.
    fn assign_ids(&self, tokens: &[Token], graph: &mut CooccurrenceGraph) -> Vec<Option<NodeId>> {
        let mut keyer = Keyer::new(self.node_keying);
        tokens
            .iter()
            .map(|t| {
                if self.stopwords.is_some_and(|s| s.contains(&t.text)) {
                    return None;
                }
                let id = keyer.node_id(&t.text);
                graph.label(id, &t.text);
                Some(id)
            })
            .collect()
    }

    fn link_windows(&self, ids: &[Option<NodeId>], centers: std::ops::Range<usize>) -> (Adjacency, usize) {
        let r = self.window_radius;
        let mut adjacency = Adjacency::default();
        let mut linked = 0;

        for i in centers {
            let Some(center) = ids[i] else { continue };
            linked += 1;
            for (offset, neighbor) in ids[i - r..=i + r].iter().enumerate() {
                let Some(neighbor) = *neighbor else { continue };
                adjacency.entry(neighbor).or_default();
                *adjacency
                    .entry(center)
                    .or_default()
                    .entry(neighbor)
                    .or_insert(0.0) += self.edge_weight(offset);
            }
        }

        (adjacency, linked)
    }

    /// Build the graph sequentially
    pub fn build(&self, tokens: &[Token]) -> CooccurrenceGraph {
        let mut graph = CooccurrenceGraph::new();
        let centers = self.center_range(tokens.len());
        if centers.is_empty() {
            return graph;
        }

        let ids = self.assign_ids(tokens, &mut graph);
        let (adjacency, linked) = self.link_windows(&ids, centers);
        graph.merge(adjacency);
        graph.centers = linked;

        debug!(
            tokens = tokens.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            centers = linked,
            "built co-occurrence graph"
        );
        graph
    }

    /// Build the graph with windows processed in parallel chunks
    ///
    /// Ids are assigned sequentially and partial adjacencies are merged in
    /// chunk order, so the result equals [`GraphBuilder::build`].
    #[cfg(feature = "parallel")]
    pub fn build_parallel(&self, tokens: &[Token]) -> CooccurrenceGraph {
        if tokens.len() < PARALLEL_THRESHOLD {
            return self.build(tokens);
        }

        let mut graph = CooccurrenceGraph::new();
        let centers = self.center_range(tokens.len());
        if centers.is_empty() {
            return graph;
        }

        let ids = self.assign_ids(tokens, &mut graph);
        let chunk = (centers.len() / rayon::current_num_threads().max(1)).max(256);
        let starts: Vec<usize> = centers.clone().step_by(chunk).collect();

        let partials: Vec<(Adjacency, usize)> = starts
            .par_iter()
            .map(|&start| self.link_windows(&ids, start..(start + chunk).min(centers.end)))
            .collect();

        let mut linked = 0;
        for (adjacency, n) in partials {
            graph.merge(adjacency);
            linked += n;
        }
        graph.centers = linked;

        debug!(
            tokens = tokens.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            centers = linked,
            "built co-occurrence graph in parallel"
        );
        graph
    }

    #[cfg(not(feature = "parallel"))]
    pub fn build_parallel(&self, tokens: &[Token]) -> CooccurrenceGraph {
        self.build(tokens)
    }
}

/// Build a graph with the default window centre and checksum keying
pub fn build_graph(tokens: &[Token], window_radius: usize) -> CooccurrenceGraph {
    GraphBuilder::new(window_radius).build(tokens)
}
