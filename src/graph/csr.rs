//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is exactly what
//! PageRank needs during power iteration. Node ids are remapped to dense
//! indices in ascending id order so iteration order, and therefore floating
//! point summation order, is fixed.

use rustc_hash::FxHashMap;

use super::builder::CooccurrenceGraph;
use crate::types::NodeId;

/// A graph in Compressed Sparse Row format
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (dense target indices) for each edge
    pub col_idx: Vec<u32>,
    /// Edge weights
    pub weights: Vec<f64>,
    /// Total outgoing weight for each node
    pub total_weight: Vec<f64>,
    /// Original node id for each dense index
    pub node_ids: Vec<NodeId>,
}

impl CsrGraph {
    /// Convert a co-occurrence graph into CSR format
    pub fn from_graph(graph: &CooccurrenceGraph) -> Self {
        let node_ids = graph.nodes();
        let num_nodes = node_ids.len();
        let index: FxHashMap<NodeId, u32> = node_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i as u32))
            .collect();

        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(graph.edge_count());
        let mut weights = Vec::with_capacity(graph.edge_count());
        let mut total_weight = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for &id in &node_ids {
            // out_edges is sorted by target id, which is also dense order
            let edges = graph.out_edges(id);
            total_weight.push(edges.iter().map(|(_, w)| w).sum());

            for (target, weight) in edges {
                col_idx.push(index[&target]);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            total_weight,
            node_ids,
        }
    }

    /// Iterate over neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: u32) -> usize {
        self.row_ptr[node as usize + 1] - self.row_ptr[node as usize]
    }

    /// Get the total outgoing weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Original node id of a dense index
    pub fn node_id(&self, node: u32) -> NodeId {
        self.node_ids[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Number of stored directed edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Nodes that cannot pass score along: no out-edges, or only
    /// zero-weight ones
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.total_weight[n as usize] <= 0.0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
            node_ids: Vec::new(),
        }
    }
}
