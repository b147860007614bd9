//! Graph construction and representation
//!
//! This module provides node keying, co-occurrence graph building and the
//! CSR layout the ranker iterates over.

pub mod builder;
pub mod csr;
pub mod hasher;

pub use builder::{build_graph, CooccurrenceGraph, GraphBuilder};
pub use csr::CsrGraph;
pub use hasher::{ChecksumHasher, IdentityHasher, InterningHasher, NodeTable};
