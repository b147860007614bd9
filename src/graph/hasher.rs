//! Node identity
//!
//! Canonical token strings become small integer node keys. The default
//! keying is a CRC-32 checksum, which is not collision-free: two distinct
//! tokens can share an id, in which case [`NodeTable`] keeps the surface
//! form seen last. [`InterningHasher`] trades a string map for exact ids.

use rustc_hash::FxHashMap;

use crate::config::NodeKeying;
use crate::types::NodeId;

/// Maps canonical token strings to node ids
pub trait IdentityHasher {
    fn node_id(&mut self, token: &str) -> NodeId;
}

/// CRC-32 over the token's UTF-8 bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecksumHasher;

impl ChecksumHasher {
    #[inline]
    pub fn checksum(token: &str) -> NodeId {
        crc32fast::hash(token.as_bytes())
    }
}

impl IdentityHasher for ChecksumHasher {
    #[inline]
    fn node_id(&mut self, token: &str) -> NodeId {
        Self::checksum(token)
    }
}

/// Dense ids in first-seen order, one per distinct string
#[derive(Debug, Clone, Default)]
pub struct InterningHasher {
    ids: FxHashMap<String, NodeId>,
}

impl InterningHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl IdentityHasher for InterningHasher {
    fn node_id(&mut self, token: &str) -> NodeId {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = self.ids.len() as NodeId;
        self.ids.insert(token.to_string(), id);
        id
    }
}

/// A hasher chosen at runtime from [`NodeKeying`]
#[derive(Debug, Clone)]
pub enum Keyer {
    Checksum(ChecksumHasher),
    Exact(InterningHasher),
}

impl Keyer {
    pub fn new(keying: NodeKeying) -> Self {
        match keying {
            NodeKeying::Checksum => Keyer::Checksum(ChecksumHasher),
            NodeKeying::Exact => Keyer::Exact(InterningHasher::new()),
        }
    }
}

impl IdentityHasher for Keyer {
    #[inline]
    fn node_id(&mut self, token: &str) -> NodeId {
        match self {
            Keyer::Checksum(h) => h.node_id(token),
            Keyer::Exact(h) => h.node_id(token),
        }
    }
}

/// Lossy id -> surface table, last write wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    labels: FxHashMap<NodeId, String>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Record `surface` for `id`, overwriting any earlier entry
    pub fn record(&mut self, id: NodeId, surface: &str) {
        match self.labels.get_mut(&id) {
            Some(existing) if existing.as_str() == surface => {}
            Some(existing) => {
                existing.clear();
                existing.push_str(surface);
            }
            None => {
                self.labels.insert(id, surface.to_string());
            }
        }
    }

    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
