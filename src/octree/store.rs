//! Node store: every node of an octree, keyed by location code.

use std::collections::HashMap;

use crate::core::Result;
use super::location::LocationCode;
use super::node::Node;

/// Owns the nodes of one octree. Iteration order is unspecified.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
    nodes: HashMap<LocationCode, Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut nodes = HashMap::new();
        nodes.try_reserve(capacity)?;
        Ok(Self { nodes })
    }

    /// Insert `node` under its own code, returning the node it replaced.
    pub fn put(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.code(), node)
    }

    pub fn get(&self, code: LocationCode) -> Option<&Node> {
        self.nodes.get(&code)
    }

    pub fn get_mut(&mut self, code: LocationCode) -> Option<&mut Node> {
        self.nodes.get_mut(&code)
    }

    pub fn remove(&mut self, code: LocationCode) -> Option<Node> {
        self.nodes.remove(&code)
    }

    pub fn contains(&self, code: LocationCode) -> bool {
        self.nodes.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
