//! Sparse point-region octree container

use crate::core::{Error, Result};
use crate::core::types::Vec3;
use crate::math::Aabb;
use super::config::OctreeConfig;
use super::location::LocationCode;
use super::node::{Branch, Leaf, Node};
use super::store::NodeStore;
use super::visit::VisitAll;

/// Summary of an octree's shape
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
    pub leaves: usize,
    pub empty_leaves: usize,
    pub branches: usize,
    pub objects: usize,
    /// Depth of the deepest node
    pub depth: u32,
    /// Leaf count per depth, index = depth
    pub leaves_per_depth: Vec<usize>,
}

/// Sparse octree placing one point object per leaf.
///
/// Only nodes that exist are stored, keyed by [`LocationCode`]. The root always
/// lives under [`LocationCode::ROOT`]: it starts as an empty leaf and turns into
/// a branch the first time two objects have to be separated.
///
/// Mutation needs `&mut self`, so a shared octree is read-only for every holder.
/// Dropping the octree releases all nodes; the caller's positions are never owned.
#[derive(Clone, Debug)]
pub struct Octree {
    nodes: NodeStore,
    /// Center of the root cube
    center: Vec3,
    /// Half-extent of the root cube
    size: f32,
    max_depth: u32,
    leaf_count: usize,
    branch_count: usize,
    /// Objects currently held by leaves
    object_count: usize,
}

impl Octree {
    /// Create an octree holding a single empty root leaf.
    pub fn new(center: Vec3, size: f32) -> Result<Self> {
        Self::with_config(&OctreeConfig::new(center, size))
    }

    pub fn with_config(config: &OctreeConfig) -> Result<Self> {
        config.validate()?;
        let mut tree = Self {
            nodes: NodeStore::with_capacity(config.capacity_hint)?,
            center: config.center(),
            size: config.size,
            max_depth: config.max_depth,
            leaf_count: 0,
            branch_count: 0,
            object_count: 0,
        };
        tree.make_leaf(None, 0, None)?;
        Ok(tree)
    }

    /// Place every position in its own leaf, splitting leaves as needed.
    ///
    /// Object `i` is `positions[i]`. The slice is only borrowed for the call.
    /// Fails with [`Error::AlreadyBuilt`] if objects from an earlier build are
    /// still placed; use [`Octree::rebuild`] to start over. On any other error
    /// the objects before the failing one stay placed and the tree stays consistent.
    pub fn build(&mut self, positions: &[Vec3]) -> Result<()> {
        if self.object_count > 0 {
            return Err(Error::AlreadyBuilt);
        }
        self.insert_batch(positions)
    }

    /// Clear, then build from `positions`.
    pub fn rebuild(&mut self, positions: &[Vec3]) -> Result<()> {
        self.clear()?;
        self.build(positions)
    }

    /// Drop every node and start again from an empty root leaf.
    pub fn clear(&mut self) -> Result<()> {
        log::debug!(
            "Clearing octree: {} leaves, {} branches",
            self.leaf_count, self.branch_count
        );
        self.nodes.clear();
        self.leaf_count = 0;
        self.branch_count = 0;
        self.object_count = 0;
        self.make_leaf(None, 0, None)?;
        Ok(())
    }

    /// Insert an empty branch at `code`.
    pub(crate) fn make_branch(&mut self, code: LocationCode) -> Result<LocationCode> {
        if self.nodes.contains(code) {
            return Err(Error::InconsistentState(format!("node {} already exists", code)));
        }
        self.nodes.put(Node::Branch(Branch::new(code)));
        self.branch_count += 1;
        Ok(code)
    }

    /// Insert a leaf in `octant` of the branch at `parent`, or at the root when
    /// `parent` is None (`octant` is then ignored).
    pub(crate) fn make_leaf(
        &mut self,
        parent: Option<LocationCode>,
        octant: u8,
        object: Option<usize>,
    ) -> Result<LocationCode> {
        let code = match parent {
            None => LocationCode::ROOT,
            Some(parent) => parent.checked_child(octant).ok_or(Error::DepthExceeded {
                depth: parent.depth() + 1,
            })?,
        };
        if self.nodes.contains(code) {
            return Err(Error::InconsistentState(format!("node {} already exists", code)));
        }

        if let Some(parent) = parent {
            match self.nodes.get_mut(parent) {
                Some(Node::Branch(branch)) => branch.set_child(octant),
                Some(Node::Leaf(_)) => {
                    return Err(Error::InconsistentState(format!(
                        "parent {} of new leaf {} is a leaf",
                        parent, code
                    )));
                }
                None => {
                    return Err(Error::InconsistentState(format!(
                        "parent {} of new leaf {} is missing",
                        parent, code
                    )));
                }
            }
        }

        self.nodes.put(Node::Leaf(Leaf::new(code, object)));
        self.leaf_count += 1;
        if object.is_some() {
            self.object_count += 1;
        }
        Ok(code)
    }

    /// Remove the leaf at `code`. Nothing is removed if it is absent or a branch.
    pub(crate) fn free_leaf(&mut self, code: LocationCode) -> Option<Leaf> {
        if !self.nodes.get(code).is_some_and(Node::is_leaf) {
            return None;
        }
        let Some(Node::Leaf(leaf)) = self.nodes.remove(code) else {
            return None;
        };
        self.leaf_count -= 1;
        if leaf.object.is_some() {
            self.object_count -= 1;
        }
        Some(leaf)
    }

    /// Remove the branch at `code`. Nothing is removed if it is absent or a leaf.
    pub(crate) fn free_branch(&mut self, code: LocationCode) -> Option<Branch> {
        if !self.nodes.get(code).is_some_and(Node::is_branch) {
            return None;
        }
        let Some(Node::Branch(branch)) = self.nodes.remove(code) else {
            return None;
        };
        self.branch_count -= 1;
        Some(branch)
    }

    /// Put `object` into the empty leaf at `code`.
    pub(crate) fn assign_object(&mut self, code: LocationCode, object: usize) -> Result<()> {
        match self.nodes.get_mut(code) {
            Some(Node::Leaf(leaf)) if leaf.is_empty() => {
                leaf.object = Some(object);
                self.object_count += 1;
                Ok(())
            }
            Some(Node::Leaf(leaf)) => Err(Error::InconsistentState(format!(
                "leaf {} already holds object {:?}",
                code, leaf.object
            ))),
            Some(Node::Branch(_)) => Err(Error::InconsistentState(format!(
                "cannot assign object {} to branch {}",
                object, code
            ))),
            None => Err(Error::InconsistentState(format!(
                "cannot assign object {} to missing leaf {}",
                object, code
            ))),
        }
    }

    /// The root node, read from the store under [`LocationCode::ROOT`].
    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(LocationCode::ROOT)
    }

    pub fn lookup(&self, code: LocationCode) -> Option<&Node> {
        self.nodes.get(code)
    }

    pub fn parent(&self, node: &Node) -> Option<&Node> {
        node.code().parent().and_then(|parent| self.lookup(parent))
    }

    pub fn child(&self, code: LocationCode, octant: u8) -> Option<&Node> {
        code.checked_child(octant).and_then(|child| self.lookup(child))
    }

    /// Depth-first, pre-order walk of the subtree at `from`.
    pub fn visit_all(&self, from: LocationCode) -> VisitAll<'_> {
        VisitAll::new(&self.nodes, from)
    }

    /// Leaf currently holding `object`. Scans every node.
    pub fn leaf_of(&self, object: usize) -> Option<&Leaf> {
        self.nodes
            .iter()
            .filter_map(Node::as_leaf)
            .find(|leaf| leaf.object == Some(object))
    }

    pub fn node_center(&self, code: LocationCode) -> Vec3 {
        code.center(self.center, self.size)
    }

    pub fn node_bounds(&self, code: LocationCode) -> Aabb {
        Aabb::cube(self.node_center(code), code.half_extent(self.size))
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.center, self.size)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn branch_count(&self) -> usize {
        self.branch_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Depth of the deepest node.
    pub fn tree_depth(&self) -> u32 {
        self.nodes.iter().map(Node::depth).max().unwrap_or(0)
    }

    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats::default();
        for node in self.nodes.iter() {
            let depth = node.depth();
            stats.depth = stats.depth.max(depth);
            match node {
                Node::Branch(_) => stats.branches += 1,
                Node::Leaf(leaf) => {
                    stats.leaves += 1;
                    if leaf.is_empty() {
                        stats.empty_leaves += 1;
                    } else {
                        stats.objects += 1;
                    }
                    if stats.leaves_per_depth.len() <= depth as usize {
                        stats.leaves_per_depth.resize(depth as usize + 1, 0);
                    }
                    stats.leaves_per_depth[depth as usize] += 1;
                }
            }
        }
        stats
    }
}
