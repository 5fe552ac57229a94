//! Lazy-split insertion.
//!
//! A point descends from the root to the leaf covering it, materializing an
//! empty leaf wherever a branch has no child yet. When that leaf is already
//! taken, the leaf becomes a branch at the same code, its occupant moves one
//! level down, and the descent continues until the point finds an empty leaf.

use crate::core::{Error, Result};
use crate::core::types::Vec3;
use super::location::{octant_of, LocationCode};
use super::node::Node;
use super::tree::Octree;

impl Octree {
    /// Find the leaf covering `position` below `from`.
    ///
    /// The returned leaf is either empty and ready for an object, or occupied
    /// and due for a split. Missing children on the way are created empty.
    pub fn find_leaf(&mut self, from: LocationCode, position: Vec3) -> Result<LocationCode> {
        let child_mask = match self.lookup(from) {
            Some(Node::Leaf(_)) => return Ok(from),
            Some(Node::Branch(branch)) => branch.child_mask,
            None => {
                return Err(Error::InconsistentState(format!(
                    "descent reached missing node {}",
                    from
                )));
            }
        };

        let octant = octant_of(self.node_center(from), position);
        if child_mask & (1 << octant) != 0 {
            self.find_leaf(from.child(octant), position)
        } else {
            self.make_leaf(Some(from), octant, None)
        }
    }

    /// Replace the occupied leaf at `leaf` with a branch and move its object
    /// into the child covering that object's position.
    ///
    /// Returns the code of the new branch, which is the code of the old leaf.
    /// Fails with [`Error::DepthExceeded`] without touching the tree when the
    /// leaf is already at the maximum depth.
    pub fn split_leaf(&mut self, leaf: LocationCode, positions: &[Vec3]) -> Result<LocationCode> {
        let object = match self.lookup(leaf) {
            Some(Node::Leaf(occupied)) => occupied.object.ok_or_else(|| {
                Error::InconsistentState(format!("split of empty leaf {}", leaf))
            })?,
            Some(Node::Branch(_)) => {
                return Err(Error::InconsistentState(format!("split of branch {}", leaf)));
            }
            None => {
                return Err(Error::InconsistentState(format!("split of missing leaf {}", leaf)));
            }
        };
        let depth = leaf.depth();
        if depth >= self.max_depth() {
            return Err(Error::DepthExceeded { depth });
        }
        let position = position_of(positions, object)?;

        self.free_leaf(leaf);
        self.make_branch(leaf)?;
        let moved_to = self.find_leaf(leaf, position)?;
        self.assign_object(moved_to, object)?;

        log::trace!("Split leaf {} at depth {}: object {} moved to {}", leaf, depth, object, moved_to);
        Ok(leaf)
    }

    /// Insert every position, in order, as object `index`.
    pub(super) fn insert_batch(&mut self, positions: &[Vec3]) -> Result<()> {
        let mut splits = 0usize;
        for (index, &position) in positions.iter().enumerate() {
            let mut leaf = self.find_leaf(LocationCode::ROOT, position)?;
            while let Some(existing) = self.lookup(leaf).and_then(Node::object) {
                if position_of(positions, existing)? == position {
                    return Err(Error::DuplicatePosition { existing, incoming: index });
                }
                let branch = self.split_leaf(leaf, positions)?;
                splits += 1;
                leaf = self.find_leaf(branch, position)?;
            }
            self.assign_object(leaf, index)?;
        }

        log::debug!(
            "Built octree from {} objects: {} leaves, {} branches, {} splits",
            positions.len(),
            self.leaf_count(),
            self.branch_count(),
            splits
        );
        Ok(())
    }
}

fn position_of(positions: &[Vec3], object: usize) -> Result<Vec3> {
    positions.get(object).copied().ok_or(Error::MissingPosition {
        object,
        len: positions.len(),
    })
}
