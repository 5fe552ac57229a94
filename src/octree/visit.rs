//! Depth-first traversal over stored nodes.

use super::location::LocationCode;
use super::node::Node;
use super::store::NodeStore;

/// Lazy pre-order walk: a node, then the subtrees of its existing children
/// in octant order. Only children flagged in a branch's mask are visited.
pub struct VisitAll<'a> {
    nodes: &'a NodeStore,
    stack: Vec<LocationCode>,
}

impl<'a> VisitAll<'a> {
    /// Start at `from`. An absent start yields nothing.
    pub fn new(nodes: &'a NodeStore, from: LocationCode) -> Self {
        Self { nodes, stack: vec![from] }
    }
}

impl<'a> Iterator for VisitAll<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        while let Some(code) = self.stack.pop() {
            let Some(node) = self.nodes.get(code) else {
                continue;
            };
            if let Node::Branch(branch) = node {
                self.stack.extend(branch.child_codes().rev());
            }
            return Some(node);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::octree::Octree;

    fn codes(iter: VisitAll<'_>) -> Vec<u64> {
        iter.map(|node| node.code().raw()).collect()
    }

    #[test]
    fn test_single_leaf() {
        let tree = Octree::new(Vec3::ZERO, 10.0).unwrap();
        assert_eq!(codes(tree.visit_all(LocationCode::ROOT)), vec![1]);
    }

    #[test]
    fn test_pre_order() {
        let mut tree = Octree::new(Vec3::ZERO, 8.0).unwrap();
        tree.build(&[
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(-5.0, -5.0, -5.0),
            Vec3::new(3.0, 3.0, 3.0),
        ])
        .unwrap();

        // Root, then octant 0, then octant 7 and its two children
        assert_eq!(codes(tree.visit_all(LocationCode::ROOT)), vec![0o1, 0o10, 0o17, 0o170, 0o177]);
        // Restart from a subtree
        assert_eq!(codes(tree.visit_all(LocationCode::ROOT.child(7))), vec![0o17, 0o170, 0o177]);
        assert_eq!(tree.visit_all(LocationCode::ROOT.child(7)).count(), 3);
    }

    #[test]
    fn test_absent_start_is_empty() {
        let tree = Octree::new(Vec3::ZERO, 10.0).unwrap();
        assert_eq!(tree.visit_all(LocationCode::ROOT.child(2)).count(), 0);
    }

    #[test]
    fn test_visits_every_stored_node() {
        let positions: Vec<Vec3> = (0..64)
            .map(|i| Vec3::new((i % 4) as f32, ((i / 4) % 4) as f32, (i / 16) as f32) * 10.0 - 15.0)
            .collect();
        let mut tree = Octree::new(Vec3::ZERO, 20.0).unwrap();
        tree.build(&positions).unwrap();

        assert_eq!(tree.visit_all(LocationCode::ROOT).count(), tree.node_count());
        let objects = tree.visit_all(LocationCode::ROOT).filter(|node| node.object().is_some()).count();
        assert_eq!(objects, positions.len());
    }
}
