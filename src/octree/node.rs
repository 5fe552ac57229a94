//! Octree nodes
//!
//! Nodes never point at each other. A branch records which of its eight
//! children exist in `child_mask`; the children themselves are found by
//! deriving their location codes.

use super::location::LocationCode;

/// A leaf holds at most one object, by index into the positions of the build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub code: LocationCode,
    /// None while the leaf is reserved but not yet filled
    pub object: Option<usize>,
}

impl Leaf {
    pub fn new(code: LocationCode, object: Option<usize>) -> Self {
        Self { code, object }
    }

    pub fn is_empty(&self) -> bool {
        self.object.is_none()
    }
}

/// An inner node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub code: LocationCode,
    /// Which of 8 children exist (bit i = child i present)
    pub child_mask: u8,
}

impl Branch {
    pub fn new(code: LocationCode) -> Self {
        Self { code, child_mask: 0 }
    }

    pub fn has_child(&self, octant: u8) -> bool {
        debug_assert!(octant < 8);
        (self.child_mask >> octant) & 1 != 0
    }

    pub fn set_child(&mut self, octant: u8) {
        debug_assert!(octant < 8);
        self.child_mask |= 1 << octant;
    }

    pub fn child_count(&self) -> u32 {
        self.child_mask.count_ones()
    }

    /// Codes of the existing children, in octant order.
    pub fn child_codes(&self) -> impl DoubleEndedIterator<Item = LocationCode> + '_ {
        (0..8u8)
            .filter(|&octant| self.has_child(octant))
            .map(|octant| self.code.child(octant))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Branch(Branch),
}

impl Node {
    pub fn code(&self) -> LocationCode {
        match self {
            Node::Leaf(leaf) => leaf.code,
            Node::Branch(branch) => branch.code,
        }
    }

    pub fn depth(&self) -> u32 {
        self.code().depth()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    /// Object held by a leaf; None for branches and empty leaves.
    pub fn object(&self) -> Option<usize> {
        self.as_leaf().and_then(|leaf| leaf.object)
    }
}
