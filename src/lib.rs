//! Loctree - a sparse point-region octree addressed by location codes
//!
//! Points are placed one per leaf. Nodes exist only where a point needed
//! separating from another, and every node is found by its location code
//! rather than through pointers.

pub mod core;
pub mod math;
pub mod octree;

pub use crate::core::{Error, Result};
pub use octree::{LocationCode, Node, Octree, OctreeConfig};
