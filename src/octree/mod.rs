//! Sparse point-region octree addressed by location codes.
//!
//! Nodes live in a [`NodeStore`] keyed by [`LocationCode`]; navigation between
//! parents and children is pure arithmetic on codes followed by a lookup.

pub mod config;
pub mod insert;
pub mod location;
pub mod node;
pub mod store;
pub mod tree;
pub mod visit;

pub use config::OctreeConfig;
pub use location::{LocationCode, MAX_DEPTH};
pub use node::{Branch, Leaf, Node};
pub use store::NodeStore;
pub use tree::{Octree, OctreeStats};
pub use visit::VisitAll;
