//! Mathematical utilities

pub mod aabb;
pub mod morton;

pub use aabb::Aabb;
