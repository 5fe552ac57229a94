//! Location codes: the path from the root to a node packed into one integer.
//!
//! The root is `1`, a sentinel bit with no octant bits below it. Each level
//! appends three bits, one per axis (bit 0 = x, bit 1 = y, bit 2 = z; a set
//! bit selects the high half). Printed in octal, a code reads as the sentinel
//! followed by one digit per level.

use std::fmt;

use crate::core::{Error, Result};
use crate::core::types::{UVec3, Vec3};
use crate::math::morton;

/// Deepest level a 64-bit code can address (1 sentinel bit + 21 * 3 octant bits).
pub const MAX_DEPTH: u32 = 21;

/// Depth of a raw code. Zero carries no sentinel bit and is rejected.
pub fn depth(code: u64) -> Result<u32> {
    if code == 0 {
        return Err(Error::InvalidCode(code));
    }
    Ok((63 - code.leading_zeros()) / 3)
}

/// Append an octant to a raw code.
///
/// Codes deeper than [`MAX_DEPTH`] overflow; use [`LocationCode::checked_child`]
/// where that can happen.
pub fn child_code(parent: u64, octant: u8) -> u64 {
    debug_assert!(octant < 8, "octant {} out of range", octant);
    (parent << 3) | (octant & 0b111) as u64
}

/// Strip the last octant from a raw code. The root yields `0`, which never names a node.
pub fn parent_code(code: u64) -> u64 {
    code >> 3
}

/// Geometric center of the node at `code` in an octree centered on `center`
/// with half-extent `size`.
pub fn node_center(center: Vec3, size: f32, code: u64) -> Result<Vec3> {
    Ok(LocationCode::from_raw(code)?.center(center, size))
}

/// Octant of `position` relative to a node center. Ties go to the high half.
pub fn octant_of(center: Vec3, position: Vec3) -> u8 {
    (if position.x >= center.x { 1 } else { 0 })
        | (if position.y >= center.y { 2 } else { 0 })
        | (if position.z >= center.z { 4 } else { 0 })
}

/// A validated, non-zero location code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct LocationCode(u64);

impl LocationCode {
    pub const ROOT: Self = Self(1);

    pub fn from_raw(raw: u64) -> Result<Self> {
        if raw == 0 {
            return Err(Error::InvalidCode(raw));
        }
        Ok(Self(raw))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    pub fn depth(self) -> u32 {
        (63 - self.0.leading_zeros()) / 3
    }

    /// Code of the child in `octant`.
    ///
    /// # Panics
    /// In debug builds, if `self` is already at [`MAX_DEPTH`].
    pub fn child(self, octant: u8) -> Self {
        debug_assert!(self.depth() < MAX_DEPTH, "location code {} is at maximum depth", self);
        Self(child_code(self.0, octant))
    }

    /// Code of the child in `octant`, or None past [`MAX_DEPTH`].
    pub fn checked_child(self, octant: u8) -> Option<Self> {
        (self.depth() < MAX_DEPTH && octant < 8).then(|| Self(child_code(self.0, octant)))
    }

    /// Code of the parent; None for the root.
    pub fn parent(self) -> Option<Self> {
        match parent_code(self.0) {
            0 => None,
            raw => Some(Self(raw)),
        }
    }

    /// Index of this node within its parent; None for the root.
    pub fn octant(self) -> Option<u8> {
        (!self.is_root()).then(|| (self.0 & 0b111) as u8)
    }

    /// Octant taken at `level` (1 = the root's child) on the way to this node.
    pub fn octant_at(self, level: u32) -> Option<u8> {
        let depth = self.depth();
        (level >= 1 && level <= depth).then(|| ((self.0 >> (3 * (depth - level))) & 0b111) as u8)
    }

    /// Code of the cell at `cell` on the `2^depth` grid covering the octree.
    pub fn from_cell(depth: u32, cell: UVec3) -> Option<Self> {
        if depth > MAX_DEPTH {
            return None;
        }
        let side = 1u64 << depth;
        if cell.to_array().iter().any(|&c| c as u64 >= side) {
            return None;
        }
        Some(Self((1u64 << (3 * depth)) | morton::encode(cell)))
    }

    /// Integer cell coordinates of this node on the `2^depth` grid.
    pub fn cell(self) -> UVec3 {
        let depth = self.depth();
        morton::decode(self.0 & !(1u64 << (3 * depth)))
    }

    /// Node center, nudged by `size / 2^k` at every level `k` from the root down.
    pub fn center(self, center: Vec3, size: f32) -> Vec3 {
        let depth = self.depth();
        let mut position = center;
        let mut offset = size;
        for level in 1..=depth {
            offset *= 0.5;
            let octant = ((self.0 >> (3 * (depth - level))) & 0b111) as u8;
            position += Vec3::new(
                if octant & 1 != 0 { offset } else { -offset },
                if octant & 2 != 0 { offset } else { -offset },
                if octant & 4 != 0 { offset } else { -offset },
            );
        }
        position
    }

    /// Half-extent of this node in an octree of half-extent `size`.
    pub fn half_extent(self, size: f32) -> f32 {
        size / (1u64 << self.depth()) as f32
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

impl From<LocationCode> for u64 {
    fn from(code: LocationCode) -> u64 {
        code.0
    }
}

impl TryFrom<u64> for LocationCode {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_codes() -> Vec<u64> {
        vec![1, 0o12, 0o1777, 0o1_0123_4567, 1u64 << 60]
    }

    #[test]
    fn test_depth_of_root_and_zero() {
        assert_eq!(depth(1).unwrap(), 0);
        assert!(matches!(depth(0), Err(Error::InvalidCode(0))));
        assert_eq!(depth(0o17).unwrap(), 1);
        assert_eq!(depth(u64::MAX).unwrap(), MAX_DEPTH);
    }

    #[test]
    fn test_child_adds_one_level() {
        for code in sample_codes() {
            for octant in 0..8 {
                let child = child_code(code, octant);
                assert_eq!(depth(child).unwrap(), depth(code).unwrap() + 1, "code {:o} octant {}", code, octant);
                assert_eq!(parent_code(child), code);
            }
        }
    }

    #[test]
    fn test_root_has_no_parent() {
        assert_eq!(parent_code(1), 0);
        assert_eq!(LocationCode::ROOT.parent(), None);
        assert_eq!(LocationCode::ROOT.octant(), None);
    }

    #[test]
    fn test_from_raw_rejects_zero() {
        assert!(matches!(LocationCode::from_raw(0), Err(Error::InvalidCode(0))));
        assert!(LocationCode::try_from(0o15).is_ok());
    }

    #[test]
    fn test_checked_child_stops_at_max_depth() {
        let mut code = LocationCode::ROOT;
        for _ in 0..MAX_DEPTH {
            code = code.checked_child(7).unwrap();
        }
        assert_eq!(code.depth(), MAX_DEPTH);
        assert_eq!(code.raw(), u64::MAX);
        assert_eq!(code.checked_child(0), None);
        assert_eq!(LocationCode::ROOT.checked_child(8), None);
    }

    #[test]
    fn test_octant_path() {
        let code = LocationCode::ROOT.child(5).child(2).child(7);
        assert_eq!(code.to_string(), "1527");
        assert_eq!(code.octant(), Some(7));
        assert_eq!(code.octant_at(1), Some(5));
        assert_eq!(code.octant_at(2), Some(2));
        assert_eq!(code.octant_at(3), Some(7));
        assert_eq!(code.octant_at(0), None);
        assert_eq!(code.octant_at(4), None);
    }

    #[test]
    fn test_cell_matches_morton_payload() {
        let code = LocationCode::from_cell(2, UVec3::new(3, 0, 1)).unwrap();
        // Level 1 takes the high bit of each axis, level 2 the low bit
        assert_eq!(code, LocationCode::ROOT.child(0b001).child(0b101));
        assert_eq!(code.cell(), UVec3::new(3, 0, 1));
        assert_eq!(LocationCode::ROOT.cell(), UVec3::ZERO);
        assert_eq!(LocationCode::from_cell(2, UVec3::new(4, 0, 0)), None);
        assert_eq!(LocationCode::from_cell(MAX_DEPTH + 1, UVec3::ZERO), None);
    }

    #[test]
    fn test_root_center_is_octree_center() {
        let center = Vec3::new(100.0, 101.0, 102.0);
        assert_eq!(node_center(center, 100.0, 1).unwrap(), center);
        assert!(node_center(center, 100.0, 0).is_err());
    }

    #[test]
    fn test_center_halves_offset_per_level() {
        let code = LocationCode::ROOT.child(0b111).child(0b000).child(0b001);
        let center = code.center(Vec3::ZERO, 8.0);
        // +4, then -2, then +1/-1/-1
        assert_eq!(center, Vec3::new(3.0, 1.0, 1.0));
        assert_eq!(code.half_extent(8.0), 1.0);
    }

    #[test]
    fn test_octant_ties_go_high() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(octant_of(center, center), 0b111);
        assert_eq!(octant_of(center, Vec3::new(0.0, 2.0, 3.0)), 0b110);
        assert_eq!(octant_of(center, Vec3::ZERO), 0);
    }
}
