//! Axis-aligned bounding box

use crate::core::types::Vec3;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube around `center` reaching `half_extent` along every axis
    pub fn cube(center: Vec3, half_extent: f32) -> Self {
        let half = Vec3::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if point is inside the box, faces included
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Sub-box for an octant index (bit 0=x, bit 1=y, bit 2=z, set = high half)
    pub fn child_octant(&self, octant: u8) -> Aabb {
        debug_assert!(octant < 8);
        let center = self.center();
        let quarter = self.half_extent() * 0.5;
        let offset = Vec3::new(
            if octant & 1 != 0 { quarter.x } else { -quarter.x },
            if octant & 2 != 0 { quarter.y } else { -quarter.y },
            if octant & 4 != 0 { quarter.z } else { -quarter.z },
        );
        let child_center = center + offset;
        Aabb::new(child_center - quarter, child_center + quarter)
    }
}
