//! Broad-phase spatial queries for neighbor detection.
//!
//! Candidate neighbors are gathered with a conservative axis-aligned bound
//! around a block's oriented collider, expanded by a small positive padding
//! so exact face contact is caught. False positives (diagonal or
//! edge-touching colliders) survive the broad phase and are rejected later
//! by the face-alignment test.

use glam::{Quat, Vec3};

/// Padding added to a neighbor query box so exact face contact registers.
pub const CONTACT_PADDING: f32 = 0.002;

/// Shrink applied when probing a candidate placement for illegal overlap, so
/// flush face contact with existing blocks does not count as a collision.
pub const OVERLAP_SHRINK: f32 = 0.002;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Conservative bound of an oriented box: rotate the eight corners and
    /// take component-wise extremes.
    pub fn from_oriented_box(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        let corners = [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for corner in corners {
            let world = center + rotation * (corner * half_extents);
            min = min.min(world);
            max = max.max(world);
        }

        Self { min, max }
    }

    /// Grows (or shrinks, for negative `amount`) the box on every side.
    pub fn expanded(self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
