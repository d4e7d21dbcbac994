//! Ship containers: rigid aggregates of connected blocks.

use std::collections::HashSet;

use glam::{Quat, Vec3};

use super::types::BlockHandle;
use crate::physics::RigidBody;

/// World transform of a ship's frame.
///
/// Identity at creation; only the external physics engine moves it
/// afterwards, so in a fresh (or headless) world ship-local and world
/// coordinates coincide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for ShipTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ShipTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// World point into the ship's local frame.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.translation)
    }

    /// Ship-local point into the world frame.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.rotation * local + self.translation
    }
}

/// A rigid aggregate of one or more mutually connected blocks.
///
/// Membership, mass, and center of mass are maintained incrementally by the
/// manager; a ship that loses its last member is destroyed immediately.
#[derive(Debug, Clone)]
pub struct Ship {
    pub transform: ShipTransform,
    pub(crate) body: RigidBody,
    pub(crate) members: HashSet<BlockHandle>,
}

impl Ship {
    pub(crate) fn new() -> Self {
        Self {
            transform: ShipTransform::IDENTITY,
            body: RigidBody::new(),
            members: HashSet::new(),
        }
    }

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Total mass, the sum of every member block's type weight.
    pub fn mass(&self) -> f32 {
        self.body.mass()
    }

    /// Mass-weighted center of the members, in the ship's local frame.
    pub fn center_of_mass(&self) -> Vec3 {
        self.body.center_of_mass()
    }

    /// Center of mass in the world frame.
    pub fn world_center_of_mass(&self) -> Vec3 {
        self.transform.to_world(self.body.center_of_mass())
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, handle: BlockHandle) -> bool {
        self.members.contains(&handle)
    }

    /// Member handles in arbitrary order.
    pub fn members(&self) -> impl Iterator<Item = BlockHandle> + '_ {
        self.members.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_roundtrip() {
        let t = ShipTransform::IDENTITY;
        let p = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(t.to_local(p), p);
        assert_eq!(t.to_world(p), p);
    }

    #[test]
    fn moved_transform_maps_points() {
        let t = ShipTransform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        };
        let world = t.to_world(Vec3::Z);
        let back = t.to_local(world);
        assert!((back - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn new_ship_is_empty() {
        let ship = Ship::new();
        assert_eq!(ship.member_count(), 0);
        assert_eq!(ship.mass(), 0.0);
        assert!(ship.body().is_asleep());
    }
}
