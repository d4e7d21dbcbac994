//! Mass-property view of a ship's dynamic body.

use glam::Vec3;

/// Rigid-body handle owned by each ship.
///
/// The aggregation core is the only writer of mass and center of mass; the
/// external physics engine reads them and owns the sleep state between
/// edits. Center of mass is expressed in the ship's local frame.
#[derive(Debug, Clone)]
pub struct RigidBody {
    mass: f32,
    center_of_mass: Vec3,
    asleep: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// A fresh body: no mass yet, asleep until the first mass write.
    pub fn new() -> Self {
        Self {
            mass: 0.0,
            center_of_mass: Vec3::ZERO,
            asleep: true,
        }
    }

    /// Total mass in kilograms.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Center of mass in the ship's local frame.
    pub fn center_of_mass(&self) -> Vec3 {
        self.center_of_mass
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Marks the body active so the engine recomputes dynamics from the new
    /// mass distribution. Called after every mass/COM change.
    pub fn wake(&mut self) {
        self.asleep = false;
    }

    /// Lets the external engine park the body again once it settles.
    pub fn sleep(&mut self) {
        self.asleep = true;
    }

    pub(crate) fn set_mass_properties(&mut self, mass: f32, center_of_mass: Vec3) {
        self.mass = mass;
        self.center_of_mass = center_of_mass;
    }
}
