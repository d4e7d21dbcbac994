//! Incremental mass and center-of-mass bookkeeping.
//!
//! Both directions update the running mass-weighted average instead of
//! recomputing over the whole membership:
//!
//! ```text
//! add:    com' = (com * m + sum(local_i * w_i)) / m'
//! remove: com' = (com * m - sum(local_i * w_i)) / m'
//! ```
//!
//! Positions arrive in world space and are folded into the ship's local
//! frame; every change wakes the rigid body so the physics engine picks up
//! the new mass distribution.

use glam::Vec3;

use super::ship::Ship;

/// Below this the ship is considered massless; the caller destroys it (or is
/// about to refill it) instead of dividing by zero.
const MIN_SHIP_MASS: f32 = 1e-6;

/// Adds `(world position, weight)` entries to the ship's mass books.
/// The blocks must not already be counted.
pub(crate) fn add_block_weights(ship: &mut Ship, entries: impl IntoIterator<Item = (Vec3, f32)>) {
    let mut mass = ship.body.mass();
    let mut weighted = ship.body.center_of_mass() * mass;
    for (world_pos, weight) in entries {
        debug_assert!(weight > 0.0, "block weight must be positive");
        mass += weight;
        weighted += ship.transform.to_local(world_pos) * weight;
    }
    store(ship, mass, weighted);
}

/// Removes `(world position, weight)` entries from the ship's mass books.
/// The blocks must currently be counted.
pub(crate) fn remove_block_weights(
    ship: &mut Ship,
    entries: impl IntoIterator<Item = (Vec3, f32)>,
) {
    let mut mass = ship.body.mass();
    let mut weighted = ship.body.center_of_mass() * mass;
    for (world_pos, weight) in entries {
        mass -= weight;
        weighted -= ship.transform.to_local(world_pos) * weight;
    }
    store(ship, mass, weighted);
}

fn store(ship: &mut Ship, mass: f32, weighted: Vec3) {
    if mass <= MIN_SHIP_MASS {
        ship.body.set_mass_properties(0.0, Vec3::ZERO);
    } else {
        ship.body.set_mass_properties(mass, weighted / mass);
    }
    ship.body.wake();
}
