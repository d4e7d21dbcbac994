//! Skyforge Engine Library
//!
//! The block-attachment and rigid-body-aggregation core of a voxel-style
//! building game: players place cubic blocks in the world, blocks that touch
//! face-to-face fuse into a single rigid "ship", and removing a block may
//! split a ship into several independent ships. The crate keeps the mutable
//! adjacency graph and the per-ship mass / center-of-mass bookkeeping
//! consistent through every placement and removal.
//!
//! # Modules
//!
//! - [`building`] - Face-adjacency graph, connectivity traversal, mass
//!   aggregation, and ship lifecycle, orchestrated by [`BlockManager`]
//! - [`catalog`] - Static block-type catalog (weights, collision boxes,
//!   per-face attachability)
//! - [`physics`] - Rigid-body mass-property handles written by the core and
//!   integrated by an external physics engine
//! - [`spatial`] - Broad-phase AABB queries used for neighbor detection
//!
//! # Example
//!
//! ```ignore
//! use glam::{Quat, Vec3};
//! use skyforge_engine::{BlockCatalog, BlockManager, BlockType, BlockTypeId, AIRSHIP_LAYER};
//!
//! let catalog = BlockCatalog::from_types(vec![BlockType::cube("hull", 1.0)])?;
//! let mut manager = BlockManager::new(catalog);
//!
//! // Two touching blocks fuse into one ship of mass 2.
//! let hull = BlockTypeId(0);
//! let a = manager.place_block(hull, Vec3::ZERO, Quat::IDENTITY, AIRSHIP_LAYER);
//! let b = manager.place_block(hull, Vec3::X, Quat::IDENTITY, AIRSHIP_LAYER);
//! assert_eq!(manager.ship_of(a), manager.ship_of(b));
//!
//! // Detaching a block re-resolves connectivity and mass for the remainder.
//! manager.detach_block(a);
//! ```

pub mod building;
pub mod catalog;
pub mod physics;
pub mod spatial;

// Re-export the core types at crate level for convenience
pub use building::{
    Block, BlockHandle, BlockManager, Face, Ship, ShipId, ShipTransform, AIRSHIP_LAYER,
};
pub use catalog::{BlockCatalog, BlockType, BlockTypeId, CatalogError, FaceFlags};
pub use physics::RigidBody;
pub use spatial::Aabb;
