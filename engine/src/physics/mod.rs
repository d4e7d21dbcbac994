//! Physics integration seam.
//!
//! Rigid-body *integration* (forces, velocities, solver) lives in an external
//! physics engine; this crate only writes mass properties and signals wake.
//! [`rigid_body::RigidBody`] is the handle through which that happens.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout): distances in meters, mass in
//! kilograms.

pub mod rigid_body;

pub use rigid_body::RigidBody;
