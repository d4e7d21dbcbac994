//! Local face directions and the face-alignment test.
//!
//! A block has six faces identified by wire ids 1..=6 mapped to
//! front/back/left/right/up/down, which are local +Z/-Z/-X/+X/+Y/-Y in the
//! block's own rotated frame. Id 0 historically meant "no attachment"; the
//! [`Face`] type has no representation for it, [`Face::from_id`] simply
//! returns `None`.

use glam::{Quat, Vec3};

/// Minimum dot product between a neighbor direction and the chosen local
/// face direction for the neighbor to count as face-aligned (~0.8 degrees).
/// Rejects diagonal and edge-touching colliders that overlap the padded
/// broad-phase box without being truly face-to-face.
pub const FACE_ALIGN_MIN_DOT: f32 = 0.999_9;

/// One of a block's six local directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Face {
    /// All faces in wire-id order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Up,
        Face::Down,
    ];

    /// Wire id, 1..=6.
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    /// Face for a wire id; 0 and anything above 6 is "no attachment".
    pub const fn from_id(id: u8) -> Option<Face> {
        match id {
            1 => Some(Face::Front),
            2 => Some(Face::Back),
            3 => Some(Face::Left),
            4 => Some(Face::Right),
            5 => Some(Face::Up),
            6 => Some(Face::Down),
            _ => None,
        }
    }

    /// The face on the opposite side of the block.
    pub const fn opposite(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        }
    }

    /// Unit direction of this face in the block's local frame.
    pub const fn unit(self) -> Vec3 {
        match self {
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
            Face::Left => Vec3::NEG_X,
            Face::Right => Vec3::X,
            Face::Up => Vec3::Y,
            Face::Down => Vec3::NEG_Y,
        }
    }

    /// Face direction rotated into the world frame.
    pub fn world_dir(self, rotation: Quat) -> Vec3 {
        rotation * self.unit()
    }

    /// Slot index into a block's face array.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Resolves which local face of a block oriented by `rotation` points along
/// `dir`, or `None` when no face is within tolerance. A diagonal contact
/// resolves to `None` and is simply not linked; this is a normal outcome,
/// never an error.
pub fn face_toward(rotation: Quat, dir: Vec3) -> Option<Face> {
    let local = (rotation.inverse() * dir).try_normalize()?;

    let mut best = Face::Front;
    let mut best_dot = f32::NEG_INFINITY;
    for face in Face::ALL {
        let dot = local.dot(face.unit());
        if dot > best_dot {
            best = face;
            best_dot = dot;
        }
    }

    (best_dot >= FACE_ALIGN_MIN_DOT).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn wire_id_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_id(face.id()), Some(face));
        }
        assert_eq!(Face::from_id(0), None);
        assert_eq!(Face::from_id(7), None);
    }

    #[test]
    fn opposites_pair_up() {
        for face in Face::ALL {
            assert_ne!(face, face.opposite());
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.unit(), -face.opposite().unit());
        }
    }

    #[test]
    fn axis_aligned_directions_resolve() {
        assert_eq!(face_toward(Quat::IDENTITY, Vec3::X), Some(Face::Right));
        assert_eq!(face_toward(Quat::IDENTITY, Vec3::NEG_Y), Some(Face::Down));
        assert_eq!(face_toward(Quat::IDENTITY, Vec3::Z * 3.0), Some(Face::Front));
    }

    #[test]
    fn rotation_is_applied_in_local_frame() {
        // Block yawed 90 degrees: its local +Z (front) now points along world +X.
        let rotation = Quat::from_rotation_y(FRAC_PI_2);
        assert_eq!(face_toward(rotation, Vec3::X), Some(Face::Front));
        assert_eq!(face_toward(rotation, Vec3::NEG_X), Some(Face::Back));
        // Up stays up under yaw.
        assert_eq!(face_toward(rotation, Vec3::Y), Some(Face::Up));
    }

    #[test]
    fn diagonal_direction_is_rejected() {
        assert_eq!(face_toward(Quat::IDENTITY, Vec3::new(1.0, 1.0, 0.0)), None);
        assert_eq!(face_toward(Quat::IDENTITY, Vec3::new(1.0, 0.2, 0.0)), None);
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert_eq!(face_toward(Quat::IDENTITY, Vec3::ZERO), None);
    }

    #[test]
    fn small_deviation_within_tolerance_is_accepted() {
        let dir = Vec3::new(1.0, 1e-4, 0.0);
        assert_eq!(face_toward(Quat::IDENTITY, dir), Some(Face::Right));
    }
}
