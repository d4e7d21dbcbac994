//! Handles and the per-block adjacency record.

use glam::{Quat, Vec3};
use static_assertions::assert_eq_size;

use super::face::Face;
use crate::catalog::BlockTypeId;

/// Collision layer bit used for airship blocks.
pub const AIRSHIP_LAYER: u32 = 1 << 3;

/// Stable handle to a placed block in the [`super::BlockManager`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockHandle(pub(crate) u32);

/// Stable handle to a live ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub(crate) u32);

// Handles are passed around everywhere; keep them word-cheap.
assert_eq_size!(BlockHandle, u32);
assert_eq_size!(ShipId, u32);

/// A placed block: catalog type, world transform, collision layer, ship
/// parent, and the six face slots of the adjacency graph.
///
/// Face links are bidirectional: if this block's face holds a neighbor, the
/// neighbor's opposing slot holds this block back. The manager restores the
/// invariant before any mutating operation returns.
#[derive(Debug, Clone)]
pub struct Block {
    pub type_id: BlockTypeId,
    pub position: Vec3,
    pub rotation: Quat,
    pub layer: u32,
    pub(crate) ship: Option<ShipId>,
    faces: [Option<BlockHandle>; 6],
}

impl Block {
    pub(crate) fn new(type_id: BlockTypeId, position: Vec3, rotation: Quat, layer: u32) -> Self {
        Self {
            type_id,
            position,
            rotation,
            layer,
            ship: None,
            faces: [None; 6],
        }
    }

    /// Ship this block is parented under, if any. A freshly created or
    /// detached block is ship-less until it is combined again.
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }

    /// Neighbor occupying the given face, if any.
    pub fn face(&self, face: Face) -> Option<BlockHandle> {
        self.faces[face.index()]
    }

    pub(crate) fn set_face(&mut self, face: Face, neighbor: Option<BlockHandle>) {
        self.faces[face.index()] = neighbor;
    }

    /// Clears the slot referencing `other`. While the graph is bidirectional
    /// at most one slot can match.
    pub(crate) fn detach_neighbor(&mut self, other: BlockHandle) {
        for slot in &mut self.faces {
            if *slot == Some(other) {
                *slot = None;
                return;
            }
        }
    }

    pub(crate) fn clear_faces(&mut self) {
        self.faces = [None; 6];
    }

    /// Neighbors currently linked on any face, in wire-id order.
    pub fn linked_neighbors(&self) -> impl Iterator<Item = BlockHandle> + '_ {
        self.faces.iter().flatten().copied()
    }

    /// Number of occupied face slots.
    pub fn link_count(&self) -> usize {
        self.faces.iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Block {
        Block::new(BlockTypeId(0), Vec3::ZERO, Quat::IDENTITY, AIRSHIP_LAYER)
    }

    #[test]
    fn faces_start_empty() {
        let block = block();
        for face in Face::ALL {
            assert_eq!(block.face(face), None);
        }
        assert_eq!(block.link_count(), 0);
        assert_eq!(block.ship(), None);
    }

    #[test]
    fn set_face_overwrites_one_slot() {
        let mut block = block();
        block.set_face(Face::Up, Some(BlockHandle(7)));
        assert_eq!(block.face(Face::Up), Some(BlockHandle(7)));
        assert_eq!(block.face(Face::Down), None);
        assert_eq!(block.link_count(), 1);
    }

    #[test]
    fn detach_neighbor_clears_matching_slot() {
        let mut block = block();
        block.set_face(Face::Left, Some(BlockHandle(1)));
        block.set_face(Face::Right, Some(BlockHandle(2)));
        block.detach_neighbor(BlockHandle(1));
        assert_eq!(block.face(Face::Left), None);
        assert_eq!(block.face(Face::Right), Some(BlockHandle(2)));
    }

    #[test]
    fn linked_neighbors_follow_wire_id_order() {
        let mut block = block();
        block.set_face(Face::Down, Some(BlockHandle(9)));
        block.set_face(Face::Front, Some(BlockHandle(3)));
        let neighbors: Vec<_> = block.linked_neighbors().collect();
        assert_eq!(neighbors, vec![BlockHandle(3), BlockHandle(9)]);
    }
}
