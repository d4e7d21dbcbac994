//! Block attachment and ship aggregation.
//!
//! [`BlockManager`] owns the two registries this crate is about: the block
//! arena (each block with its six-face adjacency record) and the ship arena
//! (each ship with its rigid body and membership). Every public operation
//! runs to completion synchronously; adjacency, connectivity, mass, and ship
//! lifecycle are all consistent again before the call returns.
//!
//! Placement legality (overlap checks, valid targets) is the caller's job;
//! these operations do bookkeeping, and callers that break the documented
//! contract hit assertions rather than recoverable errors.

pub mod connectivity;
pub mod face;
pub mod mass;
pub mod ship;
pub mod types;

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::catalog::{BlockCatalog, BlockType, BlockTypeId};
use crate::physics::RigidBody;
use crate::spatial::{Aabb, CONTACT_PADDING, OVERLAP_SHRINK};

use self::face::face_toward;

pub use self::face::{Face, FACE_ALIGN_MIN_DOT};
pub use self::ship::{Ship, ShipTransform};
pub use self::types::{Block, BlockHandle, ShipId, AIRSHIP_LAYER};

/// World context for all block and ship state. Constructed explicitly and
/// passed around; there is no global registry.
pub struct BlockManager {
    catalog: BlockCatalog,
    blocks: HashMap<BlockHandle, Block>,
    ships: HashMap<ShipId, Ship>,
    next_block: u32,
    next_ship: u32,
}

impl BlockManager {
    pub fn new(catalog: BlockCatalog) -> Self {
        Self {
            catalog,
            blocks: HashMap::new(),
            ships: HashMap::new(),
            next_block: 1,
            next_ship: 1,
        }
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    // ------------------------------------------------------------------
    // Registry access
    // ------------------------------------------------------------------

    /// Every live handle is registered; a stale or foreign handle is a
    /// programming defect, so lookups panic instead of returning options.
    pub fn block(&self, handle: BlockHandle) -> &Block {
        self.blocks
            .get(&handle)
            .unwrap_or_else(|| panic!("block {handle:?} is not registered"))
    }

    fn block_mut(&mut self, handle: BlockHandle) -> &mut Block {
        self.blocks
            .get_mut(&handle)
            .unwrap_or_else(|| panic!("block {handle:?} is not registered"))
    }

    pub fn ship(&self, id: ShipId) -> &Ship {
        self.ships
            .get(&id)
            .unwrap_or_else(|| panic!("ship {id:?} is not registered"))
    }

    fn ship_mut_internal(&mut self, id: ShipId) -> &mut Ship {
        self.ships
            .get_mut(&id)
            .unwrap_or_else(|| panic!("ship {id:?} is not registered"))
    }

    /// Mutable ship access for the physics integration: moving the ship's
    /// transform and putting its body back to sleep happen through this.
    pub fn ship_mut(&mut self, id: ShipId) -> &mut Ship {
        self.ship_mut_internal(id)
    }

    /// Rigid body of a ship, for the external engine to manage sleep state.
    pub fn rigid_body_mut(&mut self, id: ShipId) -> &mut RigidBody {
        &mut self.ship_mut_internal(id).body
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockHandle, &Block)> {
        self.blocks.iter().map(|(&handle, block)| (handle, block))
    }

    pub fn ships(&self) -> impl Iterator<Item = (ShipId, &Ship)> {
        self.ships.iter().map(|(&id, ship)| (id, ship))
    }

    /// Ship the block is parented under, if any.
    pub fn ship_of(&self, handle: BlockHandle) -> Option<ShipId> {
        self.block(handle).ship()
    }

    /// Neighbor occupying the given face of a block, if any.
    pub fn face_neighbor(&self, handle: BlockHandle, face: Face) -> Option<BlockHandle> {
        self.block(handle).face(face)
    }

    pub fn block_type_id(&self, handle: BlockHandle) -> BlockTypeId {
        self.block(handle).type_id
    }

    pub fn block_type(&self, handle: BlockHandle) -> &BlockType {
        self.catalog.get(self.block(handle).type_id)
    }

    pub fn block_type_from_id(&self, id: BlockTypeId) -> &BlockType {
        self.catalog.get(id)
    }

    // ------------------------------------------------------------------
    // Block lifecycle
    // ------------------------------------------------------------------

    /// Registers a new block with empty faces and no ship. The caller has
    /// already validated the placement; an unknown type id panics.
    pub fn create_block(
        &mut self,
        type_id: BlockTypeId,
        position: Vec3,
        rotation: Quat,
        layer: u32,
    ) -> BlockHandle {
        let _ = self.catalog.get(type_id);
        let handle = BlockHandle(self.next_block);
        self.next_block += 1;
        self.blocks
            .insert(handle, Block::new(type_id, position, rotation, layer));
        handle
    }

    /// Create + broad-phase + combine in one call.
    pub fn place_block(
        &mut self,
        type_id: BlockTypeId,
        position: Vec3,
        rotation: Quat,
        layer: u32,
    ) -> BlockHandle {
        let handle = self.create_block(type_id, position, rotation, layer);
        let candidates = self.neighbor_candidates(handle);
        self.combine_adjacent_blocks(handle, &candidates);
        handle
    }

    /// Detaches the block (if attached) and removes it from the registry.
    pub fn destroy_block(&mut self, handle: BlockHandle) {
        if self.block(handle).ship().is_some() {
            self.detach_block(handle);
        }
        self.blocks.remove(&handle);
    }

    /// Moves a block: detach, update the transform, re-resolve adjacency.
    pub fn relocate_block(&mut self, handle: BlockHandle, position: Vec3, rotation: Quat) {
        if self.block(handle).ship().is_some() {
            self.detach_block(handle);
        }
        {
            let block = self.block_mut(handle);
            block.position = position;
            block.rotation = rotation;
        }
        let candidates = self.neighbor_candidates(handle);
        self.combine_adjacent_blocks(handle, &candidates);
    }

    // ------------------------------------------------------------------
    // Broad-phase
    // ------------------------------------------------------------------

    /// Blocks whose colliders fall inside the padded bound around `handle`'s
    /// collider. Conservative: diagonal contacts are filtered out later by
    /// the face-alignment test.
    pub fn neighbor_candidates(&self, handle: BlockHandle) -> Vec<BlockHandle> {
        let block = self.block(handle);
        let ty = self.catalog.get(block.type_id);
        self.overlaps(
            block.position + block.rotation * ty.collider_offset,
            ty.half_extents,
            block.rotation,
            CONTACT_PADDING,
            block.layer,
            Some(handle),
        )
    }

    /// Overlap test for a hypothetical placement. The probe never touches
    /// the registries, so preview/ghost systems can call it freely.
    pub fn probe_overlaps(
        &self,
        type_id: BlockTypeId,
        position: Vec3,
        rotation: Quat,
        layer: u32,
    ) -> Vec<BlockHandle> {
        let ty = self.catalog.get(type_id);
        self.overlaps(
            position + rotation * ty.collider_offset,
            ty.half_extents,
            rotation,
            -OVERLAP_SHRINK,
            layer,
            None,
        )
    }

    fn overlaps(
        &self,
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
        padding: f32,
        layer: u32,
        exclude: Option<BlockHandle>,
    ) -> Vec<BlockHandle> {
        let query = Aabb::from_oriented_box(center, half_extents, rotation).expanded(padding);

        let mut found = Vec::new();
        for (&handle, block) in &self.blocks {
            if Some(handle) == exclude || block.layer & layer == 0 {
                continue;
            }
            let ty = self.catalog.get(block.type_id);
            let bound = Aabb::from_oriented_box(
                block.position + block.rotation * ty.collider_offset,
                ty.half_extents,
                block.rotation,
            );
            if query.intersects(&bound) {
                found.push(handle);
            }
        }
        // Arena iteration order is arbitrary; keep results deterministic.
        found.sort();
        found
    }

    // ------------------------------------------------------------------
    // Attachment and merge
    // ------------------------------------------------------------------

    /// Links a freshly placed or moved block to every genuinely face-aligned
    /// candidate, then merges every touched ship into one. A block with no
    /// accepted neighbor (including one resting on static ground) becomes
    /// its own new ship.
    pub fn combine_adjacent_blocks(&mut self, handle: BlockHandle, candidates: &[BlockHandle]) {
        let (position, rotation, type_id) = {
            let block = self.block(handle);
            (block.position, block.rotation, block.type_id)
        };

        for &candidate in candidates {
            if candidate == handle {
                continue;
            }
            let (cand_pos, cand_rot, cand_type) = {
                let block = self.block(candidate);
                (block.position, block.rotation, block.type_id)
            };

            let direction = cand_pos - position;
            let Some(self_face) = face_toward(rotation, direction) else {
                continue;
            };
            if !self.catalog.get(type_id).can_attach(self_face) {
                continue;
            }
            let Some(neighbor_face) = face_toward(cand_rot, -direction) else {
                continue;
            };
            if !self.catalog.get(cand_type).can_attach(neighbor_face) {
                continue;
            }

            self.attach_blocks(handle, self_face, candidate, neighbor_face);
        }

        self.merge_component_ships(handle);
    }

    fn attach_blocks(&mut self, a: BlockHandle, face_a: Face, b: BlockHandle, face_b: Face) {
        if self.block(a).face(face_a) == Some(b) {
            return; // duplicate candidate, already linked
        }
        let block_a = self.block_mut(a);
        debug_assert!(
            block_a.face(face_a).is_none(),
            "face {face_a:?} of {a:?} already occupied"
        );
        block_a.set_face(face_a, Some(b));

        let block_b = self.block_mut(b);
        debug_assert!(
            block_b.face(face_b).is_none(),
            "face {face_b:?} of {b:?} already occupied"
        );
        block_b.set_face(face_b, Some(a));
    }

    /// One traversal from the placed block finds everything it now touches,
    /// directly or transitively; all of those ships collapse into a single
    /// surviving one. The placed block's own ship survives when it has one,
    /// otherwise the first ship the traversal reaches.
    fn merge_component_ships(&mut self, handle: BlockHandle) {
        let component = connectivity::component_from(&self.blocks, handle);

        let surviving = self
            .block(handle)
            .ship()
            .or_else(|| component.iter().find_map(|&h| self.block(h).ship()));

        let Some(surviving) = surviving else {
            // No ship anywhere in the component: brand-new single-component
            // ship (zero-neighbor placements land here).
            self.create_ship(&component);
            return;
        };

        let mut absorbed: Vec<ShipId> = Vec::new();
        for &h in &component {
            if let Some(other) = self.block(h).ship()
                && other != surviving
                && !absorbed.contains(&other)
            {
                absorbed.push(other);
            }
        }

        for old_ship in absorbed {
            let mut members: Vec<BlockHandle> = self.ship(old_ship).members().collect();
            members.sort();
            log::debug!(
                "merging {} block(s) from {old_ship:?} into {surviving:?}",
                members.len()
            );
            self.reparent(&members, old_ship, surviving);
            self.destroy_ship(old_ship);
        }

        if self.block(handle).ship().is_none() {
            self.adopt(surviving, &[handle]);
        }
    }

    // ------------------------------------------------------------------
    // Detach and split
    // ------------------------------------------------------------------

    /// Removes a block from its ship without destroying it. Links are
    /// severed on both sides, then one traversal per former neighbor decides
    /// how many pieces remain: the largest piece keeps the original ship,
    /// every other piece is peeled off into a fresh one, and an emptied
    /// original ship is destroyed.
    pub fn detach_block(&mut self, handle: BlockHandle) {
        let ship_id = self
            .block(handle)
            .ship()
            .expect("detaching a block that has no ship");

        // The block's own weight leaves first.
        let entries = self.weight_entries(&[handle]);
        {
            let ship = self.ship_mut_internal(ship_id);
            assert!(
                ship.members.remove(&handle),
                "block {handle:?} not owned by its ship"
            );
            mass::remove_block_weights(ship, entries);
        }
        self.block_mut(handle).ship = None;

        // Sever every link, both directions.
        let neighbors: Vec<BlockHandle> = self.block(handle).linked_neighbors().collect();
        for &neighbor in &neighbors {
            self.block_mut(neighbor).detach_neighbor(handle);
        }
        self.block_mut(handle).clear_faces();

        // Split detection from the former neighbors.
        let components = connectivity::split_components(&self.blocks, &neighbors);
        if let Some(keep) = connectivity::largest_component(&components) {
            for (index, component) in components.iter().enumerate() {
                if index == keep {
                    continue;
                }
                let new_ship = self.create_empty_ship();
                self.reparent(component, ship_id, new_ship);
                log::debug!(
                    "split {} block(s) off {ship_id:?} into {new_ship:?}",
                    component.len()
                );
            }
        }

        if self.ship(ship_id).member_count() == 0 {
            self.destroy_ship(ship_id);
        }
    }

    // ------------------------------------------------------------------
    // Ship lifecycle
    // ------------------------------------------------------------------

    fn create_empty_ship(&mut self) -> ShipId {
        let id = ShipId(self.next_ship);
        self.next_ship += 1;
        self.ships.insert(id, Ship::new());
        id
    }

    fn create_ship(&mut self, blocks: &[BlockHandle]) -> ShipId {
        let id = self.create_empty_ship();
        self.adopt(id, blocks);
        log::debug!("created {id:?} with {} block(s)", blocks.len());
        id
    }

    /// Only an empty ship may be destroyed.
    fn destroy_ship(&mut self, id: ShipId) {
        let ship = self
            .ships
            .remove(&id)
            .unwrap_or_else(|| panic!("ship {id:?} is not registered"));
        assert!(
            ship.members.is_empty(),
            "destroying {id:?} which still owns {} block(s)",
            ship.members.len()
        );
        log::debug!("destroyed {id:?}");
    }

    /// Takes ship-less blocks into a ship, mass included.
    fn adopt(&mut self, id: ShipId, blocks: &[BlockHandle]) {
        let entries = self.weight_entries(blocks);
        {
            let ship = self.ship_mut_internal(id);
            ship.members.extend(blocks.iter().copied());
            mass::add_block_weights(ship, entries);
        }
        for &handle in blocks {
            debug_assert!(self.block(handle).ship().is_none());
            self.block_mut(handle).ship = Some(id);
        }
    }

    /// Moves blocks between ships, keeping mass books on both sides.
    fn reparent(&mut self, blocks: &[BlockHandle], from: ShipId, to: ShipId) {
        assert_ne!(from, to, "reparenting a ship onto itself");
        let entries = self.weight_entries(blocks);
        {
            let ship = self.ship_mut_internal(from);
            for &handle in blocks {
                assert!(
                    ship.members.remove(&handle),
                    "block {handle:?} not owned by {from:?}"
                );
            }
            mass::remove_block_weights(ship, entries.iter().copied());
        }
        {
            let ship = self.ship_mut_internal(to);
            ship.members.extend(blocks.iter().copied());
            mass::add_block_weights(ship, entries);
        }
        for &handle in blocks {
            self.block_mut(handle).ship = Some(to);
        }
    }

    fn weight_entries(&self, blocks: &[BlockHandle]) -> Vec<(Vec3, f32)> {
        blocks
            .iter()
            .map(|&handle| {
                let block = self.block(handle);
                (block.position, self.catalog.get(block.type_id).weight)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Invariant checking
    // ------------------------------------------------------------------

    /// Walks the registries and panics on the first broken invariant:
    /// non-bidirectional links, mass drift, a ship spanning disconnected
    /// components, or a component crossing ships. Meant for tests and debug
    /// sweeps, not the hot path.
    pub fn check_invariants(&self) {
        for (&handle, block) in &self.blocks {
            for face in Face::ALL {
                let Some(neighbor) = block.face(face) else {
                    continue;
                };
                let neighbor_block = self
                    .blocks
                    .get(&neighbor)
                    .expect("face graph links an unregistered block");
                let reciprocal = Face::ALL
                    .iter()
                    .any(|&f| neighbor_block.face(f) == Some(handle));
                assert!(
                    reciprocal,
                    "link {handle:?} -> {neighbor:?} has no reverse link"
                );
            }
            if let Some(ship) = block.ship() {
                assert!(
                    self.ships.contains_key(&ship),
                    "block {handle:?} parented to dead {ship:?}"
                );
            }
        }

        for (&ship_id, ship) in &self.ships {
            assert!(ship.member_count() > 0, "empty {ship_id:?} left alive");

            let mut expected_mass = 0.0;
            for handle in ship.members() {
                let block = self
                    .blocks
                    .get(&handle)
                    .expect("ship member is not registered");
                assert_eq!(
                    block.ship(),
                    Some(ship_id),
                    "member {handle:?} does not point back at {ship_id:?}"
                );
                expected_mass += self.catalog.get(block.type_id).weight;
            }
            let drift = (expected_mass - ship.mass()).abs();
            assert!(
                drift <= 1e-3 * expected_mass.max(1.0),
                "{ship_id:?} mass drifted: books {} vs members {}",
                ship.mass(),
                expected_mass
            );

            // The ship's members must form exactly one component.
            let seed = ship.members().next().expect("non-empty ship has a member");
            let component = connectivity::component_from(&self.blocks, seed);
            assert_eq!(
                component.len(),
                ship.member_count(),
                "{ship_id:?} spans disconnected components"
            );
            for handle in component {
                assert_eq!(
                    self.blocks[&handle].ship(),
                    Some(ship_id),
                    "component of {ship_id:?} crosses into another ship"
                );
            }
        }
    }
}
