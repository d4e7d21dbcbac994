//! Connected-component traversal over the face graph.
//!
//! Used in two modes: confirming which ships a freshly linked block now
//! touches ([`component_from`]), and discovering how many disjoint pieces
//! remain after a block's links are severed ([`split_components`]).

use std::collections::{HashMap, HashSet, VecDeque};

use super::types::{Block, BlockHandle};

/// Breadth-first component containing `start`.
pub(crate) fn component_from(
    blocks: &HashMap<BlockHandle, Block>,
    start: BlockHandle,
) -> Vec<BlockHandle> {
    let mut visited = HashSet::from([start]);
    let mut component = vec![start];
    let mut queue = VecDeque::from([start]);

    while let Some(handle) = queue.pop_front() {
        let block = blocks
            .get(&handle)
            .expect("face graph links an unregistered block");
        for neighbor in block.linked_neighbors() {
            if visited.insert(neighbor) {
                component.push(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    component
}

/// One traversal per seed, consuming seeds already reached by an earlier
/// traversal out of the shared pool, so former neighbors that stayed
/// connected produce a single component. Components come back in discovery
/// order; seeds are the removed block's former neighbors.
pub(crate) fn split_components(
    blocks: &HashMap<BlockHandle, Block>,
    seeds: &[BlockHandle],
) -> Vec<Vec<BlockHandle>> {
    let mut remaining: Vec<BlockHandle> = seeds.to_vec();
    let mut components = Vec::new();

    while !remaining.is_empty() {
        let seed = remaining.remove(0);
        let component = component_from(blocks, seed);
        remaining.retain(|handle| !component.contains(handle));
        components.push(component);
    }

    components
}

/// Index of the largest component by block count; ties keep the first
/// discovered. Deliberate, deterministic tie-break.
pub(crate) fn largest_component(components: &[Vec<BlockHandle>]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, component) in components.iter().enumerate() {
        if best.is_none_or(|(_, len)| component.len() > len) {
            best = Some((index, component.len()));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::face::Face;
    use crate::building::types::AIRSHIP_LAYER;
    use crate::catalog::BlockTypeId;
    use glam::{Quat, Vec3};

    fn graph(count: u32) -> HashMap<BlockHandle, Block> {
        (0..count)
            .map(|i| {
                let block = Block::new(
                    BlockTypeId(0),
                    Vec3::X * i as f32,
                    Quat::IDENTITY,
                    AIRSHIP_LAYER,
                );
                (BlockHandle(i), block)
            })
            .collect()
    }

    fn link(blocks: &mut HashMap<BlockHandle, Block>, a: u32, face: Face, b: u32) {
        blocks
            .get_mut(&BlockHandle(a))
            .unwrap()
            .set_face(face, Some(BlockHandle(b)));
        blocks
            .get_mut(&BlockHandle(b))
            .unwrap()
            .set_face(face.opposite(), Some(BlockHandle(a)));
    }

    #[test]
    fn isolated_block_is_its_own_component() {
        let blocks = graph(1);
        assert_eq!(component_from(&blocks, BlockHandle(0)), vec![BlockHandle(0)]);
    }

    #[test]
    fn line_is_one_component_from_either_end() {
        let mut blocks = graph(3);
        link(&mut blocks, 0, Face::Right, 1);
        link(&mut blocks, 1, Face::Right, 2);
        assert_eq!(component_from(&blocks, BlockHandle(0)).len(), 3);
        assert_eq!(component_from(&blocks, BlockHandle(2)).len(), 3);
    }

    #[test]
    fn split_seeds_in_same_piece_collapse_to_one_component() {
        // 0-1-2 still connected; both ends seeded.
        let mut blocks = graph(3);
        link(&mut blocks, 0, Face::Right, 1);
        link(&mut blocks, 1, Face::Right, 2);
        let components = split_components(&blocks, &[BlockHandle(0), BlockHandle(2)]);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3);
    }

    #[test]
    fn split_detects_disjoint_pieces_in_seed_order() {
        // 0-1 and 2 disconnected.
        let mut blocks = graph(3);
        link(&mut blocks, 0, Face::Right, 1);
        let components = split_components(&blocks, &[BlockHandle(2), BlockHandle(0)]);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0], vec![BlockHandle(2)]);
        assert_eq!(components[1].len(), 2);
    }

    #[test]
    fn largest_component_breaks_ties_toward_first() {
        let components = vec![
            vec![BlockHandle(0)],
            vec![BlockHandle(1), BlockHandle(2)],
            vec![BlockHandle(3), BlockHandle(4)],
        ];
        assert_eq!(largest_component(&components), Some(1));
        assert_eq!(largest_component(&[]), None);
    }
}
