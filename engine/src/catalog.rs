//! Static block-type catalog.
//!
//! Loaded once at startup (from JSON or built in code) and immutable
//! afterwards. A type carries the block's mass contribution, its box
//! collider, and which of its six faces accept attachment.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::building::Face;

/// Index into the block-type catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockTypeId(pub u16);

fn default_true() -> bool {
    true
}

fn default_half_extents() -> Vec3 {
    Vec3::splat(0.5)
}

/// Per-face attachability. A type may refuse to bond on specific faces: a
/// slab with no top attachment, a decorative panel that only bonds on its
/// back, and so on. Unspecified faces default to attachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceFlags {
    #[serde(default = "default_true")]
    pub front: bool,
    #[serde(default = "default_true")]
    pub back: bool,
    #[serde(default = "default_true")]
    pub left: bool,
    #[serde(default = "default_true")]
    pub right: bool,
    #[serde(default = "default_true")]
    pub up: bool,
    #[serde(default = "default_true")]
    pub down: bool,
}

impl Default for FaceFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl FaceFlags {
    pub const ALL: Self = Self {
        front: true,
        back: true,
        left: true,
        right: true,
        up: true,
        down: true,
    };

    pub fn can_attach(&self, face: Face) -> bool {
        match face {
            Face::Front => self.front,
            Face::Back => self.back,
            Face::Left => self.left,
            Face::Right => self.right,
            Face::Up => self.up,
            Face::Down => self.down,
        }
    }
}

/// One catalog entry. `half_extents` and `collider_offset` describe the box
/// collider in the block's local frame; `weight` is the mass contribution in
/// kilograms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockType {
    pub name: String,
    pub weight: f32,
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
    #[serde(default)]
    pub collider_offset: Vec3,
    #[serde(default)]
    pub attachable: FaceFlags,
}

impl BlockType {
    /// A unit cube type with every face attachable.
    pub fn cube(name: &str, weight: f32) -> Self {
        Self {
            name: name.to_string(),
            weight,
            half_extents: default_half_extents(),
            collider_offset: Vec3::ZERO,
            attachable: FaceFlags::ALL,
        }
    }

    pub fn can_attach(&self, face: Face) -> bool {
        self.attachable.can_attach(face)
    }

    /// How many faces of this type accept attachment.
    pub fn attachment_point_count(&self) -> usize {
        Face::ALL
            .iter()
            .filter(|&&face| self.can_attach(face))
            .count()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse block catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("block catalog is empty")]
    Empty,
    #[error("duplicate block type name '{0}'")]
    DuplicateName(String),
    #[error("block type '{name}' has non-positive {field}")]
    InvalidDimension { name: String, field: &'static str },
}

/// Immutable catalog of every block type, addressed by [`BlockTypeId`].
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    types: Vec<BlockType>,
    by_name: HashMap<String, BlockTypeId>,
}

impl BlockCatalog {
    /// Builds and validates a catalog; ids are assigned by list position.
    pub fn from_types(types: Vec<BlockType>) -> Result<Self, CatalogError> {
        if types.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_name = HashMap::new();
        for (index, ty) in types.iter().enumerate() {
            if !(ty.weight > 0.0 && ty.weight.is_finite()) {
                return Err(CatalogError::InvalidDimension {
                    name: ty.name.clone(),
                    field: "weight",
                });
            }
            if ty.half_extents.min_element() <= 0.0 {
                return Err(CatalogError::InvalidDimension {
                    name: ty.name.clone(),
                    field: "half_extents",
                });
            }
            let id = BlockTypeId(index as u16);
            if by_name.insert(ty.name.clone(), id).is_some() {
                return Err(CatalogError::DuplicateName(ty.name.clone()));
            }
        }

        log::debug!("block catalog loaded with {} type(s)", types.len());
        Ok(Self { types, by_name })
    }

    /// Parses a JSON array of block types.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let types: Vec<BlockType> = serde_json::from_str(json)?;
        Self::from_types(types)
    }

    /// Type for an id. Ids come from this catalog or validated placement
    /// requests, so an unknown id is a programming defect.
    pub fn get(&self, id: BlockTypeId) -> &BlockType {
        self.try_get(id)
            .unwrap_or_else(|| panic!("unknown block type id {}", id.0))
    }

    pub fn try_get(&self, id: BlockTypeId) -> Option<&BlockType> {
        self.types.get(id.0 as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockTypeId, &BlockType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (BlockTypeId(index as u16), ty))
    }
}
