//! QuadTree - arena holding every region of the terrain tree.
//!
//! Nodes are stored in texture-index order, so `NodeId(i)` is also the
//! texture index of node `i` and each level occupies a contiguous slice:
//!
//! ```text
//! id:     0 │ 1  2  3  4 │ 5  6  ...  20
//! level:  0 │ 1          │ 2
//! ```
//!
//! Child links are plain ids with [`NodeId::NONE`] as the "no child" sentinel.

use crate::atlas::TextureIndices;
use crate::constants::{GRID_DIM, LEVEL_COUNT, LEVEL_TEXTURE_BASE, TEXTURE_COUNT};
use crate::types::TerrainConfig;

use super::{RegionKey, TileBounds};

/// Index of a node in the [`QuadTree`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
  /// Sentinel for a missing child.
  pub const NONE: Self = Self(u32::MAX);

  /// Id of the node owning `key`.
  #[inline]
  pub fn of(key: &RegionKey) -> Self {
    Self(key.texture_index())
  }

  #[inline]
  pub fn is_none(&self) -> bool {
    *self == Self::NONE
  }

  /// Arena slot.
  #[inline]
  pub fn index(&self) -> usize {
    self.0 as usize
  }
}

/// One node of the terrain tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainRegion {
  /// Level and grid position.
  pub key: RegionKey,
  /// World-space XZ footprint.
  pub bounds: TileBounds,
  /// Height / diffuse / normal texture indices.
  pub textures: TextureIndices,
  /// Children in SW, SE, NW, NE order, or `NodeId::NONE` at the leaf level.
  pub children: [NodeId; 4],
}

impl TerrainRegion {
  #[inline]
  pub fn has_children(&self) -> bool {
    !self.children[0].is_none()
  }

  #[inline]
  pub fn level(&self) -> u8 {
    self.key.level
  }
}

/// Static 3-level terrain tree, built once from the terrain size.
#[derive(Clone, Debug)]
pub struct QuadTree {
  nodes: Vec<TerrainRegion>,
}

impl QuadTree {
  /// Build every node of the tree for a terrain.
  pub fn build(terrain: &TerrainConfig) -> Self {
    let mut nodes = Vec::with_capacity(TEXTURE_COUNT);

    for level in 0..LEVEL_COUNT as u8 {
      for key in RegionKey::level_keys(level) {
        let mut children = [NodeId::NONE; 4];
        for (quadrant, slot) in children.iter_mut().enumerate() {
          if let Some(child) = key.get_child(quadrant as u8) {
            *slot = NodeId::of(&child);
          }
        }

        debug_assert_eq!(nodes.len(), key.texture_index() as usize);
        nodes.push(TerrainRegion {
          key,
          bounds: terrain.get_cell_bounds(&key),
          textures: TextureIndices::uniform(key.texture_index()),
          children,
        });
      }
    }

    Self { nodes }
  }

  /// Root node (level 0).
  #[inline]
  pub fn root(&self) -> NodeId {
    NodeId(0)
  }

  /// Node by id.
  ///
  /// # Panics
  /// Panics on `NodeId::NONE` or an id from another tree size.
  #[inline]
  pub fn get(&self, id: NodeId) -> &TerrainRegion {
    &self.nodes[id.index()]
  }

  /// Node owning `key`.
  #[inline]
  pub fn region(&self, key: &RegionKey) -> &TerrainRegion {
    self.get(NodeId::of(key))
  }

  /// All nodes of one level, in z-major then x order.
  pub fn level(&self, level: u8) -> &[TerrainRegion] {
    let start = LEVEL_TEXTURE_BASE[level as usize] as usize;
    let dim = GRID_DIM[level as usize] as usize;
    &self.nodes[start..start + dim * dim]
  }

  /// Number of nodes (always 21).
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Iterate over all nodes in id order.
  pub fn iter(&self) -> impl Iterator<Item = &TerrainRegion> {
    self.nodes.iter()
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
