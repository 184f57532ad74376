//! Tile descriptors and GPU instance records.
//!
//! A [`SelectedTile`] is one entry of the per-frame draw list: where the unit
//! patch goes in the world, which texture slice it samples and through which
//! UV sub-rectangle. [`TileInstance`] is the same data packed for an instance
//! buffer.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::atlas::{TextureIndices, UvRect};
use crate::constants::FINEST_LEVEL;
use crate::lod::{InstanceBudget, TruncationPolicy};
use crate::region::{RegionKey, TerrainRegion};
use crate::types::TerrainConfig;

/// One tile to draw this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedTile {
  /// Detail level the tile is drawn at.
  pub level: u8,
  /// Node whose textures the tile samples.
  pub node: RegionKey,
  /// World XZ minimum corner.
  pub world_min: Vec2,
  /// Edge length in world units.
  pub world_size: f32,
  pub textures: TextureIndices,
  /// Unit patch to world: scale `(size, 1, size)` then translate to the min corner.
  pub world: Mat4,
  pub uv: UvRect,
}

impl SelectedTile {
  /// Tile covering a whole region with its own textures.
  pub fn for_region(region: &TerrainRegion) -> Self {
    let world_size = region.bounds.size().x;
    Self {
      level: region.key.level,
      node: region.key,
      world_min: region.bounds.min,
      world_size,
      textures: region.textures,
      world: world_matrix(region.bounds.min, world_size),
      uv: UvRect::FULL,
    }
  }

  /// Finest-level cell drawn with the textures of its ancestor at `level`.
  ///
  /// At the finest level this is the cell's own texture with full UV.
  pub fn for_fine_cell(terrain: &TerrainConfig, level: u8, cell_x: u32, cell_z: u32) -> Self {
    let cell = RegionKey::new(FINEST_LEVEL, cell_x, cell_z);
    let node = cell.ancestor_at(level);
    let world_min = terrain.get_cell_min(&cell);
    let world_size = terrain.get_cell_size(FINEST_LEVEL);

    Self {
      level,
      node,
      world_min,
      world_size,
      textures: TextureIndices::uniform(node.texture_index()),
      world: world_matrix(world_min, world_size),
      uv: UvRect::for_fine_cell(level, cell_x, cell_z),
    }
  }

  /// World XZ center of the tile footprint.
  #[inline]
  pub fn center(&self) -> Vec2 {
    self.world_min + Vec2::splat(self.world_size * 0.5)
  }

  /// Pack into an instance-buffer record.
  pub fn to_instance(&self) -> TileInstance {
    TileInstance {
      world: self.world.to_cols_array_2d(),
      height_index: self.textures.height,
      diffuse_index: self.textures.diffuse,
      normal_index: self.textures.normal,
      lod: self.level as u32,
      uv_offset: self.uv.offset.to_array(),
      uv_scale: self.uv.scale.to_array(),
    }
  }
}

/// Per-instance vertex data for one tile (96 bytes, no padding).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TileInstance {
  /// Column-major world matrix.
  pub world: [[f32; 4]; 4],
  pub height_index: u32,
  pub diffuse_index: u32,
  pub normal_index: u32,
  pub lod: u32,
  pub uv_offset: [f32; 2],
  pub uv_scale: [f32; 2],
}

#[inline]
fn world_matrix(min: Vec2, size: f32) -> Mat4 {
  Mat4::from_translation(Vec3::new(min.x, 0.0, min.y)) * Mat4::from_scale(Vec3::new(size, 1.0, size))
}

/// Convert a tile list into at most `budget.capacity` instance records.
///
/// Lists that fit are converted in order. Oversized lists are cut according
/// to the budget's [`TruncationPolicy`]; `NearestFirst` returns the kept
/// tiles nearest first, ties in list order.
pub fn fill_instances(
  tiles: &[SelectedTile],
  budget: &InstanceBudget,
  camera_xz: Vec2,
) -> Vec<TileInstance> {
  let overflow = budget.overflow(tiles.len());
  if overflow == 0 {
    return tiles.iter().map(SelectedTile::to_instance).collect();
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(
    tiles = tiles.len(),
    capacity = budget.capacity,
    dropped = overflow,
    policy = ?budget.policy,
    "instance buffer full, truncating"
  );

  match budget.policy {
    TruncationPolicy::ListOrder => tiles
      .iter()
      .take(budget.capacity)
      .map(SelectedTile::to_instance)
      .collect(),
    TruncationPolicy::NearestFirst => {
      let mut order: Vec<(f32, &SelectedTile)> = tiles
        .iter()
        .map(|tile| (tile.center().distance_squared(camera_xz), tile))
        .collect();
      // sort_by is stable
      order.sort_by(|a, b| a.0.total_cmp(&b.0));
      order
        .into_iter()
        .take(budget.capacity)
        .map(|(_, tile)| tile.to_instance())
        .collect()
    }
  }
}

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;
