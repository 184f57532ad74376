//! Global strategy: every visible region of one level, whole textures.

use glam::Vec2;

use crate::region::QuadTree;
use crate::tile::SelectedTile;
use crate::types::TerrainConfig;
use crate::visibility::Frustum;

use super::budget::SelectionStats;

/// Planar distance from the camera to the terrain center.
#[inline]
pub fn planar_distance(terrain: &TerrainConfig, camera_xz: Vec2) -> f32 {
  camera_xz.distance(terrain.center)
}

/// Emit every region of `level` that survives culling, z-major then x.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "lod::select_level"))]
pub fn select_level(
  tree: &QuadTree,
  terrain: &TerrainConfig,
  level: u8,
  frustum: &Frustum,
  tiles: &mut Vec<SelectedTile>,
  stats: &mut SelectionStats,
) {
  for region in tree.level(level) {
    stats.nodes_visited += 1;
    if !frustum.intersects(&terrain.cull_box(&region.bounds)) {
      stats.culled += 1;
      continue;
    }
    tiles.push(SelectedTile::for_region(region));
    stats.record_tile(level);
  }
}
