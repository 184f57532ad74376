//! Distance-ring strategy over the 4x4 grid of finest cells.
//!
//! Each cell picks its level from the XZ distance between the camera and the
//! cell rectangle (zero when the camera is above the cell). Cells drawn
//! coarser than the finest level keep their own footprint but sample a
//! sub-rectangle of the ancestor texture, so a level-1 node can be partially
//! drawn at level 1 and partially at level 2.
//!
//! Tiles are emitted finest first: all level-2 cells, then level 1, then
//! level 0, each group in z-major order.

use glam::Vec2;

use crate::constants::{COARSEST_LEVEL, FINEST_LEVEL, FINE_CELL_COUNT, FINE_GRID_DIM};
use crate::region::RegionKey;
use crate::tile::SelectedTile;
use crate::types::TerrainConfig;
use crate::visibility::Frustum;

use super::budget::SelectionStats;

/// Level for a cell at `distance` given world radii `[R0, R1, R2]`.
///
/// `R0` bounds the coarsest ring; beyond it cells still fall back to level 0.
#[inline]
pub fn ring_level(distance: f32, radii: &[f32; 3]) -> u8 {
  if distance < radii[2] {
    2
  } else if distance < radii[1] {
    1
  } else {
    COARSEST_LEVEL
  }
}

/// Level of every finest cell (z-major), or `None` for culled cells.
pub fn classify_cells(
  terrain: &TerrainConfig,
  radii: &[f32; 3],
  camera_xz: Vec2,
  frustum: &Frustum,
) -> [Option<u8>; FINE_CELL_COUNT] {
  let mut levels = [None; FINE_CELL_COUNT];
  for (slot, cell) in levels.iter_mut().zip(RegionKey::level_keys(FINEST_LEVEL)) {
    let bounds = terrain.get_cell_bounds(&cell);
    if frustum.intersects(&terrain.cull_box(&bounds)) {
      *slot = Some(ring_level(bounds.distance_to_point(camera_xz), radii));
    }
  }
  levels
}

/// Emit visible cells, finest level group first.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "lod::select_rings"))]
pub fn select_rings(
  terrain: &TerrainConfig,
  radii: &[f32; 3],
  camera_xz: Vec2,
  frustum: &Frustum,
  tiles: &mut Vec<SelectedTile>,
  stats: &mut SelectionStats,
) {
  // Phase 1: Classify cells
  let levels = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("classify_cells").entered();
    classify_cells(terrain, radii, camera_xz, frustum)
  };
  stats.nodes_visited += FINE_CELL_COUNT as u32;
  stats.culled += levels.iter().filter(|l| l.is_none()).count() as u32;

  // Phase 2: Emit finest group first
  #[cfg(feature = "tracing")]
  let _span = tracing::info_span!("emit_tiles").entered();
  for level in (0..=FINEST_LEVEL).rev() {
    for (index, cell_level) in levels.iter().enumerate() {
      if *cell_level != Some(level) {
        continue;
      }
      let cell_x = index as u32 % FINE_GRID_DIM;
      let cell_z = index as u32 / FINE_GRID_DIM;
      tiles.push(SelectedTile::for_fine_cell(terrain, level, cell_x, cell_z));
      stats.record_tile(level);
    }
  }
}

#[cfg(test)]
#[path = "rings_test.rs"]
mod rings_test;
