//! Screen-space error strategy: top-down quadtree refinement.
//!
//! A node is refined while its geometric error, projected to pixels at the
//! node's distance, exceeds the pixel budget:
//!
//! ```text
//! error_px = geometric_error[level] * screen_height
//!            / (2 * max(distance, min_distance) * tan(fov_y / 2))
//! ```
//!
//! `distance` is measured in 3D from the camera to the center of the node's
//! box at half the terrain height.

use glam::Vec3;
use smallvec::SmallVec;

use crate::region::{NodeId, QuadTree};
use crate::tile::SelectedTile;
use crate::types::TerrainConfig;
use crate::visibility::Frustum;

use super::budget::SelectionStats;
use super::config::ScreenSpaceConfig;

/// Projected error in pixels of `geometric_error` seen from `distance`.
#[inline]
pub fn screen_space_error(geometric_error: f32, distance: f32, config: &ScreenSpaceConfig) -> f32 {
  let distance = distance.max(config.min_distance);
  geometric_error * config.screen_height / (2.0 * distance * (config.fov_y * 0.5).tan())
}

/// Refine from the root and emit one whole-texture tile per accepted node.
///
/// Children are visited in SW, SE, NW, NE order; culled nodes prune their
/// whole subtree.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "lod::select_screen_space"))]
pub fn select_screen_space(
  tree: &QuadTree,
  terrain: &TerrainConfig,
  config: &ScreenSpaceConfig,
  camera: Vec3,
  frustum: &Frustum,
  tiles: &mut Vec<SelectedTile>,
  stats: &mut SelectionStats,
) {
  let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
  stack.push(tree.root());

  while let Some(id) = stack.pop() {
    let region = tree.get(id);
    stats.nodes_visited += 1;

    if !frustum.intersects(&terrain.cull_box(&region.bounds)) {
      stats.culled += 1;
      continue;
    }

    let center = region.bounds.center();
    let distance = camera.distance(Vec3::new(center.x, terrain.max_height * 0.5, center.y));
    let error = screen_space_error(config.geometric_error[region.level() as usize], distance, config);

    if error > config.max_pixel_error && region.has_children() {
      // Reversed so the stack pops SW first
      stack.extend(region.children.iter().rev().copied());
    } else {
      tiles.push(SelectedTile::for_region(region));
      stats.record_tile(region.level());
    }
  }
}

#[cfg(test)]
#[path = "screen_space_test.rs"]
mod screen_space_test;
