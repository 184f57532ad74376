use glam::Vec3;

use super::*;
use crate::atlas::UvRect;
use crate::lod::test_utils::{look_at, open_frustum};

fn terrain() -> TerrainConfig {
  TerrainConfig::default()
}

/// Reference radii for a 512 terrain: [1024, 128, 51.2].
const RADII: [f32; 3] = [1024.0, 128.0, 51.2];

fn run(camera_xz: Vec2, frustum: &Frustum) -> (Vec<SelectedTile>, SelectionStats) {
  let mut tiles = Vec::new();
  let mut stats = SelectionStats::default();
  select_rings(&terrain(), &RADII, camera_xz, frustum, &mut tiles, &mut stats);
  (tiles, stats)
}

#[test]
fn test_ring_level_bands() {
  assert_eq!(ring_level(0.0, &RADII), 2);
  assert_eq!(ring_level(51.0, &RADII), 2);
  assert_eq!(ring_level(51.2, &RADII), 1);
  assert_eq!(ring_level(127.9, &RADII), 1);
  assert_eq!(ring_level(128.0, &RADII), 0);
  // Past the outer ring cells fall back to the coarsest level
  assert_eq!(ring_level(5000.0, &RADII), 0);
}

/// Camera at the terrain center touches the four middle cells.
#[test]
fn test_camera_at_center() {
  let (tiles, stats) = run(Vec2::ZERO, &open_frustum());

  assert_eq!(stats.tiles_per_level, [12, 0, 4]);
  let fine: Vec<u32> = tiles[..4].iter().map(|t| t.textures.height).collect();
  assert_eq!(fine, vec![10, 11, 14, 15]);
  assert!(tiles[4..].iter().all(|t| t.level == 0 && t.textures.height == 0));
}

/// Cells around a corner camera coalesce into the level-1 node and sample
/// its quadrants.
#[test]
fn test_level_one_cells_sample_parent_quadrants() {
  let (tiles, stats) = run(Vec2::new(-200.0, -200.0), &open_frustum());

  assert_eq!(stats.tiles_per_level, [12, 3, 1]);
  assert_eq!(tiles[0].textures.height, 5);
  assert_eq!(tiles[0].uv, UvRect::FULL);

  let mid = &tiles[1..4];
  assert!(mid.iter().all(|t| t.level == 1 && t.node == RegionKey::new(1, 0, 0)));
  assert!(mid.iter().all(|t| t.textures.height == 1));
  let offsets: Vec<Vec2> = mid.iter().map(|t| t.uv.offset).collect();
  assert_eq!(offsets, vec![Vec2::new(0.5, 0.0), Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5)]);
}

/// Groups go finest first and each group is z-major.
#[test]
fn test_emission_order() {
  let (tiles, _) = run(Vec2::new(-200.0, -200.0), &open_frustum());

  let levels: Vec<u8> = tiles.iter().map(|t| t.level).collect();
  let mut sorted = levels.clone();
  sorted.sort_by(|a, b| b.cmp(a));
  assert_eq!(levels, sorted);

  let coarse: Vec<(f32, f32)> = tiles
    .iter()
    .filter(|t| t.level == 0)
    .map(|t| (t.world_min.y, t.world_min.x))
    .collect();
  let mut ordered = coarse.clone();
  ordered.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
  assert_eq!(coarse, ordered);
}

/// Closer cells are never coarser than farther cells.
#[test]
fn test_closer_never_coarser() {
  let terrain = terrain();
  for step_x in -12..=12 {
    for step_z in -12..=12 {
      let camera = Vec2::new(step_x as f32 * 30.0, step_z as f32 * 30.0);
      let levels = classify_cells(&terrain, &RADII, camera, &open_frustum());
      let distances: Vec<f32> = RegionKey::level_keys(FINEST_LEVEL)
        .map(|cell| terrain.get_cell_bounds(&cell).distance_to_point(camera))
        .collect();

      for a in 0..FINE_CELL_COUNT {
        for b in 0..FINE_CELL_COUNT {
          if distances[a] < distances[b] {
            assert!(
              levels[a] >= levels[b],
              "camera {:?}: cell {} (d={}) coarser than cell {} (d={})",
              camera,
              a,
              distances[a],
              b,
              distances[b]
            );
          }
        }
      }
    }
  }
}

/// Far away, all 16 cells share the root texture and their UV rectangles
/// tile it exactly.
#[test]
fn test_coarse_cells_tile_root_texture() {
  let (tiles, _) = run(Vec2::new(5000.0, 0.0), &open_frustum());
  assert_eq!(tiles.len(), 16);

  let area: f32 = tiles.iter().map(|t| t.uv.area()).sum();
  assert_eq!(area, 1.0);
  for (i, a) in tiles.iter().enumerate() {
    assert!(a.uv.offset.cmpge(Vec2::ZERO).all() && a.uv.max().cmple(Vec2::ONE).all());
    for b in &tiles[i + 1..] {
      assert_ne!(a.uv.offset, b.uv.offset);
    }
  }
}

#[test]
fn test_cells_outside_frustum_are_culled() {
  let view = look_at(Vec3::new(0.0, 100.0, -600.0), Vec3::new(0.0, 100.0, -2000.0));
  let (tiles, stats) = run(view.camera_xz(), &view.frustum);
  assert!(tiles.is_empty());
  assert_eq!(stats.culled, 16);
  assert_eq!(stats.nodes_visited, 16);
}

#[test]
fn test_never_more_than_sixteen_tiles() {
  for x in [-300.0, 0.0, 77.0, 900.0] {
    let (tiles, stats) = run(Vec2::new(x, x * 0.5), &open_frustum());
    assert!(tiles.len() <= 16);
    assert_eq!(stats.total_tiles() as usize, tiles.len());
  }
}
