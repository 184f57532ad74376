use glam::Mat4;

use super::*;
use crate::lod::test_utils::{look_at, open_frustum};

fn run(camera: Vec3, frustum: &Frustum) -> (Vec<SelectedTile>, SelectionStats) {
  let terrain = TerrainConfig::default();
  let tree = QuadTree::build(&terrain);
  let mut tiles = Vec::new();
  let mut stats = SelectionStats::default();
  select_screen_space(
    &tree,
    &terrain,
    &ScreenSpaceConfig::default(),
    camera,
    frustum,
    &mut tiles,
    &mut stats,
  );
  (tiles, stats)
}

fn heights(tiles: &[SelectedTile]) -> Vec<u32> {
  tiles.iter().map(|t| t.textures.height).collect()
}

// ===== Error metric =====

#[test]
fn test_error_reference_value() {
  let config = ScreenSpaceConfig::default();
  // 50 * 720 / (2 * 1000 * tan(pi / 8))
  let expected = 50.0 * 720.0 / (2.0 * 1000.0 * (std::f32::consts::PI / 8.0).tan());
  assert!((screen_space_error(50.0, 1000.0, &config) - expected).abs() < 1e-4);
}

#[test]
fn test_error_strictly_decreases_with_distance() {
  let config = ScreenSpaceConfig::default();
  let mut previous = f32::INFINITY;
  for step in 1..200 {
    let error = screen_space_error(25.0, 1.0 + step as f32 * 37.5, &config);
    assert!(error < previous, "error rose at step {}", step);
    previous = error;
  }
}

/// Distances below the minimum are clamped instead of blowing up.
#[test]
fn test_error_clamps_small_distance() {
  let config = ScreenSpaceConfig::default();
  let at_min = screen_space_error(12.5, 1.0, &config);
  assert_eq!(screen_space_error(12.5, 0.0, &config), at_min);
  assert_eq!(screen_space_error(12.5, 0.25, &config), at_min);
  assert!(at_min.is_finite());
}

/// A node accepted at some distance is accepted at every larger distance.
#[test]
fn test_acceptance_is_stable_with_distance() {
  let config = ScreenSpaceConfig::default();
  for geometric in config.geometric_error {
    let accepted_at = (1..2000)
      .map(|d| d as f32 * 10.0)
      .find(|d| screen_space_error(geometric, *d, &config) <= config.max_pixel_error)
      .expect("error eventually drops under budget");
    for d in 0..500 {
      let farther = accepted_at + d as f32 * 25.0;
      assert!(screen_space_error(geometric, farther, &config) <= config.max_pixel_error);
    }
  }
}

// ===== Traversal =====

/// Up close everything refines to leaves, visited SW, SE, NW, NE depth first.
#[test]
fn test_close_camera_refines_to_leaves() {
  let (tiles, stats) = run(Vec3::new(0.0, 250.0, 0.0), &open_frustum());

  assert_eq!(stats.tiles_per_level, [0, 0, 16]);
  assert_eq!(stats.nodes_visited, 21);
  assert_eq!(
    heights(&tiles),
    vec![5, 6, 9, 10, 7, 8, 11, 12, 13, 14, 17, 18, 15, 16, 19, 20]
  );
}

#[test]
fn test_middle_distance_stops_at_level_one() {
  let (tiles, stats) = run(Vec3::new(0.0, 75.0, 8000.0), &open_frustum());
  assert_eq!(stats.tiles_per_level, [0, 4, 0]);
  assert_eq!(heights(&tiles), vec![1, 2, 3, 4]);
}

#[test]
fn test_far_camera_draws_root_only() {
  let (tiles, stats) = run(Vec3::new(0.0, 75.0, 20_000.0), &open_frustum());
  assert_eq!(heights(&tiles), vec![0]);
  assert_eq!(stats.nodes_visited, 1);
}

/// A culled node prunes its whole subtree.
#[test]
fn test_culled_subtrees_are_pruned() {
  // Top-down orthographic view of the negative X half only
  let projection = Mat4::orthographic_rh(-1000.0, -10.0, -1000.0, 1000.0, -1000.0, 1000.0);
  let view = Mat4::look_at_rh(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
  let frustum = Frustum::from_view_projection(projection * view);

  let (tiles, stats) = run(Vec3::new(0.0, 250.0, 0.0), &frustum);
  assert_eq!(tiles.len(), 8);
  assert!(tiles.iter().all(|t| t.world_min.x < 0.0));
  assert_eq!(stats.culled, 2);
  assert_eq!(stats.nodes_visited, 1 + 4 + 8);
}

#[test]
fn test_camera_looking_away_selects_nothing() {
  let view = look_at(Vec3::new(0.0, 100.0, -600.0), Vec3::new(0.0, 100.0, -2000.0));
  let (tiles, stats) = run(view.camera_position, &view.frustum);
  assert!(tiles.is_empty());
  assert_eq!(stats.culled, 1);
  assert_eq!(stats.nodes_visited, 1);
}

#[test]
fn test_never_more_than_every_node() {
  for z in [0.0, 300.0, 3000.0, 9000.0] {
    let (tiles, _) = run(Vec3::new(50.0, 120.0, z), &open_frustum());
    assert!(tiles.len() <= 21);
    assert!(!tiles.is_empty());
  }
}
