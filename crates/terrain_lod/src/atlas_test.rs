use std::collections::HashSet;

use super::*;
use crate::constants::TEXTURE_COUNT;

// =========================================================================
// Texture index formula
// =========================================================================

#[test]
fn test_root_index_is_zero() {
  assert_eq!(texture_index(0, 0, 0), 0);
}

/// Every valid (level, x, z) maps to a distinct index in 0..21.
#[test]
fn test_index_is_bijection() {
  let mut seen = HashSet::new();
  for level in 0..LEVEL_COUNT as u8 {
    let dim = GRID_DIM[level as usize];
    for z in 0..dim {
      for x in 0..dim {
        let index = texture_index(level, x, z);
        assert!((index as usize) < TEXTURE_COUNT, "index {} out of range", index);
        assert!(
          seen.insert(index),
          "duplicate index {} for ({}, {}, {})",
          index,
          level,
          x,
          z
        );
      }
    }
  }
  assert_eq!(seen.len(), TEXTURE_COUNT);
}

#[test]
fn test_index_reference_values() {
  assert_eq!(texture_index(1, 0, 0), 1);
  assert_eq!(texture_index(1, 1, 0), 2);
  assert_eq!(texture_index(1, 0, 1), 3);
  assert_eq!(texture_index(1, 1, 1), 4);
  assert_eq!(texture_index(2, 0, 0), 5);
  assert_eq!(texture_index(2, 3, 0), 8);
  assert_eq!(texture_index(2, 0, 1), 9);
  assert_eq!(texture_index(2, 3, 3), 20);
}

#[test]
#[should_panic]
#[cfg(debug_assertions)]
fn test_out_of_range_cell_asserts() {
  texture_index(1, 2, 0);
}

// =========================================================================
// UV sub-rectangles
// =========================================================================

#[test]
fn test_finest_level_uses_full_texture() {
  for z in 0..4 {
    for x in 0..4 {
      assert_eq!(UvRect::for_fine_cell(2, x, z), UvRect::FULL);
    }
  }
}

#[test]
fn test_level_1_quadrants() {
  let rect = UvRect::for_fine_cell(1, 3, 2);
  assert_eq!(rect.offset, Vec2::new(0.5, 0.0));
  assert_eq!(rect.scale, Vec2::splat(0.5));
}

#[test]
fn test_level_0_sixteenths() {
  let rect = UvRect::for_fine_cell(0, 1, 3);
  assert_eq!(rect.offset, Vec2::new(0.25, 0.75));
  assert_eq!(rect.scale, Vec2::splat(0.25));
}

/// Cells sharing a coalesced texture tile [0,1]² without gaps or overlaps.
///
/// Checked on a lattice of sample points: each point strictly inside the unit
/// square must fall in exactly one rectangle, and the areas must sum to 1.
#[test]
fn test_shared_texture_rects_tile_unit_square() {
  let groups: Vec<(u8, Vec<(u32, u32)>)> = vec![
    // Level 0: all 16 cells share texture 0
    (0, (0..4).flat_map(|z| (0..4).map(move |x| (x, z))).collect()),
    // Level 1: the 4 cells under each level-1 node
    (1, vec![(0, 0), (1, 0), (0, 1), (1, 1)]),
    (1, vec![(2, 0), (3, 0), (2, 1), (3, 1)]),
    (1, vec![(0, 2), (1, 2), (0, 3), (1, 3)]),
    (1, vec![(2, 2), (3, 2), (2, 3), (3, 3)]),
  ];

  for (level, cells) in groups {
    let rects: Vec<UvRect> = cells
      .iter()
      .map(|&(x, z)| UvRect::for_fine_cell(level, x, z))
      .collect();

    let area: f32 = rects.iter().map(|r| r.area()).sum();
    assert!((area - 1.0).abs() < 1e-6, "level {} area {}", level, area);

    for sy in 0..32 {
      for sx in 0..32 {
        let p = Vec2::new((sx as f32 + 0.5) / 32.0, (sy as f32 + 0.5) / 32.0);
        let hits = rects
          .iter()
          .filter(|r| p.cmpge(r.offset).all() && p.cmplt(r.max()).all())
          .count();
        assert_eq!(hits, 1, "level {} point {:?} covered {} times", level, p, hits);
      }
    }
  }
}

// =========================================================================
// Texture paths
// =========================================================================

#[test]
fn test_texture_paths() {
  assert_eq!(texture_path(TextureChannel::Height, 0, 0, 0), "003/Height_Out.dds");
  assert_eq!(
    texture_path(TextureChannel::Diffuse, 1, 1, 0),
    "002/Weathering/Weathering_Out_y0_x1.dds"
  );
  assert_eq!(
    texture_path(TextureChannel::Normal, 2, 2, 3),
    "001/Normals/Normals_Out_y3_x2.dds"
  );
}

/// Manifest order must follow texture_index so entry i is texture i.
#[test]
fn test_manifest_follows_index_order() {
  for channel in TextureChannel::ALL {
    let manifest = channel_manifest(channel);
    assert_eq!(manifest.len(), TEXTURE_COUNT);
    assert_eq!(manifest[texture_index(1, 1, 1) as usize], texture_path(channel, 1, 1, 1));
    assert_eq!(manifest[texture_index(2, 1, 2) as usize], texture_path(channel, 2, 1, 2));
  }
}
